//! Toast presentation queue.
//!
//! A pure state machine: callers feed it [`QueueEvent`]s and carry out the
//! [`Effect`]s it returns (timers, server round trips). It never performs I/O
//! itself, which keeps every transition testable without a runtime.
//!
//! One notification is presented at a time, always the head of the in-memory
//! list. Timers are tagged with a generation number; an expiry or exit event
//! from an older generation is ignored.

use std::time::Duration;

use uuid::Uuid;

use crate::core::config::DeliveryConfig;
use crate::features::notifications::dtos::NotificationDto;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToastState {
    #[default]
    Idle,
    Showing(Uuid),
    Dismissing(Uuid),
}

#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// Full list from a page load
    Loaded(Vec<NotificationDto>),
    TimerExpired { generation: u64 },
    ExitFinished { generation: u64 },
    /// User closed the current toast
    Close,
    /// User muted the current toast's category
    Mute,
    /// Server list returned by a successful mark-read
    MarkReadSucceeded(Vec<NotificationDto>),
    MarkReadFailed,
    ToggleSucceeded { category_id: Uuid, is_hidden: bool },
    ToggleFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `TimerExpired { generation }` after `after`
    StartTimer { generation: u64, after: Duration },
    /// Deliver `ExitFinished { generation }` after `after`
    StartExit { generation: u64, after: Duration },
    MarkRead(Uuid),
    ToggleCategory(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    MarkRead(Uuid),
    Mute { notification_id: Uuid },
}

#[derive(Debug)]
pub struct DeliveryQueue {
    config: DeliveryConfig,
    notifications: Vec<NotificationDto>,
    /// Toast in its exit transition, already removed from `notifications`
    leaving: Option<NotificationDto>,
    state: ToastState,
    pending: Option<Pending>,
    generation: u64,
}

impl DeliveryQueue {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            config,
            notifications: Vec::new(),
            leaving: None,
            state: ToastState::Idle,
            pending: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ToastState {
        &self.state
    }

    /// Notification currently on screen, including during its exit transition
    pub fn current(&self) -> Option<&NotificationDto> {
        match self.state {
            ToastState::Idle => None,
            ToastState::Showing(id) => self.notifications.iter().find(|n| n.id == id),
            ToastState::Dismissing(_) => self.leaving.as_ref(),
        }
    }

    /// In-memory unread list, head first
    pub fn notifications(&self) -> &[NotificationDto] {
        &self.notifications
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle(&mut self, event: QueueEvent) -> Vec<Effect> {
        match event {
            QueueEvent::Loaded(list) => self.replace_list(list),
            QueueEvent::TimerExpired { generation } => self.on_timer(generation),
            QueueEvent::ExitFinished { generation } => self.on_exit_finished(generation),
            QueueEvent::Close => self.on_close(),
            QueueEvent::Mute => self.on_mute(),
            QueueEvent::MarkReadSucceeded(list) => {
                self.pending = None;
                self.replace_list(list)
            }
            QueueEvent::ToggleSucceeded {
                category_id,
                is_hidden,
            } => self.on_toggled(category_id, is_hidden),
            QueueEvent::MarkReadFailed | QueueEvent::ToggleFailed => {
                self.pending = None;
                Vec::new()
            }
        }
    }

    fn replace_list(&mut self, list: Vec<NotificationDto>) -> Vec<Effect> {
        self.notifications = list;
        self.present_head()
    }

    /// Show the head of the in-memory list, or go idle when it is empty.
    ///
    /// A toast that stays on screen keeps its running timer.
    fn present_head(&mut self) -> Vec<Effect> {
        self.leaving = None;
        let Some(head) = self.notifications.first().map(|n| n.id) else {
            self.state = ToastState::Idle;
            return Vec::new();
        };

        if self.state == ToastState::Showing(head) {
            return Vec::new();
        }

        self.generation += 1;
        self.state = ToastState::Showing(head);
        vec![Effect::StartTimer {
            generation: self.generation,
            after: self.config.toast_duration,
        }]
    }

    fn begin_exit(&mut self, id: Uuid) -> Vec<Effect> {
        if let Some(index) = self.notifications.iter().position(|n| n.id == id) {
            self.leaving = Some(self.notifications.remove(index));
        }
        self.generation += 1;
        self.state = ToastState::Dismissing(id);
        vec![Effect::StartExit {
            generation: self.generation,
            after: self.config.exit_transition,
        }]
    }

    fn on_timer(&mut self, generation: u64) -> Vec<Effect> {
        match self.state {
            ToastState::Showing(id) if generation == self.generation => {
                tracing::debug!("Toast {} expired", id);
                self.begin_exit(id)
            }
            _ => Vec::new(),
        }
    }

    fn on_exit_finished(&mut self, generation: u64) -> Vec<Effect> {
        match self.state {
            ToastState::Dismissing(_) if generation == self.generation => self.present_head(),
            _ => Vec::new(),
        }
    }

    fn on_close(&mut self) -> Vec<Effect> {
        match (self.state.clone(), self.pending) {
            (ToastState::Showing(id), None) => {
                self.pending = Some(Pending::MarkRead(id));
                vec![Effect::MarkRead(id)]
            }
            _ => Vec::new(),
        }
    }

    fn on_mute(&mut self) -> Vec<Effect> {
        if self.pending.is_some() {
            return Vec::new();
        }
        let (notification_id, category_id) = match (&self.state, self.current()) {
            (ToastState::Showing(_), Some(n)) => (n.id, n.category_id),
            _ => return Vec::new(),
        };
        self.pending = Some(Pending::Mute { notification_id });
        vec![Effect::ToggleCategory(category_id)]
    }

    fn on_toggled(&mut self, category_id: Uuid, is_hidden: bool) -> Vec<Effect> {
        let notification_id = match self.pending {
            Some(Pending::Mute { notification_id }) => notification_id,
            _ => return Vec::new(),
        };
        self.pending = None;
        tracing::debug!("Category {} hidden={}", category_id, is_hidden);

        // Other notifications of the muted category stay in the list until the next load
        if self.state == ToastState::Showing(notification_id) {
            self.begin_exit(notification_id)
        } else {
            Vec::new()
        }
    }
}
