use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Sleep};

use crate::core::config::DeliveryConfig;
use crate::features::delivery::clients::NotificationApi;
use crate::features::delivery::queue::{DeliveryQueue, Effect, QueueEvent, ToastState};
use crate::features::notifications::dtos::NotificationDto;

type RoundTrip = Pin<Box<dyn Future<Output = QueueEvent> + Send>>;

/// Actions a user can take on the toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Close,
    Mute,
    /// Refetch the page state, as a page load would
    Reload,
}

/// What the UI renders
#[derive(Debug, Clone, Default)]
pub struct ToastView {
    pub state: ToastState,
    pub notification: Option<NotificationDto>,
}

/// UI side of a running [`DeliveryDriver`]
#[derive(Clone)]
pub struct DeliveryHandle {
    actions: mpsc::Sender<UserAction>,
    view: watch::Receiver<ToastView>,
}

impl DeliveryHandle {
    pub async fn send(&self, action: UserAction) -> bool {
        self.actions.send(action).await.is_ok()
    }

    pub fn view(&self) -> ToastView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ToastView> {
        self.view.clone()
    }
}

/// Runs a [`DeliveryQueue`] against a [`NotificationApi`] on one task.
///
/// The loop waits on user actions, the toast timer, the exit transition and at
/// most one in-flight round trip. It stops when every handle is dropped.
pub struct DeliveryDriver {
    api: Arc<dyn NotificationApi>,
    queue: DeliveryQueue,
    actions: mpsc::Receiver<UserAction>,
    view: watch::Sender<ToastView>,
    timer: Option<(u64, Pin<Box<Sleep>>)>,
    exit: Option<(u64, Pin<Box<Sleep>>)>,
    in_flight: Option<RoundTrip>,
}

impl DeliveryDriver {
    pub fn new(api: Arc<dyn NotificationApi>, config: DeliveryConfig) -> (Self, DeliveryHandle) {
        let (actions_tx, actions_rx) = mpsc::channel(16);
        let (view_tx, view_rx) = watch::channel(ToastView::default());

        let driver = Self {
            api,
            queue: DeliveryQueue::new(config),
            actions: actions_rx,
            view: view_tx,
            timer: None,
            exit: None,
            in_flight: None,
        };
        let handle = DeliveryHandle {
            actions: actions_tx,
            view: view_rx,
        };

        (driver, handle)
    }

    /// Spawn the driver on the current runtime
    pub fn spawn(
        api: Arc<dyn NotificationApi>,
        config: DeliveryConfig,
    ) -> (DeliveryHandle, tokio::task::JoinHandle<()>) {
        let (driver, handle) = Self::new(api, config);
        let task = tokio::spawn(driver.run());
        (handle, task)
    }

    pub async fn run(mut self) {
        self.load().await;

        loop {
            tokio::select! {
                action = self.actions.recv() => match action {
                    Some(UserAction::Reload) => self.load().await,
                    Some(UserAction::Close) => self.dispatch(QueueEvent::Close),
                    Some(UserAction::Mute) => self.dispatch(QueueEvent::Mute),
                    None => break,
                },
                generation = wait(&mut self.timer) => {
                    self.timer = None;
                    self.dispatch(QueueEvent::TimerExpired { generation });
                }
                generation = wait(&mut self.exit) => {
                    self.exit = None;
                    self.dispatch(QueueEvent::ExitFinished { generation });
                }
                event = finish(&mut self.in_flight) => {
                    self.in_flight = None;
                    self.dispatch(event);
                }
            }
        }

        tracing::debug!("Delivery driver stopped");
    }

    async fn load(&mut self) {
        match self.api.fetch_state().await {
            Ok(state) => self.dispatch(QueueEvent::Loaded(state.unread_notifications)),
            Err(e) => tracing::warn!("Failed to load notifications: {}", e),
        }
    }

    fn dispatch(&mut self, event: QueueEvent) {
        for effect in self.queue.handle(event) {
            self.apply(effect);
        }

        let view = ToastView {
            state: self.queue.state().clone(),
            notification: self.queue.current().cloned(),
        };
        self.view.send_replace(view);
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::StartTimer { generation, after } => {
                self.timer = Some((generation, Box::pin(sleep(after))));
            }
            Effect::StartExit { generation, after } => {
                self.exit = Some((generation, Box::pin(sleep(after))));
            }
            Effect::MarkRead(id) => {
                let api = Arc::clone(&self.api);
                self.in_flight = Some(Box::pin(async move {
                    match api.mark_read(id).await {
                        Ok(list) => QueueEvent::MarkReadSucceeded(list),
                        Err(e) => {
                            tracing::warn!("Failed to mark notification {} read: {}", id, e);
                            QueueEvent::MarkReadFailed
                        }
                    }
                }));
            }
            Effect::ToggleCategory(category_id) => {
                let api = Arc::clone(&self.api);
                self.in_flight = Some(Box::pin(async move {
                    match api.toggle_category(category_id).await {
                        Ok(result) => QueueEvent::ToggleSucceeded {
                            category_id: result.category_id,
                            is_hidden: result.is_hidden,
                        },
                        Err(e) => {
                            tracing::warn!("Failed to toggle category {}: {}", category_id, e);
                            QueueEvent::ToggleFailed
                        }
                    }
                }));
            }
        }
    }
}

/// Resolve with the timer's generation once it fires; never resolves when unset
async fn wait(timer: &mut Option<(u64, Pin<Box<Sleep>>)>) -> u64 {
    match timer {
        Some((generation, delay)) => {
            delay.as_mut().await;
            *generation
        }
        None => std::future::pending().await,
    }
}

async fn finish(in_flight: &mut Option<RoundTrip>) -> QueueEvent {
    match in_flight {
        Some(round_trip) => round_trip.as_mut().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::dtos::CategorySummaryDto;
    use crate::features::delivery::clients::ClientError;
    use crate::features::notifications::dtos::NotificationStateDto;
    use crate::features::preferences::dtos::ToggleCategoryResponseDto;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use uuid::Uuid;

    fn dto(title: &str, category_id: Uuid) -> NotificationDto {
        NotificationDto {
            id: Uuid::now_v7(),
            title: title.to_string(),
            text: String::new(),
            view_counter: 0,
            category_id,
            category: CategorySummaryDto {
                id: category_id,
                name: "General".to_string(),
                color: None,
            },
            created_at: Utc::now(),
        }
    }

    /// Server stand-in holding the unread list; mark-read removes from it
    struct FakeApi {
        unread: Mutex<Vec<NotificationDto>>,
        mark_read_calls: AtomicUsize,
        fail: bool,
    }

    impl FakeApi {
        fn new(unread: Vec<NotificationDto>) -> Arc<Self> {
            Arc::new(Self {
                unread: Mutex::new(unread),
                mark_read_calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing(unread: Vec<NotificationDto>) -> Arc<Self> {
            Arc::new(Self {
                unread: Mutex::new(unread),
                mark_read_calls: AtomicUsize::new(0),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl NotificationApi for FakeApi {
        async fn fetch_state(&self) -> Result<NotificationStateDto, ClientError> {
            Ok(NotificationStateDto {
                unread_notifications: self.unread.lock().unwrap().clone(),
                notification_preferences: vec![],
            })
        }

        async fn mark_read(&self, id: Uuid) -> Result<Vec<NotificationDto>, ClientError> {
            self.mark_read_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            let mut unread = self.unread.lock().unwrap();
            unread.retain(|n| n.id != id);
            Ok(unread.clone())
        }

        async fn toggle_category(
            &self,
            category_id: Uuid,
        ) -> Result<ToggleCategoryResponseDto, ClientError> {
            if self.fail {
                return Err(ClientError::EmptyResponse);
            }
            self.unread
                .lock()
                .unwrap()
                .retain(|n| n.category_id != category_id);
            Ok(ToggleCategoryResponseDto {
                category_id,
                is_hidden: true,
            })
        }
    }

    async fn wait_for(handle: &DeliveryHandle, expected: ToastState) -> ToastView {
        let mut rx = handle.subscribe();
        let view = rx
            .wait_for(|view| view.state == expected)
            .await
            .unwrap()
            .clone();
        view
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_advances_to_next() {
        let cat = Uuid::now_v7();
        let (c, b, a) = (dto("C", cat), dto("B", cat), dto("A", cat));
        let api = FakeApi::new(vec![c.clone(), b.clone(), a]);
        let (handle, _task) = DeliveryDriver::spawn(api.clone(), DeliveryConfig::default());

        let view = wait_for(&handle, ToastState::Showing(c.id)).await;
        assert_eq!(view.notification.unwrap().title, "C");

        assert!(handle.send(UserAction::Close).await);
        let view = wait_for(&handle, ToastState::Showing(b.id)).await;
        assert_eq!(view.notification.unwrap().title, "B");
        assert_eq!(api.mark_read_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_expiry_drops_locally() {
        let cat = Uuid::now_v7();
        let (c, b) = (dto("C", cat), dto("B", cat));
        let api = FakeApi::new(vec![c.clone(), b.clone()]);
        let (handle, _task) = DeliveryDriver::spawn(api.clone(), DeliveryConfig::default());

        wait_for(&handle, ToastState::Showing(c.id)).await;
        // Paused clock auto-advances past the five second timer
        wait_for(&handle, ToastState::Showing(b.id)).await;
        assert_eq!(api.mark_read_calls.load(Ordering::SeqCst), 0);

        handle.send(UserAction::Reload).await;
        wait_for(&handle, ToastState::Showing(c.id)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_waits_full_duration() {
        let cat = Uuid::now_v7();
        let (c, b) = (dto("C", cat), dto("B", cat));
        let api = FakeApi::new(vec![c.clone(), b]);
        let (handle, _task) = DeliveryDriver::spawn(api, DeliveryConfig::default());

        wait_for(&handle, ToastState::Showing(c.id)).await;
        let started = tokio::time::Instant::now();

        let mut rx = handle.subscribe();
        rx.wait_for(|view| view.state != ToastState::Showing(c.id))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mute_leaves_showing() {
        let muted = Uuid::now_v7();
        let other = Uuid::now_v7();
        let (b, a) = (dto("B", muted), dto("A", other));
        let api = FakeApi::new(vec![b.clone(), a.clone()]);
        let (handle, _task) = DeliveryDriver::spawn(api, DeliveryConfig::default());

        wait_for(&handle, ToastState::Showing(b.id)).await;
        handle.send(UserAction::Mute).await;
        wait_for(&handle, ToastState::Showing(a.id)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_close_keeps_toast_until_timer() {
        let cat = Uuid::now_v7();
        let c = dto("C", cat);
        let api = FakeApi::failing(vec![c.clone()]);
        let (handle, _task) = DeliveryDriver::spawn(api.clone(), DeliveryConfig::default());

        wait_for(&handle, ToastState::Showing(c.id)).await;
        handle.send(UserAction::Close).await;

        wait_for(&handle, ToastState::Idle).await;
        assert_eq!(api.mark_read_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_handles_dropped() {
        let api = FakeApi::new(vec![]);
        let (handle, task) = DeliveryDriver::spawn(api, DeliveryConfig::default());

        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
