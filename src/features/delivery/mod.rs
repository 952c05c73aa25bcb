//! Client-side toast delivery.
//!
//! [`queue::DeliveryQueue`] decides what is on screen; [`driver::DeliveryDriver`]
//! runs it on tokio against a [`clients::NotificationApi`], publishing the
//! current toast through a `watch` channel.

pub mod clients;
pub mod driver;
pub mod queue;

pub use clients::{ClientError, HttpNotificationApi, NotificationApi};
pub use driver::{DeliveryDriver, DeliveryHandle, ToastView, UserAction};
pub use queue::{DeliveryQueue, Effect, QueueEvent, ToastState};
