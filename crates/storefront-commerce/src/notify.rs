//! Typed notifications for cart and toast observers.
//!
//! The engine only publishes; UI layers subscribe through whatever bus
//! implementation they inject.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

/// Events emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum StorefrontEvent {
    /// The cart was mutated; observers should re-read it.
    CartChanged,
    /// A message should be shown to the customer.
    ToastRequested { kind: ToastKind, message: String },
}

impl StorefrontEvent {
    /// Create a toast request.
    pub fn toast(kind: ToastKind, message: impl Into<String>) -> Self {
        StorefrontEvent::ToastRequested {
            kind,
            message: message.into(),
        }
    }

    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            StorefrontEvent::CartChanged => "cart-changed",
            StorefrontEvent::ToastRequested { .. } => "toast-requested",
        }
    }
}

/// Fire-and-forget publisher.
pub trait NotificationBus: Send + Sync {
    fn publish(&self, event: StorefrontEvent);
}

/// Fan-out bus backed by a tokio broadcast channel.
///
/// Publishing with no live subscribers drops the event. Slow subscribers
/// lag and lose the oldest events once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct BroadcastBus {
    sender: broadcast::Sender<StorefrontEvent>,
}

impl BroadcastBus {
    /// Default channel capacity.
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl NotificationBus for BroadcastBus {
    fn publish(&self, event: StorefrontEvent) {
        tracing::trace!(event = event.name(), "publishing");
        // No receivers is not an error for a fire-and-forget bus.
        let _ = self.sender.send(event);
    }
}

/// Bus that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBus;

impl NotificationBus for NoopBus {
    fn publish(&self, _event: StorefrontEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(StorefrontEvent::CartChanged.name(), "cart-changed");
        assert_eq!(
            StorefrontEvent::toast(ToastKind::Error, "x").name(),
            "toast-requested"
        );
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(StorefrontEvent::toast(ToastKind::Success, "Added")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "toast-requested", "kind": "success", "message": "Added"})
        );
        let json = serde_json::to_value(StorefrontEvent::CartChanged).unwrap();
        assert_eq!(json, serde_json::json!({"event": "cart-changed"}));
    }

    #[test]
    fn test_broadcast_fan_out() {
        let bus = BroadcastBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(StorefrontEvent::CartChanged);

        assert_eq!(first.try_recv().unwrap(), StorefrontEvent::CartChanged);
        assert_eq!(second.try_recv().unwrap(), StorefrontEvent::CartChanged);
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = BroadcastBus::new(1);
        bus.publish(StorefrontEvent::CartChanged);
        NoopBus.publish(StorefrontEvent::CartChanged);
    }
}
