//! The subscriber registry and fan-out.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use sharegate_core::FileId;

use crate::event::ChangeEvent;

/// Default per-subscriber channel capacity.
///
/// A subscriber that falls this far behind starts losing events and must
/// re-fetch state to catch up.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Transient handle identifying one subscriber in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live subscription: the id to unsubscribe with and the event stream.
///
/// Dropping the receiver is equivalent to disconnecting; the registry
/// prunes the dead channel on the next fan-out.
pub struct Subscription {
    pub id: SubscriberId,
    pub events: mpsc::Receiver<ChangeEvent>,
}

/// Inner shared state for the notifier (shared across all clones).
struct NotifierInner {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<ChangeEvent>>>,
}

/// Fan-out of change events to all currently registered subscribers.
///
/// The registry is mutated by connect/disconnect and read by notify,
/// concurrently; a mutex-guarded map keeps that safe. Sends use
/// `try_send`, so one full or dead channel can neither stall nor fail the
/// mutation that triggered the notification.
///
/// All clones share the same registry.
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Arc<NotifierInner>,
    capacity: usize,
}

impl ChangeNotifier {
    /// Create a notifier with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a notifier with a custom per-subscriber channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                next_id: AtomicU64::new(1),
                subscribers: Mutex::new(HashMap::new()),
            }),
            capacity,
        }
    }

    /// Register a new subscriber channel.
    ///
    /// The subscription starts empty: nothing about past changes is
    /// replayed.
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(self.capacity);

        self.inner
            .subscribers
            .lock()
            .expect("notifier mutex poisoned")
            .insert(id, tx);

        Subscription { id, events: rx }
    }

    /// Remove a subscriber from the registry.
    ///
    /// Idempotent and safe to call at any time, including concurrently
    /// with an in-flight [`notify`](Self::notify).
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.inner
            .subscribers
            .lock()
            .expect("notifier mutex poisoned")
            .remove(&id);
    }

    /// Publish a permission-update event for `file_id` to every currently
    /// registered subscriber.
    ///
    /// Call only after the repository mutation has committed. Delivery is
    /// at-most-once and best-effort: full channels drop the event, closed
    /// channels are pruned. Never blocks, never fails.
    pub fn notify(&self, file_id: FileId) {
        let event = ChangeEvent::permission_update(file_id);

        let mut subscribers = self
            .inner
            .subscribers
            .lock()
            .expect("notifier mutex poisoned");

        subscribers.retain(|id, tx| match tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!(subscriber = %id, file = %file_id, "subscriber full, dropping event");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(subscriber = %id, "subscriber gone, pruning");
                false
            }
        });
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .expect("notifier mutex poisoned")
            .len()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let notifier = ChangeNotifier::new();
        let mut sub = notifier.subscribe();

        notifier.notify(FileId::new(5));

        let event = timeout(Duration::from_millis(100), sub.events.recv())
            .await
            .expect("subscriber should receive the event")
            .unwrap();
        assert_eq!(event, ChangeEvent::permission_update(FileId::new(5)));
    }

    #[tokio::test]
    async fn test_all_subscribers_receive() {
        let notifier = ChangeNotifier::new();
        let mut sub1 = notifier.subscribe();
        let mut sub2 = notifier.subscribe();

        notifier.notify(FileId::new(1));

        assert!(sub1.events.recv().await.is_some());
        assert!(sub2.events.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_unsubscribed_receives_nothing() {
        let notifier = ChangeNotifier::new();
        let mut sub = notifier.subscribe();

        notifier.unsubscribe(sub.id);
        notifier.notify(FileId::new(1));

        // The channel is closed once the sender is dropped from the
        // registry; no event was buffered before that.
        assert!(sub.events.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_unsubscribe_idempotent() {
        let notifier = ChangeNotifier::new();
        let sub = notifier.subscribe();

        notifier.unsubscribe(sub.id);
        notifier.unsubscribe(sub.id);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_no_subscribers_does_not_panic() {
        let notifier = ChangeNotifier::new();
        notifier.notify(FileId::new(1));
    }

    #[tokio::test]
    async fn test_full_channel_drops_without_blocking() {
        let notifier = ChangeNotifier::with_capacity(2);
        let mut sub = notifier.subscribe();

        // Never reading: the third event must be dropped, not block.
        notifier.notify(FileId::new(1));
        notifier.notify(FileId::new(2));
        notifier.notify(FileId::new(3));

        assert_eq!(
            sub.events.recv().await.unwrap().file_id(),
            FileId::new(1)
        );
        assert_eq!(
            sub.events.recv().await.unwrap().file_id(),
            FileId::new(2)
        );
        assert!(sub.events.try_recv().is_err());

        // Still registered - dropping events is not a disconnect.
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_pruned() {
        let notifier = ChangeNotifier::new();
        let sub = notifier.subscribe();
        drop(sub);

        notifier.notify(FileId::new(1));
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_clone_shares_registry() {
        let notifier = ChangeNotifier::new();
        let clone = notifier.clone();
        let mut sub = notifier.subscribe();

        clone.notify(FileId::new(9));

        let event = timeout(Duration::from_millis(100), sub.events.recv())
            .await
            .expect("clone should notify on the shared registry")
            .unwrap();
        assert_eq!(event.file_id(), FileId::new(9));
    }
}
