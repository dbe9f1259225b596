//! # Change Notifier
//!
//! Publish/subscribe fan-out of [`ScheduleEvent`]s to live viewers, built on a
//! tokio broadcast channel. One notifier is constructed at startup and cloned
//! into whoever needs it.
//!
//! Delivery is best effort: an event reaches the subscriptions that exist when
//! it is published, and nobody else. Publishing never blocks and never fails.

use std::sync::Arc;

use studiosync_core::models::event::ScheduleEvent;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, broadcast};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ScheduleNotifier {
    tx: broadcast::Sender<ScheduleEvent>,
    permits: Arc<Semaphore>,
    max_subscribers: usize,
}

impl ScheduleNotifier {
    /// `capacity` bounds the events buffered per subscriber;
    /// `max_subscribers` bounds the number of live subscriptions.
    pub fn new(capacity: usize, max_subscribers: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            permits: Arc::new(Semaphore::new(max_subscribers)),
            max_subscribers,
        }
    }

    /// Sends `event` to every current subscription and returns how many
    /// received it. Zero subscribers is not an error.
    pub fn publish(&self, event: ScheduleEvent) -> usize {
        let name = event.name();
        match self.tx.send(event) {
            Ok(receivers) => {
                debug!(event = name, receivers, "published schedule event");
                receivers
            }
            Err(_) => {
                debug!(event = name, "published schedule event with no subscribers");
                0
            }
        }
    }

    /// Opens a subscription, or `None` when `max_subscribers` are already
    /// live. Dropping the subscription unsubscribes.
    pub fn subscribe(&self) -> Option<ScheduleSubscription> {
        let permit = Arc::clone(&self.permits).try_acquire_owned().ok()?;
        Some(ScheduleSubscription {
            rx: self.tx.subscribe(),
            _permit: permit,
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn max_subscribers(&self) -> usize {
        self.max_subscribers
    }
}

pub struct ScheduleSubscription {
    rx: broadcast::Receiver<ScheduleEvent>,
    _permit: OwnedSemaphorePermit,
}

impl ScheduleSubscription {
    /// Waits for the next event. A subscriber that fell behind gets a single
    /// coalesced event in place of everything it missed. Returns `None` once
    /// the notifier is gone.
    pub async fn recv(&mut self) -> Option<ScheduleEvent> {
        match self.rx.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "viewer lagged behind, coalescing missed events");
                self.rx = self.rx.resubscribe();
                Some(ScheduleEvent::coalesced())
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[tokio::test]
    async fn publish_reaches_every_live_subscriber() {
        let notifier = ScheduleNotifier::new(8, 8);
        let mut first = notifier.subscribe().unwrap();
        let mut second = notifier.subscribe().unwrap();
        let id = Uuid::new_v4();

        assert_eq!(notifier.publish(ScheduleEvent::updated(id)), 2);

        assert_eq!(first.recv().await, Some(ScheduleEvent::updated(id)));
        assert_eq!(second.recv().await, Some(ScheduleEvent::updated(id)));
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let notifier = ScheduleNotifier::new(8, 8);

        assert_eq!(notifier.publish(ScheduleEvent::updated(Uuid::new_v4())), 0);

        let mut late = notifier.subscribe().unwrap();
        let later = Uuid::new_v4();
        notifier.publish(ScheduleEvent::updated(later));

        assert_eq!(late.recv().await, Some(ScheduleEvent::updated(later)));
    }

    #[tokio::test]
    async fn subscriptions_are_bounded_and_released_on_drop() {
        let notifier = ScheduleNotifier::new(8, 1);

        let held = notifier.subscribe().unwrap();
        assert!(notifier.subscribe().is_none());
        assert_eq!(notifier.subscriber_count(), 1);

        drop(held);
        assert_eq!(notifier.subscriber_count(), 0);
        assert!(notifier.subscribe().is_some());
    }

    #[tokio::test]
    async fn lagging_subscriber_gets_one_coalesced_event() {
        let notifier = ScheduleNotifier::new(2, 4);
        let mut slow = notifier.subscribe().unwrap();

        for _ in 0..5 {
            notifier.publish(ScheduleEvent::updated(Uuid::new_v4()));
        }

        assert_eq!(slow.recv().await, Some(ScheduleEvent::coalesced()));

        let id = Uuid::new_v4();
        notifier.publish(ScheduleEvent::updated(id));
        assert_eq!(slow.recv().await, Some(ScheduleEvent::updated(id)));
    }
}
