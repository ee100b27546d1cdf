//! Live change feed. Subscribers watch a collection and receive every event
//! published to it; dropping the handle unsubscribes.

use super::Event;
use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::debug;

/// Logical groupings a subscriber can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Inventory,
    StockMovements,
    Customers,
    Sales,
    CashSessions,
    Logistics,
}

const ALL_COLLECTIONS: [Collection; 6] = [
    Collection::Inventory,
    Collection::StockMovements,
    Collection::Customers,
    Collection::Sales,
    Collection::CashSessions,
    Collection::Logistics,
];

/// Fan-out hub, one broadcast channel per collection. Cheap to share behind
/// an `Arc`; publishing to a collection with no subscribers is a no-op.
pub struct ChangeFeed {
    channels: HashMap<Collection, broadcast::Sender<Event>>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let channels = ALL_COLLECTIONS
            .iter()
            .map(|c| (*c, broadcast::channel(capacity).0))
            .collect();
        Self { channels }
    }

    /// Publishes an event to its collection's subscribers.
    pub fn publish(&self, event: &Event) {
        let collection = event.collection();
        if let Some(sender) = self.channels.get(&collection) {
            // Err means no live subscribers, which is fine
            let _ = sender.send(event.clone());
        }
    }

    /// Opens a subscription on `collection`. The returned handle stops
    /// receiving as soon as it is dropped.
    pub fn subscribe(&self, collection: Collection) -> SubscriptionHandle {
        let receiver = self
            .channels
            .get(&collection)
            .map(|sender| sender.subscribe())
            .unwrap_or_else(|| broadcast::channel(1).1);
        debug!("feed subscription opened on {:?}", collection);
        SubscriptionHandle {
            collection,
            receiver,
        }
    }

    /// Number of live subscribers on a collection.
    pub fn subscriber_count(&self, collection: Collection) -> usize {
        self.channels
            .get(&collection)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

/// An open feed subscription. Unsubscribes on drop.
pub struct SubscriptionHandle {
    collection: Collection,
    receiver: broadcast::Receiver<Event>,
}

impl SubscriptionHandle {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Waits for the next event on this subscription. Returns `None` once
    /// the feed is gone; a lagged subscriber skips to the oldest retained
    /// event rather than erroring out.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(
                        "feed subscriber on {:?} lagged, skipped {} events",
                        self.collection, skipped
                    );
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn subscriber_receives_only_its_collection() {
        let feed = ChangeFeed::new(8);
        let mut inventory = feed.subscribe(Collection::Inventory);

        let customer_id = Uuid::new_v4();
        let item_id = Uuid::new_v4();
        feed.publish(&Event::CustomerCreated(customer_id));
        feed.publish(&Event::ItemCreated(item_id));

        let received = inventory.next().await.unwrap();
        assert!(matches!(received, Event::ItemCreated(id) if id == item_id));
    }

    #[tokio::test]
    async fn dropping_handle_unsubscribes() {
        let feed = ChangeFeed::new(8);
        let handle = feed.subscribe(Collection::Sales);
        assert_eq!(feed.subscriber_count(Collection::Sales), 1);

        drop(handle);
        assert_eq!(feed.subscriber_count(Collection::Sales), 0);
    }

    #[tokio::test]
    async fn multiple_subscribers_each_get_the_event() {
        let feed = ChangeFeed::new(8);
        let mut a = feed.subscribe(Collection::Logistics);
        let mut b = feed.subscribe(Collection::Logistics);

        let stop_id = Uuid::new_v4();
        feed.publish(&Event::StopCreated(stop_id));

        assert!(matches!(a.next().await.unwrap(), Event::StopCreated(id) if id == stop_id));
        assert!(matches!(b.next().await.unwrap(), Event::StopCreated(id) if id == stop_id));
    }
}
