use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

pub mod feed;

pub use feed::{ChangeFeed, Collection, SubscriptionHandle};

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

// The events that can occur in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Inventory events
    ItemCreated(Uuid),
    ItemUpdated(Uuid),
    ItemDeleted(Uuid),
    StockEntryRecorded {
        item_id: Uuid,
        quantity: Decimal,
    },
    StockMovementRecorded {
        movement_id: Uuid,
        item_id: Uuid,
    },

    // Customer events
    CustomerCreated(Uuid),
    CustomerUpdated(Uuid),
    CustomerDeleted(Uuid),

    // Cash register events
    CashSessionOpened(Uuid),
    CashSessionClosed(Uuid),

    // Sale events
    SaleCompleted {
        sale_id: Uuid,
        total: Decimal,
    },

    // Logistics events
    StopCreated(Uuid),
    RouteAssigned {
        driver_id: Uuid,
        stops: usize,
    },
    StopCompleted {
        driver_id: Uuid,
        stop_id: Uuid,
    },
}

impl Event {
    /// The collection a live subscriber would watch to see this event.
    pub fn collection(&self) -> Collection {
        match self {
            Event::ItemCreated(_)
            | Event::ItemUpdated(_)
            | Event::ItemDeleted(_)
            | Event::StockEntryRecorded { .. } => Collection::Inventory,
            Event::StockMovementRecorded { .. } => Collection::StockMovements,
            Event::CustomerCreated(_) | Event::CustomerUpdated(_) | Event::CustomerDeleted(_) => {
                Collection::Customers
            }
            Event::CashSessionOpened(_) | Event::CashSessionClosed(_) => Collection::CashSessions,
            Event::SaleCompleted { .. } => Collection::Sales,
            Event::StopCreated(_) | Event::RouteAssigned { .. } | Event::StopCompleted { .. } => {
                Collection::Logistics
            }
        }
    }
}

/// Drains the event channel, logging each event and fanning it out to live
/// feed subscribers. Runs until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>, feed: Arc<ChangeFeed>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        debug!("Received event: {:?}", event);

        match &event {
            Event::SaleCompleted { sale_id, total } => {
                info!("Sale {} completed for {}", sale_id, total);
            }
            Event::StockMovementRecorded {
                movement_id,
                item_id,
            } => {
                info!(
                    "Stock movement {} recorded for item {}",
                    movement_id, item_id
                );
            }
            Event::RouteAssigned { driver_id, stops } => {
                info!("Route with {} stops assigned to driver {}", stops, driver_id);
            }
            _ => {}
        }

        feed.publish(&event);
    }

    info!("Event processing loop stopped");
}
