//! Listing invalidation bus
//!
//! Every successful mutation publishes the collection path it touched
//! (`/categories`, `/products`, ...) so cached listing views can refetch.
//! Built on `tokio::sync::broadcast`: publishing is fire-and-forget and
//! never blocks the mutation that triggered it.
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = ListingBus::new(256);
//! let mut rx = bus.subscribe();
//!
//! bus.revalidate("/categories");
//!
//! if let Ok(event) = rx.recv().await {
//!     assert_eq!(event.path, "/categories");
//! }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A listing-changed notification; carries only the collection path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEvent {
    pub path: String,
}

/// Broadcast channel for listing invalidations
#[derive(Clone)]
pub struct ListingBus {
    tx: broadcast::Sender<ListingEvent>,
}

impl ListingBus {
    /// Create a bus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to listing-changed events
    pub fn subscribe(&self) -> broadcast::Receiver<ListingEvent> {
        self.tx.subscribe()
    }

    /// Publish a listing-changed event for a collection path
    ///
    /// Fire-and-forget: an error only means nobody is subscribed.
    pub fn revalidate(&self, path: &str) {
        let event = ListingEvent {
            path: path.to_string(),
        };
        if self.tx.send(event).is_err() {
            tracing::debug!(path, "listing event dropped, no subscribers");
        }
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ListingBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_and_receive() {
        let bus = ListingBus::new(16);
        let mut rx = bus.subscribe();

        bus.revalidate("/categories");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "/categories");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let bus = ListingBus::new(16);
        // Must not panic or block
        bus.revalidate("/products");
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_all_notified() {
        let bus = ListingBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.revalidate("/stores");

        assert_eq!(rx1.recv().await.unwrap().path, "/stores");
        assert_eq!(rx2.recv().await.unwrap().path, "/stores");
    }
}
