//! Cache-invalidation events.
//!
//! Stores publish an event after every successful mutation; list views
//! subscribe and re-fetch their current page. The bus deliberately carries
//! no entity data — consumers always go back to the server.

use tokio::sync::broadcast;

/// Mutation kind that triggered an invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOp {
    Created,
    Updated,
    Deleted,
}

impl std::fmt::Display for ResourceOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// One invalidation: which resource changed, how, and which entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEvent {
    pub resource: &'static str,
    pub op: ResourceOp,
    pub id: Option<String>,
}

/// Broadcast bus for [`ResourceEvent`]s.
#[derive(Debug, Clone)]
pub struct InvalidationBus {
    tx: broadcast::Sender<ResourceEvent>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ResourceEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. A bus nobody listens to is not an error.
    pub fn publish(&self, event: ResourceEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}
