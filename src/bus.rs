use crate::error::PokemonDetailsError;
use crate::models::PokemonDetails;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum DetailsEvent {
    Received(PokemonDetails),
    Error(PokemonDetailsError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    NotRegistered(u64),
    LockError(String),
}

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusError::NotRegistered(id) => write!(f, "Subscriber {} is not registered", id),
            BusError::LockError(msg) => write!(f, "Bus lock error: {}", msg),
        }
    }
}

impl std::error::Error for BusError {}

/// Receiving end of one registration. Dropping it closes the channel.
pub struct Subscription {
    id: u64,
    receiver: mpsc::UnboundedReceiver<DetailsEvent>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn recv(&mut self) -> Option<DetailsEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<DetailsEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Publish/subscribe channel between use cases and presenters.
///
/// Clones share the same subscriber set. Events are delivered in publish order to every
/// subscriber registered at the time of publishing; with no subscribers they are dropped.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<BTreeMap<u64, mpsc::UnboundedSender<DetailsEvent>>>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> Result<Subscription, BusError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|e| BusError::LockError(e.to_string()))?;
        subscribers.insert(id, sender);
        tracing::debug!("Registered bus subscriber {}", id);

        Ok(Subscription { id, receiver })
    }

    pub fn unregister(&self, id: u64) -> Result<(), BusError> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|e| BusError::LockError(e.to_string()))?;
        match subscribers.remove(&id) {
            Some(_) => {
                tracing::debug!("Unregistered bus subscriber {}", id);
                Ok(())
            }
            None => Err(BusError::NotRegistered(id)),
        }
    }

    pub fn publish(&self, event: DetailsEvent) {
        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                if subscribers.is_empty() {
                    tracing::debug!("No subscribers, dropping event {:?}", event);
                    return;
                }
                // Subscribers whose receiver is gone are pruned
                subscribers.retain(|id, sender| {
                    let delivered = sender.send(event.clone()).is_ok();
                    if !delivered {
                        tracing::debug!("Pruning closed bus subscriber {}", id);
                    }
                    delivered
                });
            }
            Err(e) => {
                tracing::error!("Failed to acquire bus lock for publishing: {}", e);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        match self.subscribers.lock() {
            Ok(subscribers) => subscribers.len(),
            Err(_) => 0,
        }
    }
}
