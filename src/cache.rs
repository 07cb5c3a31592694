use crate::models::PokemonDetails;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// Keyed store for details that were already fetched
pub trait DetailsCache: Send + Sync {
    fn get(&self, id: &str) -> Option<PokemonDetails>;
    fn put(&self, id: String, details: PokemonDetails);
}

// Unbounded in-memory cache. Entries live as long as the instance does.
#[derive(Default, Clone)]
pub struct InMemoryDetailsCache {
    store: Arc<Mutex<HashMap<String, PokemonDetails>>>,
}

impl InMemoryDetailsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        match self.store.lock() {
            Ok(store) => store.len(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, id: &str) -> bool {
        match self.store.lock() {
            Ok(store) => store.contains_key(id),
            Err(_) => false,
        }
    }
}

impl DetailsCache for InMemoryDetailsCache {
    fn get(&self, id: &str) -> Option<PokemonDetails> {
        match self.store.lock() {
            Ok(store) => {
                let result = store.get(id).cloned();
                if result.is_some() {
                    tracing::debug!("Cache hit for Pokémon ID: {}", id);
                } else {
                    tracing::debug!("Cache miss for Pokémon ID: {}", id);
                }
                result
            }
            Err(e) => {
                tracing::error!("Failed to acquire cache read lock for key {}: {}", id, e);
                None
            }
        }
    }

    fn put(&self, id: String, details: PokemonDetails) {
        match self.store.lock() {
            Ok(mut store) => {
                let was_present = store.insert(id.clone(), details).is_some();
                if was_present {
                    tracing::debug!("Updated existing Pokémon details in cache: {}", id);
                } else {
                    tracing::debug!("Inserted new Pokémon details into cache: {}", id);
                }
            }
            Err(e) => {
                tracing::error!("Failed to acquire cache write lock for key {}: {}", id, e);
            }
        }
    }
}
