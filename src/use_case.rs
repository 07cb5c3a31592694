use crate::bus::{DetailsEvent, EventBus};
use crate::cache::DetailsCache;
use crate::error::PokemonDetailsError;
use crate::repository::PokemonRepository;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Gets the details of one Pokémon, from the cache when possible, and publishes the outcome
/// on the bus. One attempt per run; failures are never cached.
pub struct GetPokemonDetailsUseCase {
    id: String,
    repository: Arc<dyn PokemonRepository>,
    cache: Arc<dyn DetailsCache>,
    bus: EventBus,
}

impl GetPokemonDetailsUseCase {
    pub fn new(
        id: impl Into<String>,
        repository: Arc<dyn PokemonRepository>,
        cache: Arc<dyn DetailsCache>,
        bus: EventBus,
    ) -> Self {
        Self {
            id: id.into(),
            repository,
            cache,
            bus,
        }
    }

    pub async fn run(self) {
        if let Some(details) = self.cache.get(&self.id) {
            tracing::debug!("Cache hit for Pokémon ID: {}", self.id);
            self.bus.publish(DetailsEvent::Received(details));
            return;
        }

        tracing::debug!("Cache miss for Pokémon ID: {}, fetching from API", self.id);

        match self.repository.fetch_details(&self.id).await {
            Ok(details) => {
                tracing::debug!("Successfully fetched details for Pokémon ID: {}", self.id);
                self.cache.put(self.id.clone(), details.clone());
                self.bus.publish(DetailsEvent::Received(details));
            }
            Err(e) => {
                tracing::error!("Failed to fetch details for Pokémon ID {}: {}", self.id, e);
                self.bus.publish(DetailsEvent::Error(e));
            }
        }
    }

    // Without a runtime the failure is published instead of panicking
    pub fn execute(self) -> Option<JoinHandle<()>> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => Some(handle.spawn(self.run())),
            Err(e) => {
                tracing::error!("No runtime to fetch Pokémon ID {} on: {}", self.id, e);
                self.bus.publish(DetailsEvent::Error(PokemonDetailsError::other(
                    e.to_string(),
                )));
                None
            }
        }
    }
}
