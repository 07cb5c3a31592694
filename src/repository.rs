use crate::config::PokemonConfig;
use crate::error::PokemonDetailsError;
use crate::models::PokemonDetails;
use crate::pokemon::PokemonResponse;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn fetch_details(&self, id: &str) -> Result<PokemonDetails, PokemonDetailsError>;
}

pub struct HttpPokemonRepository {
    client: reqwest::Client,
    api_url: String,
}

impl HttpPokemonRepository {
    pub fn new(config: &PokemonConfig) -> Result<Self, PokemonDetailsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout as u64))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                PokemonDetailsError::other(e.to_string())
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}

// Connectivity problems are network errors, everything else is not
fn classify(err: reqwest::Error) -> PokemonDetailsError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        PokemonDetailsError::network(err.to_string())
    } else {
        PokemonDetailsError::other(err.to_string())
    }
}

#[async_trait]
impl PokemonRepository for HttpPokemonRepository {
    async fn fetch_details(&self, id: &str) -> Result<PokemonDetails, PokemonDetailsError> {
        let url = format!("{}/pokemon/{}", self.api_url, id);
        tracing::debug!("Fetching Pokemon details from URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to make HTTP request to {}: {}", url, e);
            classify(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_msg = format!("API request failed with status: {}", status);
            tracing::error!("{}", error_msg);
            return Err(PokemonDetailsError::other(error_msg));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            classify(e)
        })?;

        let body = serde_json::from_slice::<PokemonResponse>(&bytes).map_err(|e| {
            tracing::error!("Failed to parse JSON response from {}: {}", url, e);
            PokemonDetailsError::other(format!("JSON parsing failed: {}", e))
        })?;

        let details = body.into_details().inspect_err(|e| {
            tracing::error!("Malformed details response from {}: {}", url, e);
        })?;

        tracing::debug!("Successfully fetched details for Pokemon ID: {}", details.id());
        Ok(details)
    }
}
