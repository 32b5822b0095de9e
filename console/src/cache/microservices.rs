//! Read-through cache of the backend's microservices

use std::sync::{Arc, RwLock};

use console_api::{Microservice, MicroserviceCode};
use tracing::{debug, warn};

use crate::errors::ConsoleError;
use crate::http::backend::ConsoleBackend;

#[derive(Debug, Default)]
struct CacheState {
    entries: Arc<Vec<Microservice>>,
    generation: u64,
    last_error: Option<String>,
}

/// In-memory copy of the last successful listing.
///
/// The list is only ever replaced wholesale by [`list`](Self::list); a failed
/// fetch leaves the previous list in place.
pub struct MicroserviceCache {
    backend: Arc<dyn ConsoleBackend>,
    state: RwLock<CacheState>,
}

impl MicroserviceCache {
    /// Create an empty cache over `backend`
    pub fn new(backend: Arc<dyn ConsoleBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Refetch the listing from the backend and replace the cached copy
    pub async fn list(&self) -> Result<Arc<Vec<Microservice>>, ConsoleError> {
        match self.backend.list_microservices().await {
            Ok(microservices) => {
                let entries = Arc::new(microservices);
                let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
                state.entries = entries.clone();
                state.generation += 1;
                state.last_error = None;
                debug!(
                    "Cached {} microservices (generation {})",
                    entries.len(),
                    state.generation
                );
                Ok(entries)
            }
            Err(e) => {
                warn!("Failed to list microservices, keeping previous list: {}", e);
                let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch code for the editor; does not touch the cached list
    pub async fn fetch_code(&self, id: &str) -> Result<MicroserviceCode, ConsoleError> {
        self.backend.fetch_code(id).await
    }

    /// The last successful listing
    pub fn snapshot(&self) -> Arc<Vec<Microservice>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.entries.clone()
    }

    /// The cached copy of one microservice
    pub fn get(&self, id: &str) -> Option<Microservice> {
        self.snapshot().iter().find(|ms| ms.id == id).cloned()
    }

    /// Microservices that can currently be invoked
    pub fn running(&self) -> Vec<Microservice> {
        self.snapshot()
            .iter()
            .filter(|ms| ms.status.is_running())
            .cloned()
            .collect()
    }

    /// Number of successful refetches so far
    pub fn generation(&self) -> u64 {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.generation
    }

    /// Message of the most recent failed refetch, cleared by the next success
    pub fn last_error(&self) -> Option<String> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.last_error.clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
