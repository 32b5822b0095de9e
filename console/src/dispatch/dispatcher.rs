//! Per-entity serialized lifecycle actions with delayed reconciliation

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use console_api::ActionAck;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cache::microservices::MicroserviceCache;
use crate::dispatch::action::ActionKind;
use crate::dispatch::busy::{BusyGuard, BusySet, BusyView};
use crate::errors::ConsoleError;
use crate::http::backend::ConsoleBackend;

/// Dispatcher options
#[derive(Debug, Clone)]
pub struct DispatcherOptions {
    /// Wait after a successful action before re-listing
    pub settle_delay: Duration,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1500),
        }
    }
}

/// An accepted lifecycle action whose reconciliation is pending
#[derive(Debug)]
pub struct ActionTicket {
    /// Correlation id used in logs
    pub action_id: Uuid,
    pub id: String,
    pub action: ActionKind,
    pub ack: ActionAck,
    reconcile: JoinHandle<()>,
}

impl ActionTicket {
    /// Wait until the list was refetched and the busy mark cleared
    pub async fn settled(self) {
        if let Err(e) = self.reconcile.await {
            if !e.is_cancelled() {
                error!("Reconciliation for {} panicked: {}", self.id, e);
            }
        }
    }
}

/// Issues restart/stop/delete and keeps at most one in flight per id
pub struct ActionDispatcher {
    backend: Arc<dyn ConsoleBackend>,
    cache: Arc<MicroserviceCache>,
    busy: BusySet,
    options: DispatcherOptions,
    reconcilers: Arc<Mutex<HashMap<String, AbortHandle>>>,
}

impl ActionDispatcher {
    /// Create a new dispatcher
    pub fn new(
        backend: Arc<dyn ConsoleBackend>,
        cache: Arc<MicroserviceCache>,
        options: DispatcherOptions,
    ) -> Self {
        Self {
            backend,
            cache,
            busy: BusySet::new(),
            options,
            reconcilers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Read-only view of the busy ids
    pub fn busy(&self) -> BusyView {
        self.busy.view()
    }

    /// Dispatch `action` against `id`.
    ///
    /// Rejected locally when the id is unknown, busy, or the action is not
    /// offered for its cached status. On backend failure the busy mark is
    /// released at once; on success it is released by a reconciliation task
    /// after the settle delay and a refetch.
    pub async fn dispatch(&self, id: &str, action: ActionKind) -> Result<ActionTicket, ConsoleError> {
        let microservice = self
            .cache
            .get(id)
            .ok_or_else(|| ConsoleError::NotFound(format!("microservice '{}'", id)))?;

        let guard = self
            .busy
            .try_acquire(id)
            .ok_or_else(|| ConsoleError::Busy(id.to_string()))?;

        if !action.is_available(microservice.status) {
            return Err(ConsoleError::ActionUnavailable {
                id: id.to_string(),
                action: action.to_string(),
                status: microservice.status.to_string(),
            });
        }

        let action_id = Uuid::new_v4();
        info!("[{}] Sending '{}' to {}", action_id, action, id);

        // On error the guard drops here and the id is free again
        let ack = self.backend.run_action(id, action).await.map_err(|e| {
            error!("[{}] Action '{}' on {} failed: {}", action_id, action, id, e);
            e
        })?;

        let reconcile = self.schedule_reconcile(action_id, guard);

        Ok(ActionTicket {
            action_id,
            id: id.to_string(),
            action,
            ack,
            reconcile,
        })
    }

    fn schedule_reconcile(&self, action_id: Uuid, guard: BusyGuard) -> JoinHandle<()> {
        let cache = self.cache.clone();
        let settle_delay = self.options.settle_delay;
        let reconcilers = self.reconcilers.clone();
        let id = guard.id().to_string();

        // Held across spawn so the task cannot deregister before it is registered
        let mut registry = self.reconcilers.lock().unwrap_or_else(|e| e.into_inner());
        let handle = tokio::spawn(async move {
            tokio::time::sleep(settle_delay).await;
            debug!("[{}] Settle delay elapsed, refetching", action_id);
            if let Err(e) = cache.list().await {
                warn!("[{}] Refetch after action failed: {}", action_id, e);
            }
            reconcilers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(guard.id());
            drop(guard);
        });
        registry.insert(id, handle.abort_handle());
        handle
    }

    /// Number of reconciliations still waiting
    pub fn pending_reconciliations(&self) -> usize {
        let registry = self.reconcilers.lock().unwrap_or_else(|e| e.into_inner());
        registry.values().filter(|h| !h.is_finished()).count()
    }

    /// Abort pending reconciliations; their busy marks are released
    pub fn shutdown(&self) {
        let mut registry = self.reconcilers.lock().unwrap_or_else(|e| e.into_inner());
        for (id, handle) in registry.drain() {
            if !handle.is_finished() {
                info!("Aborting pending reconciliation for {}", id);
                handle.abort();
            }
        }
    }
}

impl Drop for ActionDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
