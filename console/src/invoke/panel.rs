//! Test panel state and submission

use console_api::Microservice;
use secrecy::SecretString;
use tracing::{info, warn};

use crate::cache::microservices::MicroserviceCache;
use crate::errors::ConsoleError;
use crate::http::backend::ConsoleBackend;
use crate::invoke::report::InvocationReport;
use crate::invoke::request::{InvocationDraft, InvocationRequest};

/// The test view: a selected running microservice and the operator's inputs
#[derive(Debug, Default)]
pub struct TestPanel {
    selected: Option<String>,
    draft: InvocationDraft,
    last_report: Option<InvocationReport>,
}

impl TestPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Microservices offered for selection
    pub fn selectable(&self, cache: &MicroserviceCache) -> Vec<Microservice> {
        cache.running()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether the project and token fields apply to the current selection
    pub fn shows_roble_fields(&self, cache: &MicroserviceCache) -> bool {
        self.selected
            .as_deref()
            .and_then(|id| cache.get(id))
            .map(|ms| ms.is_roble)
            .unwrap_or(false)
    }

    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.draft.payload = payload.into();
    }

    pub fn set_project_id(&mut self, project_id: impl Into<String>) {
        self.draft.project_id = project_id.into();
    }

    pub fn set_token(&mut self, token: Option<SecretString>) {
        self.draft.token = token;
    }

    pub fn draft(&self) -> &InvocationDraft {
        &self.draft
    }

    pub fn last_report(&self) -> Option<&InvocationReport> {
        self.last_report.as_ref()
    }

    /// Validate and send the test call.
    ///
    /// Local validation failures are returned as errors and send nothing.
    /// Once a request is issued the outcome is always a report, whether the
    /// microservice answered with an error or did not answer at all.
    pub async fn submit(
        &mut self,
        cache: &MicroserviceCache,
        backend: &dyn ConsoleBackend,
    ) -> Result<InvocationReport, ConsoleError> {
        // Re-read so the capability flag and status are current
        let target = self.selected.as_deref().and_then(|id| cache.get(id));
        let request = InvocationRequest::build(&self.draft, target.as_ref())?;

        self.last_report = None;
        info!("Testing {} at {}", request.target_id, request.endpoint);

        let report = match backend.invoke(&request).await {
            Ok(response) => InvocationReport::from_response(&response),
            Err(e) => {
                warn!("Test call to {} failed: {}", request.target_id, e);
                InvocationReport::from_transport_error(&e)
            }
        };

        self.last_report = Some(report.clone());
        Ok(report)
    }
}
