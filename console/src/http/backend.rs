//! Backend contract used by the console components

use async_trait::async_trait;
use console_api::{ActionAck, Microservice, MicroserviceCode, MicroserviceRequest};

use crate::dispatch::action::ActionKind;
use crate::errors::ConsoleError;
use crate::http::client::RawResponse;
use crate::invoke::request::InvocationRequest;

/// Everything the console asks of the orchestration backend.
///
/// Implemented by [`HttpClient`](crate::http::client::HttpClient); tests
/// substitute an in-memory fake.
#[async_trait]
pub trait ConsoleBackend: Send + Sync {
    /// List all microservices
    async fn list_microservices(&self) -> Result<Vec<Microservice>, ConsoleError>;

    /// Fetch name, code and capability flag for editing
    async fn fetch_code(&self, id: &str) -> Result<MicroserviceCode, ConsoleError>;

    /// Create a microservice
    async fn create_microservice(
        &self,
        request: &MicroserviceRequest,
    ) -> Result<Microservice, ConsoleError>;

    /// Replace the code and configuration of a microservice
    async fn update_microservice(
        &self,
        id: &str,
        request: &MicroserviceRequest,
    ) -> Result<Microservice, ConsoleError>;

    /// Issue a lifecycle action
    async fn run_action(&self, id: &str, action: ActionKind) -> Result<ActionAck, ConsoleError>;

    /// Send a test invocation; non-success statuses are returned, not raised
    async fn invoke(&self, request: &InvocationRequest) -> Result<RawResponse, ConsoleError>;
}
