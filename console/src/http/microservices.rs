//! Microservice API client

use async_trait::async_trait;
use console_api::{ActionAck, Microservice, MicroserviceCode, MicroserviceRequest};
use reqwest::{header, Method};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::dispatch::action::ActionKind;
use crate::errors::ConsoleError;
use crate::http::backend::ConsoleBackend;
use crate::http::client::{HttpClient, RawResponse};
use crate::invoke::request::InvocationRequest;

const MICROSERVICES: &str = "microservices";

#[async_trait]
impl ConsoleBackend for HttpClient {
    async fn list_microservices(&self) -> Result<Vec<Microservice>, ConsoleError> {
        self.get(&[MICROSERVICES]).await
    }

    async fn fetch_code(&self, id: &str) -> Result<MicroserviceCode, ConsoleError> {
        self.get(&[MICROSERVICES, id, "code"]).await
    }

    async fn create_microservice(
        &self,
        request: &MicroserviceRequest,
    ) -> Result<Microservice, ConsoleError> {
        self.post(&[MICROSERVICES], request).await
    }

    async fn update_microservice(
        &self,
        id: &str,
        request: &MicroserviceRequest,
    ) -> Result<Microservice, ConsoleError> {
        self.put(&[MICROSERVICES, id], request).await
    }

    async fn run_action(&self, id: &str, action: ActionKind) -> Result<ActionAck, ConsoleError> {
        let body = match action {
            ActionKind::Delete => self.send_empty(Method::DELETE, &[MICROSERVICES, id]).await?,
            ActionKind::Restart | ActionKind::Stop => {
                self.send_empty(Method::POST, &[MICROSERVICES, id, action.as_str()])
                    .await?
            }
        };

        // Acks are informational; tolerate empty or non-JSON bodies
        let ack = serde_json::from_str::<ActionAck>(&body).unwrap_or_else(|_| ActionAck {
            ok: true,
            message: None,
        });
        Ok(ack)
    }

    async fn invoke(&self, request: &InvocationRequest) -> Result<RawResponse, ConsoleError> {
        debug!("POST {} (test invocation)", request.endpoint);

        let mut builder = self
            .inner()
            .post(request.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request.envelope);

        if let Some(authorization) = &request.authorization {
            builder = builder.header(header::AUTHORIZATION, authorization.expose_secret());
        }

        self.send_raw(builder).await
    }
}
