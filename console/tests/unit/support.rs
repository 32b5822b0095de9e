//! In-memory backend shared by the integration tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use console_api::{
    ActionAck, Language, Microservice, MicroserviceCode, MicroserviceRequest, MicroserviceStatus,
};
use msconsole::dispatch::action::ActionKind;
use msconsole::errors::ConsoleError;
use msconsole::http::backend::ConsoleBackend;
use msconsole::http::client::RawResponse;
use msconsole::invoke::request::InvocationRequest;

pub fn microservice(id: &str, status: MicroserviceStatus, is_roble: bool) -> Microservice {
    Microservice {
        id: id.to_string(),
        name: id.to_string(),
        language: Language::Python,
        status,
        endpoint: format!("http://localhost:8000/{}", id),
        is_roble,
        code: None,
        created_at: "2025-01-01T00:00:00".to_string(),
    }
}

#[derive(Default)]
struct FakeState {
    microservices: Vec<Microservice>,
    codes: HashMap<String, MicroserviceCode>,
    list_calls: usize,
    fetch_code_calls: usize,
    created: Vec<MicroserviceRequest>,
    updated: Vec<(String, MicroserviceRequest)>,
    actions: Vec<(String, ActionKind)>,
    invocations: Vec<InvocationRequest>,
    fail_list: bool,
    fail_actions: Option<String>,
    invoke_response: Option<RawResponse>,
}

/// Backend double that applies actions to its own list and counts requests
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn with(microservices: Vec<Microservice>) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().microservices = microservices;
        backend
    }

    pub fn add_code(&self, id: &str, code: &str, is_roble: bool) {
        self.state.lock().unwrap().codes.insert(
            id.to_string(),
            MicroserviceCode {
                name: id.to_string(),
                code: code.to_string(),
                is_roble,
                language: Some(Language::Python),
            },
        );
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn set_fail_actions(&self, message: Option<&str>) {
        self.state.lock().unwrap().fail_actions = message.map(str::to_string);
    }

    pub fn set_invoke_response(&self, status: u16, body: &str) {
        self.state.lock().unwrap().invoke_response = Some(RawResponse {
            status,
            body: body.to_string(),
        });
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn fetch_code_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_code_calls
    }

    pub fn created(&self) -> Vec<MicroserviceRequest> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn updated(&self) -> Vec<(String, MicroserviceRequest)> {
        self.state.lock().unwrap().updated.clone()
    }

    pub fn actions(&self) -> Vec<(String, ActionKind)> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn invocations(&self) -> Vec<InvocationRequest> {
        self.state.lock().unwrap().invocations.clone()
    }
}

#[async_trait]
impl ConsoleBackend for FakeBackend {
    async fn list_microservices(&self) -> Result<Vec<Microservice>, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if state.fail_list {
            return Err(ConsoleError::Backend {
                status: 500,
                message: "Status: 500".to_string(),
            });
        }
        Ok(state.microservices.clone())
    }

    async fn fetch_code(&self, id: &str) -> Result<MicroserviceCode, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        state.fetch_code_calls += 1;
        state
            .codes
            .get(id)
            .cloned()
            .ok_or_else(|| ConsoleError::Backend {
                status: 404,
                message: "Microservice not found".to_string(),
            })
    }

    async fn create_microservice(
        &self,
        request: &MicroserviceRequest,
    ) -> Result<Microservice, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        state.created.push(request.clone());
        let mut created = microservice(&request.name, MicroserviceStatus::Running, request.is_roble);
        created.code = Some(request.code.clone());
        state.microservices.push(created.clone());
        Ok(created)
    }

    async fn update_microservice(
        &self,
        id: &str,
        request: &MicroserviceRequest,
    ) -> Result<Microservice, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        state.updated.push((id.to_string(), request.clone()));
        let entry = state
            .microservices
            .iter_mut()
            .find(|ms| ms.id == id)
            .ok_or_else(|| ConsoleError::Backend {
                status: 404,
                message: "Microservice not found".to_string(),
            })?;
        entry.name = request.name.clone();
        entry.is_roble = request.is_roble;
        entry.code = Some(request.code.clone());
        Ok(entry.clone())
    }

    async fn run_action(&self, id: &str, action: ActionKind) -> Result<ActionAck, ConsoleError> {
        // Suspend like a real request so concurrent dispatches interleave
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        state.actions.push((id.to_string(), action));
        if let Some(message) = state.fail_actions.clone() {
            return Err(ConsoleError::Backend {
                status: 500,
                message,
            });
        }
        match action {
            ActionKind::Delete => state.microservices.retain(|ms| ms.id != id),
            ActionKind::Restart | ActionKind::Stop => {
                let status = if action == ActionKind::Restart {
                    MicroserviceStatus::Running
                } else {
                    MicroserviceStatus::Stopped
                };
                if let Some(entry) = state.microservices.iter_mut().find(|ms| ms.id == id) {
                    entry.status = status;
                }
            }
        }
        Ok(ActionAck {
            ok: true,
            message: Some(format!("{} {}", action, id)),
        })
    }

    async fn invoke(&self, request: &InvocationRequest) -> Result<RawResponse, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        state.invocations.push(request.clone());
        Ok(state.invoke_response.clone().unwrap_or(RawResponse {
            status: 200,
            body: "{}".to_string(),
        }))
    }
}
