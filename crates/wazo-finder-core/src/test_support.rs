//! In-memory fakes for the API, connector, reporter and prompt.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::{ConfdApi, Connector};
use crate::config::ServerConfig;
use crate::error::{ApiError, PromptError};
use crate::model::{Collection, Device, DeviceDetail, DeviceSummary, EntityId, Line, User};
use crate::report::{Confirm, Reporter};

#[derive(Default)]
struct FakeState {
    search: Option<Value>,
    detail: Option<Value>,
    lines: Vec<Value>,
    users: Vec<Value>,
    failing: Vec<String>,
    forget_on_link: bool,
    calls: Vec<String>,
}

/// Confd server backed by canned JSON; clones share state.
#[derive(Clone, Default)]
pub struct FakeConfd {
    state: Arc<Mutex<FakeState>>,
}

impl FakeConfd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, value: Value) -> Self {
        self.state.lock().unwrap().search = Some(value);
        self
    }

    pub fn with_detail(self, value: Value) -> Self {
        self.state.lock().unwrap().detail = Some(value);
        self
    }

    pub fn with_lines(self, value: Value) -> Self {
        self.state.lock().unwrap().lines = as_array(value);
        self
    }

    pub fn with_users(self, value: Value) -> Self {
        self.state.lock().unwrap().users = as_array(value);
        self
    }

    /// Make the named operation answer with HTTP 500.
    pub fn failing_on(self, operation: &str) -> Self {
        self.state.lock().unwrap().failing.push(operation.to_string());
        self
    }

    /// Make the device disappear from search once a link is created.
    pub fn forgetting_on_link(self) -> Self {
        self.state.lock().unwrap().forget_on_link = true;
        self
    }

    /// Device found by MAC with a label but not linked to any line.
    pub fn unlinked_device(id: &str) -> Self {
        Self::new()
            .with_search(json!({"items": [{"id": id}], "total": 1}))
            .with_detail(json!({"label": "Phone1"}))
            .with_lines(json!([{"id": 10, "extensions": [{"exten": "1000"}]}]))
            .with_users(json!([]))
    }

    /// Device found by MAC and linked to line 7 / extension 1001.
    pub fn linked_device(id: &str) -> Self {
        Self::new()
            .with_search(json!({"items": [{"id": id}], "total": 1}))
            .with_detail(json!({"label": "Phone1"}))
            .with_lines(json!([{"id": 7, "device_id": id, "extensions": [{"exten": "1001"}]}]))
            .with_users(json!([{"uuid": "u-1", "firstname": "Jane", "lastname": "Doe", "lines": [{"id": 7}]}]))
    }

    pub fn not_found() -> Self {
        Self::new().with_search(json!({"items": [], "total": 0}))
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, operation: &str, call: String) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.iter().any(|f| f == operation) {
            return Err(ApiError::Status {
                url: format!("fake://{}", operation),
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            url: "fake://".to_string(),
            message: e.to_string(),
        })
    }
}

fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

#[async_trait]
impl ConfdApi for FakeConfd {
    async fn search_devices(&self, mac: &str) -> Result<Collection<DeviceSummary>, ApiError> {
        self.record("search", format!("search {}", mac))?;
        let value = self.state.lock().unwrap().search.clone();
        Self::decode(value.unwrap_or_else(|| json!({"items": [], "total": 0})))
    }

    async fn get_device(&self, device_id: &EntityId) -> Result<DeviceDetail, ApiError> {
        self.record("get_device", format!("get_device {}", device_id))?;
        let value = self.state.lock().unwrap().detail.clone();
        Self::decode(value.unwrap_or_else(|| json!({})))
    }

    async fn list_lines(&self) -> Result<Vec<Line>, ApiError> {
        self.record("list_lines", "list_lines".to_string())?;
        let lines = self.state.lock().unwrap().lines.clone();
        Self::decode(Value::Array(lines))
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.record("list_users", "list_users".to_string())?;
        let users = self.state.lock().unwrap().users.clone();
        Self::decode(Value::Array(users))
    }

    async fn link_line_device(
        &self,
        line_id: &EntityId,
        device_id: &EntityId,
    ) -> Result<(), ApiError> {
        self.record("link", format!("link {} {}", line_id, device_id))?;
        let mut state = self.state.lock().unwrap();
        if state.forget_on_link {
            state.search = Some(json!({"items": [], "total": 0}));
        }
        for line in state.lines.iter_mut() {
            let matches = Self::decode::<EntityId>(line["id"].clone())
                .map(|id| &id == line_id)
                .unwrap_or(false);
            if matches {
                line["device_id"] = json!(device_id.as_str());
            }
        }
        Ok(())
    }

    async fn unlink_line_device(
        &self,
        line_id: &EntityId,
        device_id: &EntityId,
    ) -> Result<(), ApiError> {
        self.record("unlink", format!("unlink {} {}", line_id, device_id))
    }

    async fn delete_device(&self, device_id: &EntityId) -> Result<(), ApiError> {
        self.record("delete_device", format!("delete_device {}", device_id))
    }

    async fn delete_line(&self, line_id: &EntityId) -> Result<(), ApiError> {
        self.record("delete_line", format!("delete_line {}", line_id))
    }

    async fn delete_user(&self, user_uuid: &str) -> Result<(), ApiError> {
        self.record("delete_user", format!("delete_user {}", user_uuid))
    }
}

/// Connector handing out fakes by server name and recording connections.
#[derive(Default)]
pub struct FakeConnector {
    servers: HashMap<String, FakeConfd>,
    connected: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server(mut self, name: &str, api: FakeConfd) -> Self {
        self.servers.insert(name.to_string(), api);
        self
    }

    pub fn connected(&self) -> Vec<String> {
        self.connected.lock().unwrap().clone()
    }
}

impl Connector for FakeConnector {
    fn connect(&self, server: &ServerConfig) -> Result<Box<dyn ConfdApi>, ApiError> {
        self.connected.lock().unwrap().push(server.name.clone());
        self.servers
            .get(&server.name)
            .cloned()
            .map(|api| Box::new(api) as Box<dyn ConfdApi>)
            .ok_or_else(|| ApiError::Request {
                url: server.host.clone(),
                message: "connection refused".to_string(),
            })
    }
}

pub fn server(name: &str) -> ServerConfig {
    ServerConfig::new(format!("https://{}.example", name), "token", name)
}

/// Reporter that records each call as a short string.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn report_scanning(&self, server: &ServerConfig) {
        self.push(format!("scanning {}", server.name));
    }

    fn report_device(&self, device: &Device, server: &ServerConfig) {
        self.push(format!(
            "device {} on {}",
            device.id.as_ref().map(EntityId::as_str).unwrap_or("?"),
            server.name
        ));
    }

    fn report_not_found(&self, mac: &str) {
        self.push(format!("not_found {}", mac));
    }

    fn report_error(&self, message: &str) {
        self.push(format!("error {}", message));
    }

    fn report_server_error(&self, server: &ServerConfig, _error: &ApiError) {
        self.push(format!("server_error {}", server.name));
    }

    fn report_warning(&self, message: &str) {
        self.push(format!("warning {}", message));
    }

    fn report_info(&self, message: &str) {
        self.push(format!("info {}", message));
    }

    fn report_success(&self, message: &str) {
        self.push(format!("success {}", message));
    }
}

/// Prompt that always gives the same answer.
pub struct ScriptedConfirm {
    answer: Option<bool>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Some(answer),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Prompt whose input stream is already closed.
    pub fn closed() -> Self {
        Self {
            answer: None,
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, question: &str) -> Result<bool, PromptError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answer.ok_or(PromptError::Closed)
    }
}
