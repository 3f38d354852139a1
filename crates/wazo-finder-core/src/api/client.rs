//! reqwest client for the Wazo confd API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ConfdApi, Connector, CONFD_PREFIX};
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::model::{Collection, DeviceDetail, DeviceSummary, EntityId, Line, User};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const AUTH_HEADER: &str = "x-auth-token";

/// One confd operation, mapped onto its HTTP method, path and query.
#[derive(Debug, Clone, Copy)]
enum Route<'a> {
    SearchDevices(&'a str),
    GetDevice(&'a EntityId),
    ListLines,
    ListUsers,
    LinkLineDevice(&'a EntityId, &'a EntityId),
    UnlinkLineDevice(&'a EntityId, &'a EntityId),
    DeleteDevice(&'a EntityId),
    DeleteLine(&'a EntityId),
    DeleteUser(&'a str),
}

impl<'a> Route<'a> {
    fn method(&self) -> Method {
        match self {
            Route::SearchDevices(_) | Route::GetDevice(_) | Route::ListLines | Route::ListUsers => {
                Method::GET
            }
            Route::LinkLineDevice(..) => Method::PUT,
            Route::UnlinkLineDevice(..)
            | Route::DeleteDevice(_)
            | Route::DeleteLine(_)
            | Route::DeleteUser(_) => Method::DELETE,
        }
    }

    /// Path below the confd prefix.
    fn path(&self) -> String {
        match self {
            Route::SearchDevices(_) => "/devices".to_string(),
            Route::GetDevice(id) | Route::DeleteDevice(id) => format!("/devices/{}", id),
            Route::ListLines => "/lines".to_string(),
            Route::ListUsers => "/users".to_string(),
            Route::LinkLineDevice(line, device) | Route::UnlinkLineDevice(line, device) => {
                format!("/lines/{}/devices/{}", line, device)
            }
            Route::DeleteLine(id) => format!("/lines/{}", id),
            Route::DeleteUser(uuid) => format!("/users/{}", uuid),
        }
    }

    fn query(&self) -> Vec<(&'static str, &'a str)> {
        match self {
            Route::SearchDevices(mac) => vec![("search", *mac)],
            _ => Vec::new(),
        }
    }
}

/// HTTP client bound to a single Wazo server.
pub struct WazoClient {
    base_url: String,
    token: HeaderValue,
    client: Client,
}

impl WazoClient {
    pub fn new(host: &str, token: &str, insecure: bool, timeout: Duration) -> Result<Self, ApiError> {
        let mut token = HeaderValue::from_str(token)
            .map_err(|e| ApiError::Client(format!("Invalid token: {}", e)))?;
        token.set_sensitive(true);

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            base_url: host.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, CONFD_PREFIX, endpoint)
    }

    /// Build the request for `route` with auth and JSON headers attached.
    fn build_request(&self, route: Route<'_>) -> Result<Request, ApiError> {
        let url = self.url(&route.path());
        self.client
            .request(route.method(), &url)
            .header(AUTH_HEADER, self.token.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .query(&route.query())
            .build()
            .map_err(|e| ApiError::Request {
                url,
                message: e.to_string(),
            })
    }

    /// Send a request and return the JSON body, or `None` for an empty reply.
    async fn execute(&self, route: Route<'_>) -> Result<Option<Value>, ApiError> {
        let request = self.build_request(route)?;
        let url = request.url().to_string();
        tracing::debug!("Making {} request to {}", request.method(), url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ApiError::Request {
            url: url.clone(),
            message: e.to_string(),
        })?;

        decode_response(&url, status, &body)
    }

    async fn get<T: DeserializeOwned>(&self, route: Route<'_>) -> Result<T, ApiError> {
        let value = self
            .execute(route)
            .await?
            .unwrap_or(Value::Object(Default::default()));
        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            url: self.url(&route.path()),
            message: e.to_string(),
        })
    }

    async fn send(&self, route: Route<'_>) -> Result<(), ApiError> {
        self.execute(route).await.map(|_| ())
    }
}

/// Map an HTTP reply onto the API error model.
///
/// Non-2xx is an error; 204 and empty bodies are success with no content.
fn decode_response(url: &str, status: StatusCode, body: &[u8]) -> Result<Option<Value>, ApiError> {
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).trim().to_string(),
        });
    }

    if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
}

#[async_trait]
impl ConfdApi for WazoClient {
    async fn search_devices(&self, mac: &str) -> Result<Collection<DeviceSummary>, ApiError> {
        tracing::info!("Searching for device with MAC: {}", mac);
        self.get(Route::SearchDevices(mac)).await
    }

    async fn get_device(&self, device_id: &EntityId) -> Result<DeviceDetail, ApiError> {
        tracing::info!("Fetching complete details for device ID: {}", device_id);
        self.get(Route::GetDevice(device_id)).await
    }

    async fn list_lines(&self) -> Result<Vec<Line>, ApiError> {
        let lines: Collection<Line> = self.get(Route::ListLines).await?;
        Ok(lines.items)
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users: Collection<User> = self.get(Route::ListUsers).await?;
        Ok(users.items)
    }

    async fn link_line_device(
        &self,
        line_id: &EntityId,
        device_id: &EntityId,
    ) -> Result<(), ApiError> {
        tracing::info!("Linking line {} with device {}", line_id, device_id);
        self.send(Route::LinkLineDevice(line_id, device_id)).await
    }

    async fn unlink_line_device(
        &self,
        line_id: &EntityId,
        device_id: &EntityId,
    ) -> Result<(), ApiError> {
        tracing::info!("Dissociating device {} from line {}", device_id, line_id);
        self.send(Route::UnlinkLineDevice(line_id, device_id)).await
    }

    async fn delete_device(&self, device_id: &EntityId) -> Result<(), ApiError> {
        tracing::info!("Deleting device {}", device_id);
        self.send(Route::DeleteDevice(device_id)).await
    }

    async fn delete_line(&self, line_id: &EntityId) -> Result<(), ApiError> {
        tracing::info!("Deleting line {}", line_id);
        self.send(Route::DeleteLine(line_id)).await
    }

    async fn delete_user(&self, user_uuid: &str) -> Result<(), ApiError> {
        tracing::info!("Deleting user {}", user_uuid);
        self.send(Route::DeleteUser(user_uuid)).await
    }
}

/// Connector producing a `WazoClient` per server.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    pub insecure: bool,
    pub timeout: Duration,
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Connector for HttpConnector {
    fn connect(&self, server: &ServerConfig) -> Result<Box<dyn ConfdApi>, ApiError> {
        let client = WazoClient::new(&server.host, &server.token, self.insecure, self.timeout)?;
        Ok(Box::new(client))
    }
}
