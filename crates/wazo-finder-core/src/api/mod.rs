//! Wazo confd API access.
//!
//! `ConfdApi` is the seam between the finder logic and HTTP; `WazoClient` is
//! the reqwest-backed implementation.

pub mod client;

pub use client::{HttpConnector, WazoClient};

use async_trait::async_trait;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::model::{Collection, DeviceDetail, DeviceSummary, EntityId, Line, User};

/// Base path of the confd REST API.
pub const CONFD_PREFIX: &str = "/api/confd/1.1";

/// Operations consumed from a Wazo confd server.
#[async_trait]
pub trait ConfdApi: Send + Sync {
    /// `GET /devices?search=<mac>`
    async fn search_devices(&self, mac: &str) -> Result<Collection<DeviceSummary>, ApiError>;

    /// `GET /devices/{id}`
    async fn get_device(&self, device_id: &EntityId) -> Result<DeviceDetail, ApiError>;

    /// `GET /lines`
    async fn list_lines(&self) -> Result<Vec<Line>, ApiError>;

    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `PUT /lines/{line_id}/devices/{device_id}`
    async fn link_line_device(&self, line_id: &EntityId, device_id: &EntityId)
        -> Result<(), ApiError>;

    /// `DELETE /lines/{line_id}/devices/{device_id}`
    async fn unlink_line_device(
        &self,
        line_id: &EntityId,
        device_id: &EntityId,
    ) -> Result<(), ApiError>;

    /// `DELETE /devices/{id}`
    async fn delete_device(&self, device_id: &EntityId) -> Result<(), ApiError>;

    /// `DELETE /lines/{id}`
    async fn delete_line(&self, line_id: &EntityId) -> Result<(), ApiError>;

    /// `DELETE /users/{uuid}`
    async fn delete_user(&self, user_uuid: &str) -> Result<(), ApiError>;
}

/// Builds one independent API client per server.
pub trait Connector: Send + Sync {
    fn connect(&self, server: &ServerConfig) -> Result<Box<dyn ConfdApi>, ApiError>;
}
