//! Sequential scan of configured servers with early exit and optional
//! force-link of unassociated devices.

use std::time::Duration;

use crate::api::{ConfdApi, Connector};
use crate::config::{ServerConfig, DEFAULT_FALLBACK_EXTEN};
use crate::error::{ApiError, CoreError};
use crate::mac;
use crate::model::Device;
use crate::report::{Confirm, Reporter};

use super::resolver::{find_line_by_exten, resolve_device};

/// Pause between a force-link and the re-check.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extension whose line is offered to unlinked devices.
    pub fallback_exten: String,
    pub settle_delay: Duration,
    /// Abort on the first API error instead of moving to the next server.
    pub fail_fast: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            fallback_exten: DEFAULT_FALLBACK_EXTEN.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            fail_fast: false,
        }
    }
}

/// Result of a scan that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Device found (and linked, if a force-link was accepted).
    Found { server: ServerConfig, device: Device },
    /// Device found without a line; the operator declined the force-link.
    LinkDeclined { server: ServerConfig, device: Device },
    /// No scanned server knows the MAC.
    NotFound,
}

impl ScanOutcome {
    pub fn device(&self) -> Option<&Device> {
        match self {
            ScanOutcome::Found { device, .. } | ScanOutcome::LinkDeclined { device, .. } => {
                Some(device)
            }
            ScanOutcome::NotFound => None,
        }
    }
}

/// Drives device resolution across servers.
pub struct ScanController<'a> {
    connector: &'a dyn Connector,
    reporter: &'a dyn Reporter,
    confirm: &'a dyn Confirm,
    options: ScanOptions,
}

impl<'a> ScanController<'a> {
    pub fn new(
        connector: &'a dyn Connector,
        reporter: &'a dyn Reporter,
        confirm: &'a dyn Confirm,
        options: ScanOptions,
    ) -> Self {
        Self {
            connector,
            reporter,
            confirm,
            options,
        }
    }

    /// Try each server in order until one knows `mac`.
    pub async fn scan(&self, servers: &[ServerConfig], mac: &str) -> Result<ScanOutcome, CoreError> {
        let search_mac =
            mac::format_for_search(mac).ok_or_else(|| CoreError::Validation(mac.to_string()))?;

        for server in servers {
            self.reporter.report_scanning(server);

            let (api, device) = match self.try_server(server, &search_mac).await {
                Ok(Some(found)) => found,
                Ok(None) => {
                    tracing::info!("Device {} not found on {}", search_mac, server.name);
                    continue;
                }
                Err(e) if self.options.fail_fast => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Server {} failed: {}", server.name, e);
                    self.reporter.report_server_error(server, &e);
                    continue;
                }
            };

            if device.is_linked() {
                self.reporter.report_device(&device, server);
                return Ok(ScanOutcome::Found {
                    server: server.clone(),
                    device,
                });
            }

            return self.remediate(api.as_ref(), server, device, &search_mac).await;
        }

        self.reporter.report_not_found(mac);
        Ok(ScanOutcome::NotFound)
    }

    async fn try_server(
        &self,
        server: &ServerConfig,
        mac: &str,
    ) -> Result<Option<(Box<dyn ConfdApi>, Device)>, ApiError> {
        tracing::debug!("Scanning {} ({})", server.name, server.host);
        let api = self.connector.connect(server)?;
        let device = resolve_device(api.as_ref(), mac).await?;
        Ok(device.map(|d| (api, d)))
    }

    /// Offer to link an unassociated device to the fallback line.
    async fn remediate(
        &self,
        api: &dyn ConfdApi,
        server: &ServerConfig,
        device: Device,
        mac: &str,
    ) -> Result<ScanOutcome, CoreError> {
        self.reporter.report_warning(&format!(
            "Device {} is not linked to any line.",
            device.display_name(mac)
        ));

        let exten = &self.options.fallback_exten;
        let line = find_line_by_exten(api, exten).await?;
        let (Some(line), Some(device_id)) = (line, device.id.clone()) else {
            return Err(CoreError::Remediation(format!(
                "Unable to find the line for extension {} or the device ID",
                exten
            )));
        };

        let question = format!("Force link Line:{} -> Device:{}?", line.id, device_id);
        if !self.confirm.confirm(&question).await? {
            self.reporter.report_device(&device, server);
            self.reporter.report_info("Operation cancelled.");
            return Ok(ScanOutcome::LinkDeclined {
                server: server.clone(),
                device,
            });
        }

        api.link_line_device(&line.id, &device_id).await?;
        self.reporter.report_success(&format!(
            "Link created. Re-checking in {}s...",
            self.options.settle_delay.as_secs()
        ));

        tokio::time::sleep(self.options.settle_delay).await;

        let refreshed = resolve_device(api, mac)
            .await?
            .ok_or_else(|| CoreError::Remediation("Re-check after linking failed".to_string()))?;

        self.reporter.report_device(&refreshed, server);
        Ok(ScanOutcome::Found {
            server: server.clone(),
            device: refreshed,
        })
    }
}
