//! Presentation and operator-input seams used by the scan controller.

use async_trait::async_trait;

use crate::config::ServerConfig;
use crate::error::{ApiError, PromptError};
use crate::model::Device;

/// Receives everything the scan wants to show the operator.
pub trait Reporter: Send + Sync {
    /// A server is about to be queried.
    fn report_scanning(&self, _server: &ServerConfig) {}

    fn report_device(&self, device: &Device, server: &ServerConfig);

    fn report_not_found(&self, mac: &str);

    fn report_error(&self, message: &str);

    /// A server failed; the scan moves on.
    fn report_server_error(&self, server: &ServerConfig, error: &ApiError);

    fn report_warning(&self, message: &str);

    fn report_info(&self, message: &str);

    fn report_success(&self, message: &str);
}

/// Asks the operator a yes/no question.
///
/// Closed or interrupted input surfaces as `PromptError`.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, question: &str) -> Result<bool, PromptError>;
}

/// Interpret a free-form answer; `y`, `yes`, `o` and `oui` mean yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    )
}
