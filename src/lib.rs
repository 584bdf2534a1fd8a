/// Authentication helpers for the Feishu open platform token flow.
pub mod auth;
/// Bitable-specific types and service client helpers.
pub mod bitable;
/// Runtime configuration sourced from the environment.
pub mod config;
/// Transport seam shared by the real HTTP client and test doubles.
pub mod http;
/// One-shot administrative workflows over a Bitable base.
pub mod tasks;

/// Logging verbosity for toolkit operations.
#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit verbose debug output.
    Debug,
    /// Emit standard informational output.
    Information,
}

impl Default for LogLevel {
    /// Defaults to `Information` logging.
    fn default() -> Self {
        LogLevel::Information
    }
}
