//! Control-plane error types

use thiserror::Error;

use quizhub_core::DomainError;
use quizhub_telegram::GatewayError;

/// Errors of the admin control plane.
///
/// Per-target failures inside bulk operations become report lines, not
/// errors; this type covers failures that abort an operation as a whole.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Control plane misconfigured: {0}")]
    Configuration(String),
}

impl AdminError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Result type for control-plane operations
pub type AdminResult<T> = Result<T, AdminError>;
