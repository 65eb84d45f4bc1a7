//! # quizhub-admin
//!
//! Bulk channel administration over the Telegram gateway.
//!
//! [`AdminService`] orchestrates promote/demote/ban/unban/kick across
//! channels with per-target [`Report`] lines, keeps the local relations
//! and subscription state in step with the remote side, and notifies the
//! affected users with HTML messages.

pub mod context;
pub mod error;
pub mod report;
pub mod service;
pub mod templates;

pub use context::{AdminContext, AdminContextBuilder};
pub use error::{AdminError, AdminResult};
pub use report::{Report, ReportLine, Severity};
pub use service::AdminService;
