//! Data transfer objects for the identity services

pub mod requests;
pub mod responses;

pub use requests::{LoginMeta, OAuthCallbackRequest};
pub use responses::LoginOutcome;
