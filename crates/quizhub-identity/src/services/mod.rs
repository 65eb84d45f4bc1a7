//! Identity services
//!
//! The identity graph, the login reconcilers, and their shared context
//! and error types.

mod audit;
pub mod context;
pub mod error;
pub mod identity;
pub mod oauth_login;
pub mod telegram_login;
pub mod username;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use identity::{CanonicalMatch, IdentityService, LookupKeys, MatchRule, MergeReport};
pub use oauth_login::OAuthLoginService;
pub use telegram_login::TelegramAuthService;
