//! # quizhub-identity
//!
//! Identity graph and social auth reconcilers.
//!
//! [`IdentityService`] keeps the four user representations (canonical,
//! chat, admin, Mini-App) wired to the same person; the reconcilers turn
//! provider payloads (Telegram Login Widget, GitHub OAuth, Google OAuth)
//! into a logged-in canonical user without ever merging two people
//! automatically.

pub mod dto;
pub mod oauth;
pub mod services;

pub use dto::{LoginMeta, LoginOutcome, OAuthCallbackRequest};
pub use oauth::{GithubClient, GoogleClient, OAuthClient, OAuthToken, ProviderProfile};
pub use services::{
    CanonicalMatch, IdentityService, LookupKeys, MatchRule, OAuthLoginService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TelegramAuthService,
};
