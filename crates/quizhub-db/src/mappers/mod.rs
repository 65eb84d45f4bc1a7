//! Entity to model mappers
//!
//! Conversions between domain entities (quizhub-core) and database models.
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - Fallible `*_from_model` functions where a stored string must parse
//!   into a domain enum

mod admin;
mod channel;
mod chat_user;
mod credential;
mod links;
mod login_session;
mod mini_app_user;
mod notification;
mod site_admin;
mod social_account;
mod subscription;
mod task_statistic;
mod user;

pub use links::{links_from_columns, SocialLinkColumns};
pub use social_account::social_account_from_model;
pub use subscription::subscription_from_model;
