//! Value objects - small typed values shared across the domain

mod browser_kind;
mod field;
mod provider;
mod subscription_state;
mod telegram_id;

pub use browser_kind::BrowserKind;
pub use field::merge_field;
pub use provider::Provider;
pub use subscription_state::SubscriptionState;
pub use telegram_id::TelegramId;
