//! Domain entities

mod browser_session;
mod canonical_user;
mod channel;
mod chat_user;
mod credential;
mod login_session;
mod mini_app_user;
mod notification;
mod site_admin;
mod social_account;
mod subscription;
mod task_statistic;
mod telegram_admin;

pub use browser_session::{BrowserSession, SessionCookie, SESSION_TTL_DAYS};
pub use canonical_user::{CanonicalUser, SocialLinks};
pub use channel::TelegramChannel;
pub use chat_user::TelegramChatUser;
pub use credential::Credential;
pub use login_session::SocialLoginSession;
pub use mini_app_user::MiniAppUser;
pub use notification::Notification;
pub use site_admin::SiteAdmin;
pub use social_account::SocialAccount;
pub use subscription::ChannelSubscription;
pub use task_statistic::TaskStatistic;
pub use telegram_admin::TelegramAdmin;
