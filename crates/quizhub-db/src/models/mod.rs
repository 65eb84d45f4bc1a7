//! Database models - SQLx-compatible structs for PostgreSQL tables

mod admin;
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
mod user;

pub use admin::TelegramAdminModel;
pub use channel::TelegramChannelModel;
pub use chat_user::ChatUserModel;
pub use credential::CredentialModel;
pub use login_session::LoginSessionModel;
pub use mini_app_user::MiniAppUserModel;
pub use notification::NotificationModel;
pub use site_admin::SiteAdminModel;
pub use social_account::SocialAccountModel;
pub use subscription::SubscriptionModel;
pub use task_statistic::TaskStatisticModel;
pub use user::UserModel;
