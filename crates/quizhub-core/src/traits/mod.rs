//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AdminRepository, ChannelRepository, ChatUserRepository, CredentialRepository,
    LoginSessionRepository, MiniAppUserRepository, NotificationRepository, RepoResult,
    SiteAdminRepository, SocialAccountRepository, StatisticsRepository, SubscriptionRepository,
    UserRepository,
};
