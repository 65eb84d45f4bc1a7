//! Control-plane dependency container

use std::sync::Arc;

use quizhub_core::traits::{
    AdminRepository, ChannelRepository, ChatUserRepository, NotificationRepository,
    SubscriptionRepository, UserRepository,
};
use quizhub_telegram::TelegramGateway;

use crate::error::{AdminError, AdminResult};

/// Dependencies of the admin control plane
#[derive(Clone)]
pub struct AdminContext {
    gateway: Arc<dyn TelegramGateway>,
    user_repo: Arc<dyn UserRepository>,
    chat_user_repo: Arc<dyn ChatUserRepository>,
    admin_repo: Arc<dyn AdminRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
}

impl AdminContext {
    pub fn new(
        gateway: Arc<dyn TelegramGateway>,
        user_repo: Arc<dyn UserRepository>,
        chat_user_repo: Arc<dyn ChatUserRepository>,
        admin_repo: Arc<dyn AdminRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            gateway,
            user_repo,
            chat_user_repo,
            admin_repo,
            channel_repo,
            subscription_repo,
            notification_repo,
        }
    }

    pub fn gateway(&self) -> &dyn TelegramGateway {
        self.gateway.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn chat_user_repo(&self) -> &dyn ChatUserRepository {
        self.chat_user_repo.as_ref()
    }

    pub fn admin_repo(&self) -> &dyn AdminRepository {
        self.admin_repo.as_ref()
    }

    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }
}

impl std::fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminContext")
            .field("gateway", &"...")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating an AdminContext
#[derive(Default)]
pub struct AdminContextBuilder {
    gateway: Option<Arc<dyn TelegramGateway>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    chat_user_repo: Option<Arc<dyn ChatUserRepository>>,
    admin_repo: Option<Arc<dyn AdminRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    subscription_repo: Option<Arc<dyn SubscriptionRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
}

impl AdminContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gateway(mut self, gateway: Arc<dyn TelegramGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn chat_user_repo(mut self, repo: Arc<dyn ChatUserRepository>) -> Self {
        self.chat_user_repo = Some(repo);
        self
    }

    pub fn admin_repo(mut self, repo: Arc<dyn AdminRepository>) -> Self {
        self.admin_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn SubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    /// Build the AdminContext
    ///
    /// # Errors
    /// Returns `AdminError::Configuration` if any dependency is missing
    pub fn build(self) -> AdminResult<AdminContext> {
        Ok(AdminContext::new(
            self.gateway
                .ok_or_else(|| AdminError::configuration("gateway is required"))?,
            self.user_repo
                .ok_or_else(|| AdminError::configuration("user_repo is required"))?,
            self.chat_user_repo
                .ok_or_else(|| AdminError::configuration("chat_user_repo is required"))?,
            self.admin_repo
                .ok_or_else(|| AdminError::configuration("admin_repo is required"))?,
            self.channel_repo
                .ok_or_else(|| AdminError::configuration("channel_repo is required"))?,
            self.subscription_repo
                .ok_or_else(|| AdminError::configuration("subscription_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| AdminError::configuration("notification_repo is required"))?,
        ))
    }
}
