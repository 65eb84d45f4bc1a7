//! Service context - dependency container for the identity services
//!
//! Holds the repositories the identity graph and reconcilers operate on.
//! Services depend only on the repository traits, so the same context can
//! be built over PostgreSQL repositories or in-memory fakes.

use std::sync::Arc;

use quizhub_core::traits::{
    AdminRepository, ChatUserRepository, LoginSessionRepository, MiniAppUserRepository,
    SiteAdminRepository, SocialAccountRepository, StatisticsRepository, UserRepository,
};

/// Dependency container passed to all identity services
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    social_account_repo: Arc<dyn SocialAccountRepository>,
    chat_user_repo: Arc<dyn ChatUserRepository>,
    admin_repo: Arc<dyn AdminRepository>,
    site_admin_repo: Arc<dyn SiteAdminRepository>,
    mini_app_repo: Arc<dyn MiniAppUserRepository>,
    statistics_repo: Arc<dyn StatisticsRepository>,
    login_session_repo: Arc<dyn LoginSessionRepository>,
}

impl ServiceContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        social_account_repo: Arc<dyn SocialAccountRepository>,
        chat_user_repo: Arc<dyn ChatUserRepository>,
        admin_repo: Arc<dyn AdminRepository>,
        site_admin_repo: Arc<dyn SiteAdminRepository>,
        mini_app_repo: Arc<dyn MiniAppUserRepository>,
        statistics_repo: Arc<dyn StatisticsRepository>,
        login_session_repo: Arc<dyn LoginSessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            social_account_repo,
            chat_user_repo,
            admin_repo,
            site_admin_repo,
            mini_app_repo,
            statistics_repo,
            login_session_repo,
        }
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn social_account_repo(&self) -> &dyn SocialAccountRepository {
        self.social_account_repo.as_ref()
    }

    pub fn chat_user_repo(&self) -> &dyn ChatUserRepository {
        self.chat_user_repo.as_ref()
    }

    pub fn admin_repo(&self) -> &dyn AdminRepository {
        self.admin_repo.as_ref()
    }

    pub fn site_admin_repo(&self) -> &dyn SiteAdminRepository {
        self.site_admin_repo.as_ref()
    }

    pub fn mini_app_repo(&self) -> &dyn MiniAppUserRepository {
        self.mini_app_repo.as_ref()
    }

    pub fn statistics_repo(&self) -> &dyn StatisticsRepository {
        self.statistics_repo.as_ref()
    }

    pub fn login_session_repo(&self) -> &dyn LoginSessionRepository {
        self.login_session_repo.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating a ServiceContext
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    social_account_repo: Option<Arc<dyn SocialAccountRepository>>,
    chat_user_repo: Option<Arc<dyn ChatUserRepository>>,
    admin_repo: Option<Arc<dyn AdminRepository>>,
    site_admin_repo: Option<Arc<dyn SiteAdminRepository>>,
    mini_app_repo: Option<Arc<dyn MiniAppUserRepository>>,
    statistics_repo: Option<Arc<dyn StatisticsRepository>>,
    login_session_repo: Option<Arc<dyn LoginSessionRepository>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            social_account_repo: None,
            chat_user_repo: None,
            admin_repo: None,
            site_admin_repo: None,
            mini_app_repo: None,
            statistics_repo: None,
            login_session_repo: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn social_account_repo(mut self, repo: Arc<dyn SocialAccountRepository>) -> Self {
        self.social_account_repo = Some(repo);
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

    pub fn site_admin_repo(mut self, repo: Arc<dyn SiteAdminRepository>) -> Self {
        self.site_admin_repo = Some(repo);
        self
    }

    pub fn mini_app_repo(mut self, repo: Arc<dyn MiniAppUserRepository>) -> Self {
        self.mini_app_repo = Some(repo);
        self
    }

    pub fn statistics_repo(mut self, repo: Arc<dyn StatisticsRepository>) -> Self {
        self.statistics_repo = Some(repo);
        self
    }

    pub fn login_session_repo(mut self, repo: Arc<dyn LoginSessionRepository>) -> Self {
        self.login_session_repo = Some(repo);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.social_account_repo
                .ok_or_else(|| ServiceError::validation("social_account_repo is required"))?,
            self.chat_user_repo
                .ok_or_else(|| ServiceError::validation("chat_user_repo is required"))?,
            self.admin_repo
                .ok_or_else(|| ServiceError::validation("admin_repo is required"))?,
            self.site_admin_repo
                .ok_or_else(|| ServiceError::validation("site_admin_repo is required"))?,
            self.mini_app_repo
                .ok_or_else(|| ServiceError::validation("mini_app_repo is required"))?,
            self.statistics_repo
                .ok_or_else(|| ServiceError::validation("statistics_repo is required"))?,
            self.login_session_repo
                .ok_or_else(|| ServiceError::validation("login_session_repo is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
