//! In-memory repository fakes
//!
//! One shared [`InMemoryStore`] backs handles for every repository trait,
//! so relations between tables (social accounts of a user, channels of an
//! admin) behave like the real schema. Tests seed rows through the store
//! and inspect the final state through snapshots.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use async_trait::async_trait;
use quizhub_core::entities::{
    CanonicalUser, ChannelSubscription, Credential, MiniAppUser, Notification, SiteAdmin,
    SocialAccount, SocialLoginSession, TaskStatistic, TelegramAdmin, TelegramChannel,
    TelegramChatUser,
};
use quizhub_core::error::DomainError;
use quizhub_core::traits::{
    AdminRepository, ChannelRepository, ChatUserRepository, CredentialRepository,
    LoginSessionRepository, MiniAppUserRepository, NotificationRepository, RepoResult,
    SiteAdminRepository, SocialAccountRepository, StatisticsRepository, SubscriptionRepository,
    UserRepository,
};
use quizhub_core::value_objects::{Provider, TelegramId};

#[derive(Default)]
struct State {
    users: Vec<CanonicalUser>,
    social_accounts: Vec<SocialAccount>,
    chat_users: Vec<TelegramChatUser>,
    admins: Vec<TelegramAdmin>,
    admin_channels: Vec<(i64, i64)>,
    site_admins: Vec<SiteAdmin>,
    mini_app_users: Vec<MiniAppUser>,
    statistics: Vec<TaskStatistic>,
    channels: Vec<TelegramChannel>,
    subscriptions: Vec<ChannelSubscription>,
    credentials: Vec<Credential>,
    notifications: Vec<Notification>,
    login_sessions: Vec<SocialLoginSession>,
    next_id: i64,
}

impl State {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory database for scenario tests
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap()
    }

    // Seeding ---------------------------------------------------------------

    pub fn seed_user(&self, mut user: CanonicalUser) -> i64 {
        let mut state = self.lock();
        if user.id == 0 {
            user.id = state.assign_id();
        }
        let id = user.id;
        state.users.push(user);
        id
    }

    pub fn seed_social_account(&self, mut account: SocialAccount) -> i64 {
        let mut state = self.lock();
        if account.id == 0 {
            account.id = state.assign_id();
        }
        let id = account.id;
        state.social_accounts.push(account);
        id
    }

    pub fn seed_chat_user(&self, mut user: TelegramChatUser) -> i64 {
        let mut state = self.lock();
        if user.id == 0 {
            user.id = state.assign_id();
        }
        let id = user.id;
        state.chat_users.push(user);
        id
    }

    pub fn seed_admin(&self, mut admin: TelegramAdmin) -> i64 {
        let mut state = self.lock();
        if admin.id == 0 {
            admin.id = state.assign_id();
        }
        let id = admin.id;
        state.admins.push(admin);
        id
    }

    pub fn seed_admin_channel(&self, admin_id: i64, channel_id: i64) {
        self.lock().admin_channels.push((admin_id, channel_id));
    }

    pub fn seed_channel(&self, mut channel: TelegramChannel) -> i64 {
        let mut state = self.lock();
        if channel.id == 0 {
            channel.id = state.assign_id();
        }
        let id = channel.id;
        state.channels.push(channel);
        id
    }

    pub fn seed_subscription(&self, mut subscription: ChannelSubscription) -> i64 {
        let mut state = self.lock();
        if subscription.id == 0 {
            subscription.id = state.assign_id();
        }
        let id = subscription.id;
        state.subscriptions.push(subscription);
        id
    }

    pub fn seed_mini_app_user(&self, mut user: MiniAppUser) -> i64 {
        let mut state = self.lock();
        if user.id == 0 {
            user.id = state.assign_id();
        }
        let id = user.id;
        state.mini_app_users.push(user);
        id
    }

    pub fn seed_statistic(&self, mut stat: TaskStatistic) -> i64 {
        let mut state = self.lock();
        if stat.id == 0 {
            stat.id = state.assign_id();
        }
        let id = stat.id;
        state.statistics.push(stat);
        id
    }

    pub fn seed_credential(&self, mut credential: Credential) -> i64 {
        let mut state = self.lock();
        if credential.id == 0 {
            credential.id = state.assign_id();
        }
        let id = credential.id;
        state.credentials.push(credential);
        id
    }

    // Snapshots -------------------------------------------------------------

    pub fn users(&self) -> Vec<CanonicalUser> {
        self.lock().users.clone()
    }

    pub fn social_accounts(&self) -> Vec<SocialAccount> {
        self.lock().social_accounts.clone()
    }

    pub fn chat_users(&self) -> Vec<TelegramChatUser> {
        self.lock().chat_users.clone()
    }

    pub fn admins(&self) -> Vec<TelegramAdmin> {
        self.lock().admins.clone()
    }

    pub fn admin_channels(&self) -> Vec<(i64, i64)> {
        self.lock().admin_channels.clone()
    }

    pub fn site_admins(&self) -> Vec<SiteAdmin> {
        self.lock().site_admins.clone()
    }

    pub fn mini_app_users(&self) -> Vec<MiniAppUser> {
        self.lock().mini_app_users.clone()
    }

    pub fn statistics(&self) -> Vec<TaskStatistic> {
        self.lock().statistics.clone()
    }

    pub fn subscriptions(&self) -> Vec<ChannelSubscription> {
        self.lock().subscriptions.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    pub fn login_sessions(&self) -> Vec<SocialLoginSession> {
        self.lock().login_sessions.clone()
    }

    // Repository handles ----------------------------------------------------

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        Arc::new(FakeUserRepo(self.clone()))
    }

    pub fn social_account_repo(&self) -> Arc<dyn SocialAccountRepository> {
        Arc::new(FakeSocialAccountRepo(self.clone()))
    }

    pub fn chat_user_repo(&self) -> Arc<dyn ChatUserRepository> {
        Arc::new(FakeChatUserRepo(self.clone()))
    }

    pub fn admin_repo(&self) -> Arc<dyn AdminRepository> {
        Arc::new(FakeAdminRepo(self.clone()))
    }

    pub fn site_admin_repo(&self) -> Arc<dyn SiteAdminRepository> {
        Arc::new(FakeSiteAdminRepo(self.clone()))
    }

    pub fn mini_app_repo(&self) -> Arc<dyn MiniAppUserRepository> {
        Arc::new(FakeMiniAppRepo(self.clone()))
    }

    pub fn statistics_repo(&self) -> Arc<dyn StatisticsRepository> {
        Arc::new(FakeStatisticsRepo(self.clone()))
    }

    pub fn channel_repo(&self) -> Arc<dyn ChannelRepository> {
        Arc::new(FakeChannelRepo(self.clone()))
    }

    pub fn subscription_repo(&self) -> Arc<dyn SubscriptionRepository> {
        Arc::new(FakeSubscriptionRepo(self.clone()))
    }

    pub fn credential_repo(&self) -> Arc<dyn CredentialRepository> {
        Arc::new(FakeCredentialRepo(self.clone()))
    }

    pub fn notification_repo(&self) -> Arc<dyn NotificationRepository> {
        Arc::new(FakeNotificationRepo(self.clone()))
    }

    pub fn login_session_repo(&self) -> Arc<dyn LoginSessionRepository> {
        Arc::new(FakeLoginSessionRepo(self.clone()))
    }
}

struct FakeUserRepo(InMemoryStore);

#[async_trait]
impl UserRepository for FakeUserRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CanonicalUser>> {
        Ok(self.0.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<CanonicalUser>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .find(|u| u.telegram_id == Some(telegram_id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<CanonicalUser>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_social_email(&self, email: &str) -> RepoResult<Option<CanonicalUser>> {
        let state = self.0.lock();
        for account in &state.social_accounts {
            if account.email.as_deref() != Some(email) {
                continue;
            }
            let has_telegram = state
                .social_accounts
                .iter()
                .any(|a| a.user_id == account.user_id && a.provider == Provider::Telegram);
            if has_telegram {
                continue;
            }
            return Ok(state.users.iter().find(|u| u.id == account.user_id).cloned());
        }
        Ok(None)
    }

    async fn find_by_username_ci(&self, username: &str) -> RepoResult<Option<CanonicalUser>> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username)))
    }

    async fn create(&self, user: &CanonicalUser) -> RepoResult<i64> {
        let mut state = self.0.lock();
        let id = state.assign_id();
        let mut row = user.clone();
        row.id = id;
        state.users.push(row);
        Ok(id)
    }

    async fn update(&self, user: &CanonicalUser) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state.users.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }
}

struct FakeSocialAccountRepo(InMemoryStore);

#[async_trait]
impl SocialAccountRepository for FakeSocialAccountRepo {
    async fn find_by_provider_user(
        &self,
        provider: Provider,
        provider_user_id: &str,
    ) -> RepoResult<Option<SocialAccount>> {
        Ok(self
            .0
            .lock()
            .social_accounts
            .iter()
            .find(|a| a.provider == provider && a.provider_user_id == provider_user_id)
            .cloned())
    }

    async fn find_for_user(
        &self,
        user_id: i64,
        provider: Provider,
    ) -> RepoResult<Option<SocialAccount>> {
        Ok(self
            .0
            .lock()
            .social_accounts
            .iter()
            .find(|a| a.user_id == user_id && a.provider == provider)
            .cloned())
    }

    async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<SocialAccount>> {
        Ok(self
            .0
            .lock()
            .social_accounts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, account: &SocialAccount) -> RepoResult<i64> {
        let mut state = self.0.lock();
        let id = state.assign_id();
        let mut row = account.clone();
        row.id = id;
        state.social_accounts.push(row);
        Ok(id)
    }

    async fn update(&self, account: &SocialAccount) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state
            .social_accounts
            .iter_mut()
            .find(|a| a.id == account.id)
        {
            Some(row) => {
                *row = account.clone();
                Ok(())
            }
            None => Err(DomainError::SocialAccountNotFound {
                provider: account.provider,
                provider_user_id: account.provider_user_id.clone(),
            }),
        }
    }
}

struct FakeChatUserRepo(InMemoryStore);

#[async_trait]
impl ChatUserRepository for FakeChatUserRepo {
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<TelegramChatUser>> {
        Ok(self
            .0
            .lock()
            .chat_users
            .iter()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn upsert(&self, user: &TelegramChatUser) -> RepoResult<i64> {
        let mut state = self.0.lock();
        if let Some(row) = state
            .chat_users
            .iter_mut()
            .find(|u| u.telegram_id == user.telegram_id)
        {
            let id = row.id;
            *row = user.clone();
            row.id = id;
            return Ok(id);
        }
        let id = state.assign_id();
        let mut row = user.clone();
        row.id = id;
        state.chat_users.push(row);
        Ok(id)
    }

    async fn update(&self, user: &TelegramChatUser) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state.chat_users.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(DomainError::TelegramUserNotFound(user.telegram_id)),
        }
    }
}

struct FakeAdminRepo(InMemoryStore);

#[async_trait]
impl AdminRepository for FakeAdminRepo {
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<TelegramAdmin>> {
        Ok(self
            .0
            .lock()
            .admins
            .iter()
            .find(|a| a.telegram_id == telegram_id)
            .cloned())
    }

    async fn upsert(&self, admin: &TelegramAdmin) -> RepoResult<i64> {
        let mut state = self.0.lock();
        if let Some(row) = state
            .admins
            .iter_mut()
            .find(|a| a.telegram_id == admin.telegram_id)
        {
            let id = row.id;
            *row = admin.clone();
            row.id = id;
            return Ok(id);
        }
        let id = state.assign_id();
        let mut row = admin.clone();
        row.id = id;
        state.admins.push(row);
        Ok(id)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut state = self.0.lock();
        state.admins.retain(|a| a.id != id);
        state.admin_channels.retain(|(admin_id, _)| *admin_id != id);
        Ok(())
    }

    async fn channels_for(&self, admin_id: i64) -> RepoResult<Vec<TelegramChannel>> {
        let state = self.0.lock();
        let channel_ids: Vec<i64> = state
            .admin_channels
            .iter()
            .filter(|(a, _)| *a == admin_id)
            .map(|(_, c)| *c)
            .collect();
        Ok(state
            .channels
            .iter()
            .filter(|c| channel_ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn add_channel(&self, admin_id: i64, channel_id: i64) -> RepoResult<()> {
        let mut state = self.0.lock();
        if !state.admin_channels.contains(&(admin_id, channel_id)) {
            state.admin_channels.push((admin_id, channel_id));
        }
        Ok(())
    }

    async fn remove_channel(&self, admin_id: i64, channel_id: i64) -> RepoResult<()> {
        self.0
            .lock()
            .admin_channels
            .retain(|&(a, c)| !(a == admin_id && c == channel_id));
        Ok(())
    }

    async fn is_admin_of(&self, admin_id: i64, channel_id: i64) -> RepoResult<bool> {
        Ok(self
            .0
            .lock()
            .admin_channels
            .contains(&(admin_id, channel_id)))
    }
}

struct FakeSiteAdminRepo(InMemoryStore);

#[async_trait]
impl SiteAdminRepository for FakeSiteAdminRepo {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<SiteAdmin>> {
        Ok(self
            .0
            .lock()
            .site_admins
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn upsert(&self, admin: &SiteAdmin) -> RepoResult<()> {
        let mut state = self.0.lock();
        if let Some(row) = state
            .site_admins
            .iter_mut()
            .find(|a| a.username == admin.username)
        {
            let id = row.id;
            *row = admin.clone();
            row.id = id;
            return Ok(());
        }
        let id = state.assign_id();
        let mut row = admin.clone();
        row.id = id;
        state.site_admins.push(row);
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> RepoResult<()> {
        self.0.lock().site_admins.retain(|a| a.username != username);
        Ok(())
    }
}

struct FakeMiniAppRepo(InMemoryStore);

#[async_trait]
impl MiniAppUserRepository for FakeMiniAppRepo {
    async fn find_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> RepoResult<Option<MiniAppUser>> {
        Ok(self
            .0
            .lock()
            .mini_app_users
            .iter()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn find_by_site_user(&self, site_user_id: i64) -> RepoResult<Option<MiniAppUser>> {
        Ok(self
            .0
            .lock()
            .mini_app_users
            .iter()
            .find(|u| u.site_user_id == Some(site_user_id))
            .cloned())
    }

    async fn update(&self, user: &MiniAppUser) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state.mini_app_users.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(DomainError::MiniAppUserNotFound(user.telegram_id)),
        }
    }
}

struct FakeStatisticsRepo(InMemoryStore);

#[async_trait]
impl StatisticsRepository for FakeStatisticsRepo {
    async fn unlinked_for_mini_app(
        &self,
        mini_app_user_id: i64,
    ) -> RepoResult<Vec<TaskStatistic>> {
        Ok(self
            .0
            .lock()
            .statistics
            .iter()
            .filter(|s| s.mini_app_user_id == Some(mini_app_user_id) && s.site_user_id.is_none())
            .cloned()
            .collect())
    }

    async fn attach_to_user(&self, stat_id: i64, user_id: i64) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state.statistics.iter_mut().find(|s| s.id == stat_id) {
            Some(row) => {
                row.site_user_id = Some(user_id);
                Ok(())
            }
            None => Err(DomainError::InternalError(format!(
                "statistic {stat_id} not found"
            ))),
        }
    }
}

struct FakeChannelRepo(InMemoryStore);

#[async_trait]
impl ChannelRepository for FakeChannelRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<TelegramChannel>> {
        Ok(self.0.lock().channels.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_group_id(&self, group_id: i64) -> RepoResult<Option<TelegramChannel>> {
        Ok(self
            .0
            .lock()
            .channels
            .iter()
            .find(|c| c.group_id == group_id)
            .cloned())
    }

    async fn upsert(&self, channel: &TelegramChannel) -> RepoResult<i64> {
        let mut state = self.0.lock();
        if let Some(row) = state
            .channels
            .iter_mut()
            .find(|c| c.group_id == channel.group_id)
        {
            let id = row.id;
            *row = channel.clone();
            row.id = id;
            return Ok(id);
        }
        let id = state.assign_id();
        let mut row = channel.clone();
        row.id = id;
        state.channels.push(row);
        Ok(id)
    }

    async fn list(&self) -> RepoResult<Vec<TelegramChannel>> {
        Ok(self.0.lock().channels.clone())
    }
}

struct FakeSubscriptionRepo(InMemoryStore);

#[async_trait]
impl SubscriptionRepository for FakeSubscriptionRepo {
    async fn find(
        &self,
        user_id: i64,
        channel_id: i64,
    ) -> RepoResult<Option<ChannelSubscription>> {
        Ok(self
            .0
            .lock()
            .subscriptions
            .iter()
            .find(|s| s.user_id == user_id && s.channel_id == channel_id)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ChannelSubscription>> {
        Ok(self
            .0
            .lock()
            .subscriptions
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<ChannelSubscription>> {
        Ok(self
            .0
            .lock()
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, subscription: &ChannelSubscription) -> RepoResult<i64> {
        let mut state = self.0.lock();
        let id = state.assign_id();
        let mut row = subscription.clone();
        row.id = id;
        state.subscriptions.push(row);
        Ok(id)
    }

    async fn update(&self, subscription: &ChannelSubscription) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state
            .subscriptions
            .iter_mut()
            .find(|s| s.id == subscription.id)
        {
            Some(row) => {
                *row = subscription.clone();
                Ok(())
            }
            None => Err(DomainError::SubscriptionNotFound {
                user_id: subscription.user_id,
                channel_id: subscription.channel_id,
            }),
        }
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.0.lock().subscriptions.retain(|s| s.id != id);
        Ok(())
    }
}

struct FakeCredentialRepo(InMemoryStore);

#[async_trait]
impl CredentialRepository for FakeCredentialRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Credential>> {
        Ok(self
            .0
            .lock()
            .credentials
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_platform(
        &self,
        platform: &str,
        username: &str,
    ) -> RepoResult<Option<Credential>> {
        Ok(self
            .0
            .lock()
            .credentials
            .iter()
            .find(|c| c.platform == platform && c.username == username)
            .cloned())
    }

    async fn upsert(&self, platform: &str, username: &str) -> RepoResult<Credential> {
        let mut state = self.0.lock();
        if let Some(row) = state
            .credentials
            .iter()
            .find(|c| c.platform == platform && c.username == username)
        {
            return Ok(row.clone());
        }
        let id = state.assign_id();
        let mut row = Credential::new(platform, username);
        row.id = id;
        state.credentials.push(row.clone());
        Ok(row)
    }

    async fn get_attribute(&self, credential_id: i64, key: &str) -> RepoResult<Option<Value>> {
        let state = self.0.lock();
        match state.credentials.iter().find(|c| c.id == credential_id) {
            Some(row) => Ok(row.attributes.get(key).cloned()),
            None => Err(DomainError::CredentialNotFound(credential_id)),
        }
    }

    async fn set_attribute(&self, credential_id: i64, key: &str, value: Value) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state.credentials.iter_mut().find(|c| c.id == credential_id) {
            Some(row) => {
                row.attributes.insert(key.to_string(), value);
                Ok(())
            }
            None => Err(DomainError::CredentialNotFound(credential_id)),
        }
    }

    async fn remove_attribute(&self, credential_id: i64, key: &str) -> RepoResult<()> {
        let mut state = self.0.lock();
        match state.credentials.iter_mut().find(|c| c.id == credential_id) {
            Some(row) => {
                row.attributes.remove(key);
                Ok(())
            }
            None => Err(DomainError::CredentialNotFound(credential_id)),
        }
    }
}

struct FakeNotificationRepo(InMemoryStore);

#[async_trait]
impl NotificationRepository for FakeNotificationRepo {
    async fn create(&self, notification: &Notification) -> RepoResult<i64> {
        let mut state = self.0.lock();
        let id = state.assign_id();
        let mut row = notification.clone();
        row.id = id;
        state.notifications.push(row);
        Ok(id)
    }

    async fn mark_delivered(&self, id: i64) -> RepoResult<()> {
        let mut state = self.0.lock();
        if let Some(row) = state.notifications.iter_mut().find(|n| n.id == id) {
            row.delivered_at = Some(chrono::Utc::now());
        }
        Ok(())
    }
}

struct FakeLoginSessionRepo(InMemoryStore);

#[async_trait]
impl LoginSessionRepository for FakeLoginSessionRepo {
    async fn create(&self, session: &SocialLoginSession) -> RepoResult<i64> {
        let mut state = self.0.lock();
        let id = state.assign_id();
        let mut row = session.clone();
        row.id = id;
        state.login_sessions.push(row);
        Ok(id)
    }
}
