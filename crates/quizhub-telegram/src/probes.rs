//! Read-only probe results returned by the gateway

use quizhub_core::value_objects::TelegramId;

/// Membership status of a user in a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    /// Owner or administrator
    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Owner | Self::Administrator)
    }
}

/// Snapshot of one chat member, flattened from the Bot API response
#[derive(Debug, Clone)]
pub struct ChatMemberInfo {
    pub user_id: TelegramId,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub is_premium: bool,
    pub status: MemberStatus,
    /// Meaningful only for administrators
    pub is_anonymous: bool,
    pub can_promote_members: bool,
    pub can_restrict_members: bool,
}

impl ChatMemberInfo {
    /// Whether the member currently holds admin rights
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.status.is_privileged()
    }
}

/// Coarse chat classification; administration semantics differ per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKindInfo {
    Supergroup,
    Channel,
    Group,
    Private,
}

impl ChatKindInfo {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
            Self::Group => "group",
            Self::Private => "private",
        }
    }
}

/// Snapshot of a chat
#[derive(Debug, Clone)]
pub struct ChatInfo {
    pub chat_id: i64,
    pub title: Option<String>,
    pub username: Option<String>,
    pub kind: ChatKindInfo,
}

/// What the bot itself may do in a chat
#[derive(Debug, Clone, Copy)]
pub struct BotPermissions {
    pub is_admin: bool,
    pub can_promote_members: bool,
    pub can_restrict_members: bool,
    pub can_invite_users: bool,
}

impl BotPermissions {
    /// Everything channel administration needs
    #[must_use]
    pub fn is_sufficient(&self) -> bool {
        self.is_admin && self.can_promote_members && self.can_restrict_members
    }
}
