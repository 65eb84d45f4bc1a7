//! Bulk administration scenarios over the scripted gateway

use std::sync::Arc;

use chrono::{Duration, Utc};

use integration_tests::{InMemoryStore, ScriptedGateway};
use quizhub_admin::{AdminContext, AdminContextBuilder, AdminService};
use quizhub_core::entities::{
    CanonicalUser, ChannelSubscription, TelegramAdmin, TelegramChannel,
};
use quizhub_core::value_objects::{SubscriptionState, TelegramId};
use quizhub_telegram::{DemoteOutcome, GatewayError, MemberStatus};

fn context(store: &InMemoryStore, gateway: Arc<ScriptedGateway>) -> AdminContext {
    AdminContextBuilder::new()
        .gateway(gateway)
        .user_repo(store.user_repo())
        .chat_user_repo(store.chat_user_repo())
        .admin_repo(store.admin_repo())
        .channel_repo(store.channel_repo())
        .subscription_repo(store.subscription_repo())
        .notification_repo(store.notification_repo())
        .build()
        .unwrap()
}

fn seed_channel(store: &InMemoryStore, group_id: i64, title: &str) -> i64 {
    store.seed_channel(TelegramChannel::new(group_id, title.to_string()))
}

/// One admin related to three channels, the middle one scripted to fail
fn seed_admin_with_three_channels(store: &InMemoryStore) -> (TelegramId, i64, [i64; 3]) {
    let telegram_id = TelegramId::new(777);
    let admin_id = store.seed_admin(TelegramAdmin::new(telegram_id));
    let alpha = seed_channel(store, -100_001, "Alpha");
    let beta = seed_channel(store, -100_002, "Beta");
    let gamma = seed_channel(store, -100_003, "Gamma");
    store.seed_admin_channel(admin_id, alpha);
    store.seed_admin_channel(admin_id, beta);
    store.seed_admin_channel(admin_id, gamma);
    (telegram_id, admin_id, [alpha, beta, gamma])
}

fn seed_member(store: &InMemoryStore, telegram_id: i64) -> i64 {
    let mut user = CanonicalUser::new(format!("member{telegram_id}"));
    user.telegram_id = Some(TelegramId::new(telegram_id));
    store.seed_user(user)
}

#[tokio::test]
async fn test_bulk_revoke_isolates_the_failing_channel() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let (telegram_id, admin_id, [_, beta, _]) = seed_admin_with_three_channels(&store);
    gateway.script_demote(
        -100_002,
        Err(GatewayError::BotMissingRight("can_promote_members".to_string())),
    );

    let ctx = context(&store, gateway.clone());
    let report = AdminService::new(&ctx)
        .remove_admin_rights_from_all_channels(telegram_id)
        .await
        .unwrap();

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.error_count(), 1);
    assert!(!report.is_ok());
    let rendered = report.to_string();
    assert!(rendered.contains("Alpha: admin rights removed"));
    assert!(rendered.contains("Gamma: admin rights removed"));
    assert!(rendered.contains("Beta: Bot is missing the can_promote_members right"));

    // Only the failed channel keeps its relation.
    assert_eq!(store.admin_channels(), vec![(admin_id, beta)]);

    // One notification, listing the demoted channels and never the
    // failed one.
    let sent = gateway.sent_messages();
    assert_eq!(sent.len(), 1);
    let (recipient, html) = &sent[0];
    assert_eq!(*recipient, 777);
    assert!(html.contains("Alpha"));
    assert!(html.contains("Gamma"));
    assert!(!html.contains("Beta"));

    let notifications = store.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications.iter().all(|n| n.delivered_at.is_some()));
}

#[tokio::test]
async fn test_bulk_revoke_reconciles_stale_relations() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let (telegram_id, _, _) = seed_admin_with_three_channels(&store);
    gateway.script_demote(-100_002, Ok(DemoteOutcome::NotAdmin));

    let ctx = context(&store, gateway.clone());
    let report = AdminService::new(&ctx)
        .remove_admin_rights_from_all_channels(telegram_id)
        .await
        .unwrap();

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.warning_count(), 1);
    assert!(report.is_ok());
    assert!(report.to_string().contains("Beta: user was not an admin"));

    // The stale relation is cleared even though nothing changed remotely.
    assert!(store.admin_channels().is_empty());
}

#[tokio::test]
async fn test_delete_admin_drops_the_record_despite_failures() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let (telegram_id, _, _) = seed_admin_with_three_channels(&store);
    gateway.script_demote(-100_002, Err(GatewayError::BotNotAdmin));

    let ctx = context(&store, gateway.clone());
    let report = AdminService::new(&ctx)
        .delete_admin_completely(telegram_id)
        .await
        .unwrap();

    assert_eq!(report.error_count(), 1);
    assert!(report.to_string().contains("admin record deleted"));
    assert!(store.admins().is_empty());
    assert!(store.admin_channels().is_empty());

    // The revocation list plus the final full-removal notice.
    let sent = gateway.sent_messages();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].1.contains("Alpha") && sent[0].1.contains("Gamma"));
    assert!(sent[1].1.contains("полностью отозван"));
}

#[tokio::test]
async fn test_unknown_admin_is_a_hard_failure() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let ctx = context(&store, gateway);

    let result = AdminService::new(&ctx)
        .remove_admin_rights_from_all_channels(TelegramId::new(404))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_promote_skips_existing_relations() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let telegram_id = TelegramId::new(777);
    let admin_id = store.seed_admin(TelegramAdmin::new(telegram_id));
    let alpha = seed_channel(&store, -100_001, "Alpha");
    let beta = seed_channel(&store, -100_002, "Beta");
    store.seed_admin_channel(admin_id, alpha);

    let ctx = context(&store, gateway.clone());
    let report = AdminService::new(&ctx)
        .promote_to_admin(telegram_id, &[alpha, beta])
        .await
        .unwrap();

    assert_eq!(report.success_count(), 1);
    assert_eq!(report.warning_count(), 1);
    let rendered = report.to_string();
    assert!(rendered.contains("Alpha: already an administrator"));
    assert!(rendered.contains("Beta: promoted"));

    let mut relations = store.admin_channels();
    relations.sort_unstable();
    assert_eq!(relations, vec![(admin_id, alpha), (admin_id, beta)]);

    // Only the fresh promotion is announced.
    let sent = gateway.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("Beta"));
}

#[tokio::test]
async fn test_ban_defaults_to_a_bounded_horizon() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let user_id = seed_member(&store, 555);
    let channel_id = seed_channel(&store, -100_001, "Alpha");

    let ctx = context(&store, gateway.clone());
    let before = Utc::now();
    let report = AdminService::new(&ctx)
        .ban_from_channel(user_id, channel_id, None)
        .await
        .unwrap();

    assert_eq!(report.success_count(), 1);
    assert!(report.to_string().contains("Alpha: banned until"));

    let subscriptions = store.subscriptions();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].state, SubscriptionState::Banned);
    let until = subscriptions[0].banned_until.unwrap();
    assert!(until >= before + Duration::hours(23));
    assert!(until <= Utc::now() + Duration::hours(25));

    let sent = gateway.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, 555);
}

#[tokio::test]
async fn test_ban_in_private_chat_still_updates_local_state() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let user_id = seed_member(&store, 555);
    let channel_id = seed_channel(&store, -100_001, "Alpha");
    gateway.script_ban(
        -100_001,
        Err(GatewayError::UnsupportedChatType("private".to_string())),
    );

    let ctx = context(&store, gateway);
    let report = AdminService::new(&ctx)
        .ban_from_channel(user_id, channel_id, None)
        .await
        .unwrap();

    // The restriction is skipped with a warning, but the admin decision
    // is authoritative for the subscription state.
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.success_count(), 1);
    assert_eq!(store.subscriptions()[0].state, SubscriptionState::Banned);
}

#[tokio::test]
async fn test_unban_restores_an_existing_subscription() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let user_id = seed_member(&store, 555);
    let channel_id = seed_channel(&store, -100_001, "Alpha");
    let mut subscription = ChannelSubscription::new(user_id, channel_id);
    subscription
        .transition(SubscriptionState::Banned, Some(Utc::now() + Duration::hours(1)))
        .unwrap();
    store.seed_subscription(subscription);

    let ctx = context(&store, gateway);
    let report = AdminService::new(&ctx)
        .unban_from_channel(user_id, channel_id)
        .await
        .unwrap();

    assert!(report.to_string().contains("Alpha: unbanned"));
    let subscriptions = store.subscriptions();
    assert_eq!(subscriptions[0].state, SubscriptionState::Active);
    assert!(subscriptions[0].banned_until.is_none());
}

#[tokio::test]
async fn test_unban_without_a_subscription_row_fails() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let user_id = seed_member(&store, 555);
    let channel_id = seed_channel(&store, -100_001, "Alpha");

    let ctx = context(&store, gateway);
    let result = AdminService::new(&ctx)
        .unban_from_channel(user_id, channel_id)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_kick_drops_the_subscription_row() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let user_id = seed_member(&store, 555);
    let channel_id = seed_channel(&store, -100_001, "Alpha");
    store.seed_subscription(ChannelSubscription::new(user_id, channel_id));

    let ctx = context(&store, gateway.clone());
    let report = AdminService::new(&ctx)
        .remove_from_channel(user_id, channel_id)
        .await
        .unwrap();

    assert!(report.to_string().contains("Alpha: removed"));
    assert!(store.subscriptions().is_empty());
    assert_eq!(gateway.sent_messages().len(), 1);
}

#[tokio::test]
async fn test_sync_refreshes_profile_but_never_subscription_state() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    let user_id = seed_member(&store, 555);
    let channel_id = seed_channel(&store, -100_001, "Alpha");
    let mut subscription = ChannelSubscription::new(user_id, channel_id);
    subscription
        .transition(SubscriptionState::Banned, Some(Utc::now() + Duration::hours(1)))
        .unwrap();
    store.seed_subscription(subscription);

    let telegram_id = TelegramId::new(555);
    gateway.script_member(
        -100_001,
        quizhub_telegram::ChatMemberInfo {
            user_id: telegram_id,
            username: Some("freshhandle".to_string()),
            first_name: "Fresh".to_string(),
            last_name: Some("Name".to_string()),
            is_premium: true,
            status: MemberStatus::Member,
            is_anonymous: false,
            can_promote_members: false,
            can_restrict_members: false,
        },
    );

    let ctx = context(&store, gateway);
    let report = AdminService::new(&ctx).sync_with_telegram(user_id).await.unwrap();

    assert_eq!(report.success_count(), 1);

    let chat_users = store.chat_users();
    assert_eq!(chat_users.len(), 1);
    assert_eq!(chat_users[0].username.as_deref(), Some("freshhandle"));
    assert_eq!(chat_users[0].first_name.as_deref(), Some("Fresh"));
    assert!(chat_users[0].is_premium);

    // The remote says "member", but admin actions stay authoritative.
    assert_eq!(store.subscriptions()[0].state, SubscriptionState::Banned);
}

#[tokio::test]
async fn test_permission_probe_reports_per_channel() {
    let store = InMemoryStore::new();
    let gateway = Arc::new(ScriptedGateway::new());
    seed_channel(&store, -100_001, "Alpha");
    seed_channel(&store, -100_002, "Beta");
    gateway.script_permissions(
        -100_002,
        quizhub_telegram::BotPermissions {
            is_admin: true,
            can_promote_members: false,
            can_restrict_members: false,
            can_invite_users: true,
        },
    );

    let ctx = context(&store, gateway);
    let report = AdminService::new(&ctx)
        .check_bot_permissions_in_channels()
        .await
        .unwrap();

    assert_eq!(report.success_count(), 1);
    assert_eq!(report.warning_count(), 1);
    let rendered = report.to_string();
    assert!(rendered.contains("Alpha: bot permissions ok"));
    assert!(rendered.contains("Beta: bot is an admin but lacks promote/restrict rights"));
}
