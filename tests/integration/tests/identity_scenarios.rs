//! Social login scenarios over in-memory repositories

use chrono::Utc;

use integration_tests::{InMemoryStore, ScriptedOAuthClient};
use quizhub_common::auth::{compute_widget_hash, WidgetPayload};
use quizhub_core::entities::CanonicalUser;
use quizhub_core::value_objects::Provider;
use quizhub_identity::{
    LoginMeta, OAuthCallbackRequest, OAuthLoginService, ServiceContextBuilder, ServiceError,
    TelegramAuthService,
};

const BOT_TOKEN: &str = "12345:test-bot-token";

fn context(store: &InMemoryStore) -> quizhub_identity::ServiceContext {
    ServiceContextBuilder::new()
        .user_repo(store.user_repo())
        .social_account_repo(store.social_account_repo())
        .chat_user_repo(store.chat_user_repo())
        .admin_repo(store.admin_repo())
        .site_admin_repo(store.site_admin_repo())
        .mini_app_repo(store.mini_app_repo())
        .statistics_repo(store.statistics_repo())
        .login_session_repo(store.login_session_repo())
        .build()
        .unwrap()
}

fn signed_payload(id: i64, first_name: &str, username: &str) -> WidgetPayload {
    let mut payload = WidgetPayload {
        id,
        first_name: Some(first_name.to_string()),
        last_name: None,
        username: Some(username.to_string()),
        photo_url: None,
        auth_date: Utc::now().timestamp(),
        hash: String::new(),
    };
    payload.hash = compute_widget_hash(&payload, BOT_TOKEN);
    payload
}

fn callback_request() -> OAuthCallbackRequest {
    OAuthCallbackRequest {
        code: "auth-code".to_string(),
        state: "state-token".to_string(),
        expected_state: "state-token".to_string(),
    }
}

#[tokio::test]
async fn test_new_telegram_user_first_login() {
    let store = InMemoryStore::new();
    let ctx = context(&store);
    let service = TelegramAuthService::new(&ctx, BOT_TOKEN);

    let outcome = service
        .login(signed_payload(555, "Ada", "ada"), LoginMeta::default())
        .await
        .unwrap();

    assert!(outcome.is_new_user);
    assert_eq!(outcome.user.username, "ada");
    assert_eq!(outcome.user.telegram_id.map(i64::from), Some(555));
    assert!(outcome.user.is_telegram_user);
    assert!(!outcome.session_id.is_empty());

    let accounts = store.social_accounts();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].provider, Provider::Telegram);
    assert_eq!(accounts[0].provider_user_id, "555");
    assert_eq!(accounts[0].user_id, outcome.user.id);

    let sessions = store.login_sessions();
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].is_successful);
}

#[tokio::test]
async fn test_telegram_login_is_idempotent_for_known_user() {
    let store = InMemoryStore::new();
    let ctx = context(&store);
    let service = TelegramAuthService::new(&ctx, BOT_TOKEN);

    let first = service
        .login(signed_payload(555, "Ada", "ada"), LoginMeta::default())
        .await
        .unwrap();
    let second = service
        .login(signed_payload(555, "Ada", "ada"), LoginMeta::default())
        .await
        .unwrap();

    assert!(first.is_new_user);
    assert!(!second.is_new_user);
    assert_eq!(first.user.id, second.user.id);
    assert_eq!(store.users().len(), 1);
    assert_eq!(store.social_accounts().len(), 1);
}

#[tokio::test]
async fn test_tampered_widget_payload_is_rejected() {
    let store = InMemoryStore::new();
    let ctx = context(&store);
    let service = TelegramAuthService::new(&ctx, BOT_TOKEN);

    let mut payload = signed_payload(555, "Ada", "ada");
    payload.first_name = Some("Mallory".to_string());

    let err = service.login(payload, LoginMeta::default()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(_)));
    assert!(store.users().is_empty());
    assert!(store.login_sessions().is_empty());
}

#[tokio::test]
async fn test_github_login_links_existing_user_by_email() {
    let store = InMemoryStore::new();
    let mut alice = CanonicalUser::new("alice".to_string());
    alice.email = Some("alice@x.com".to_string());
    let alice_id = store.seed_user(alice);

    let ctx = context(&store);
    let mut client = ScriptedOAuthClient::new(Provider::Github, "99");
    client.profile.username = Some("alice99".to_string());
    client.profile.email = Some("alice@x.com".to_string());
    client.profile.first_name = Some("Alice".to_string());
    client.profile.last_name = Some("L".to_string());
    let service = OAuthLoginService::new(&ctx, &client);

    let outcome = service
        .login(&callback_request(), None, LoginMeta::default())
        .await
        .unwrap();

    assert!(!outcome.is_new_user);
    assert_eq!(outcome.user.id, alice_id);
    assert_eq!(store.users().len(), 1);

    let alice = &store.users()[0];
    assert_eq!(
        alice.social.github.as_deref(),
        Some("https://github.com/alice99")
    );
    assert_eq!(alice.first_name.as_deref(), Some("Alice"));
    assert_eq!(alice.last_name.as_deref(), Some("L"));

    let accounts = store.social_accounts();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].provider, Provider::Github);
    assert_eq!(accounts[0].provider_user_id, "99");
    assert_eq!(accounts[0].user_id, alice_id);
}

#[tokio::test]
async fn test_email_merge_never_overwrites_existing_names() {
    let store = InMemoryStore::new();
    let mut alice = CanonicalUser::new("alice".to_string());
    alice.email = Some("alice@x.com".to_string());
    alice.first_name = Some("Alicia".to_string());
    store.seed_user(alice);

    let ctx = context(&store);
    let mut client = ScriptedOAuthClient::new(Provider::Github, "99");
    client.profile.email = Some("alice@x.com".to_string());
    client.profile.first_name = Some("Alice".to_string());
    let service = OAuthLoginService::new(&ctx, &client);

    service
        .login(&callback_request(), None, LoginMeta::default())
        .await
        .unwrap();

    // Existing value wins; provider data fills gaps only.
    assert_eq!(store.users()[0].first_name.as_deref(), Some("Alicia"));
}

#[tokio::test]
async fn test_username_match_with_conflicting_email_creates_new_user() {
    let store = InMemoryStore::new();
    let mut bob = CanonicalUser::new("bob".to_string());
    bob.email = Some("bob@company.com".to_string());
    store.seed_user(bob);

    let ctx = context(&store);
    let mut client = ScriptedOAuthClient::new(Provider::Github, "42");
    client.profile.username = Some("Bob".to_string());
    client.profile.email = Some("bob@personal.net".to_string());
    let service = OAuthLoginService::new(&ctx, &client);

    let outcome = service
        .login(&callback_request(), None, LoginMeta::default())
        .await
        .unwrap();

    // Same username but a different asserted email: two people, no merge.
    assert!(outcome.is_new_user);
    assert_eq!(store.users().len(), 2);
    assert_ne!(outcome.user.username.to_lowercase(), "bob");
}

#[tokio::test]
async fn test_username_match_with_empty_email_is_adopted() {
    let store = InMemoryStore::new();
    let bob_id = store.seed_user(CanonicalUser::new("bob".to_string()));

    let ctx = context(&store);
    let mut client = ScriptedOAuthClient::new(Provider::Github, "42");
    client.profile.username = Some("Bob".to_string());
    client.profile.email = Some("bob@personal.net".to_string());
    let service = OAuthLoginService::new(&ctx, &client);

    let outcome = service
        .login(&callback_request(), None, LoginMeta::default())
        .await
        .unwrap();

    assert!(!outcome.is_new_user);
    assert_eq!(outcome.user.id, bob_id);
    assert_eq!(store.users().len(), 1);
    // The provider email filled the gap.
    assert_eq!(store.users()[0].email.as_deref(), Some("bob@personal.net"));
}

#[tokio::test]
async fn test_state_mismatch_fails_before_provider_traffic() {
    let store = InMemoryStore::new();
    let ctx = context(&store);
    let client = ScriptedOAuthClient::new(Provider::Google, "7");
    let service = OAuthLoginService::new(&ctx, &client);

    let request = OAuthCallbackRequest {
        code: "auth-code".to_string(),
        state: "attacker".to_string(),
        expected_state: "issued".to_string(),
    };
    let err = service
        .login(&request, None, LoginMeta::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(_)));
    assert!(store.users().is_empty());
}

#[tokio::test]
async fn test_inactive_matched_user_is_a_hard_failure() {
    let store = InMemoryStore::new();
    let mut ghost = CanonicalUser::new("ghost".to_string());
    ghost.email = Some("ghost@x.com".to_string());
    ghost.is_active = false;
    store.seed_user(ghost);

    let ctx = context(&store);
    let mut client = ScriptedOAuthClient::new(Provider::Github, "13");
    client.profile.email = Some("ghost@x.com".to_string());
    let service = OAuthLoginService::new(&ctx, &client);

    let err = service
        .login(&callback_request(), None, LoginMeta::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(quizhub_core::DomainError::InactiveUser)
    ));
    // No second user sprang up around the blocked account.
    assert_eq!(store.users().len(), 1);
}
