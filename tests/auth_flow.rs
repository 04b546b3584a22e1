//! Session establishment: auto-provisioning, idempotent login, suspension,
//! the manual-email fallback, and restore-on-restart.

mod common;

use atelier::error::AuthError;
use atelier::models::{Role, UserPatch};
use atelier::settings::DefaultRole;
use atelier::AppState;

use common::{test_app, test_config, StubProvider};

#[tokio::test]
async fn unknown_email_provisions_exactly_one_user() {
    let (_dir, mut app) = test_app(test_config()).await;

    let user = app
        .auth
        .sign_in_with_email("new@agency.test", &mut app.store, &app.blob, &app.config)
        .expect("first sign-in");

    assert!(user.active);
    assert_eq!(user.role, Role::Editor);
    assert_eq!(user.name, "new");
    assert_eq!(app.store.users().len(), 1);

    let again = app
        .auth
        .sign_in_with_email("new@agency.test", &mut app.store, &app.blob, &app.config)
        .expect("second sign-in");

    assert_eq!(app.store.users().len(), 1);
    assert_eq!(again.id, user.id);
    assert!(again.last_login >= user.last_login);
}

#[tokio::test]
async fn admin_email_provisions_admin_and_default_role_is_configurable() {
    let mut config = test_config();
    config.default_role = DefaultRole::Client;
    let (_dir, mut app) = test_app(config).await;

    let admin = app
        .auth
        .sign_in_with_email("boss@agency.test", &mut app.store, &app.blob, &app.config)
        .unwrap();
    assert_eq!(admin.role, Role::Admin);

    app.auth.clear(&app.blob);
    let newcomer = app
        .auth
        .sign_in_with_email("viewer@brand.test", &mut app.store, &app.blob, &app.config)
        .unwrap();
    assert_eq!(newcomer.role, Role::Client);
}

#[tokio::test]
async fn suspended_account_cannot_sign_in() {
    let (_dir, mut app) = test_app(test_config()).await;

    let user = app
        .auth
        .sign_in_with_email("ed@agency.test", &mut app.store, &app.blob, &app.config)
        .unwrap();
    app.auth.clear(&app.blob);
    app.store.update_user(
        &user.id,
        UserPatch {
            active: Some(false),
            ..UserPatch::default()
        },
    );

    let err = app
        .auth
        .sign_in_with_email("ed@agency.test", &mut app.store, &app.blob, &app.config)
        .unwrap_err();
    assert!(matches!(err, AuthError::AccountSuspended { .. }));
    assert!(app.auth.current_user(&app.store).is_none());
    assert!(!app.auth.is_authenticated());
    // Suspension never deletes the record.
    assert_eq!(app.store.users().len(), 1);
}

#[tokio::test]
async fn provider_sign_in_provisions_from_profile() {
    let (_dir, mut app) = test_app(test_config()).await;
    let provider = StubProvider::with_email("stub@agency.test");

    let user = app
        .auth
        .sign_in_with_provider(&provider, &mut app.store, &app.blob, &app.config)
        .await
        .unwrap();

    assert_eq!(user.email, "stub@agency.test");
    assert_eq!(user.name, "Stub User");
    assert!(app.auth.current_user(&app.store).is_some());
}

#[tokio::test]
async fn unauthorized_domain_falls_back_to_manual_login() {
    let (_dir, mut app) = test_app(test_config()).await;
    let provider = StubProvider::unauthorized();

    let err = app
        .auth
        .sign_in_with_provider(&provider, &mut app.store, &app.blob, &app.config)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UnauthorizedDomain));
    assert!(!app.auth.is_authenticated());

    // The fallback branch: same gateway, manual email entry.
    app.auth
        .sign_in_with_email("fallback@agency.test", &mut app.store, &app.blob, &app.config)
        .unwrap();
    assert!(app.auth.is_authenticated());
}

#[tokio::test]
async fn provider_is_signed_out_when_account_is_suspended() {
    let (_dir, mut app) = test_app(test_config()).await;

    let user = app
        .auth
        .sign_in_with_email("gone@agency.test", &mut app.store, &app.blob, &app.config)
        .unwrap();
    app.auth.clear(&app.blob);
    app.store.update_user(
        &user.id,
        UserPatch {
            active: Some(false),
            ..UserPatch::default()
        },
    );

    let provider = StubProvider::with_email("gone@agency.test");
    let err = app
        .auth
        .sign_in_with_provider(&provider, &mut app.store, &app.blob, &app.config)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::AccountSuspended { .. }));
    assert!(provider.was_signed_out());
}

#[tokio::test]
async fn empty_email_is_rejected_at_the_input_boundary() {
    let (_dir, mut app) = test_app(test_config()).await;
    let err = app
        .auth
        .sign_in_with_email("   ", &mut app.store, &app.blob, &app.config)
        .unwrap_err();
    assert!(matches!(err, AuthError::MissingEmail));
}

#[tokio::test]
async fn session_restores_across_restart_unless_suspended() {
    let (dir, mut app) = test_app(test_config()).await;

    let user = app
        .auth
        .sign_in_with_email("back@agency.test", &mut app.store, &app.blob, &app.config)
        .unwrap();
    app.blob.sync().await.unwrap();
    drop(app);

    let app = AppState::init(dir.path(), test_config()).await.unwrap();
    let restored = app.auth.current_user(&app.store).expect("session restored");
    assert_eq!(restored.email, "back@agency.test");
    drop(app);

    // Suspend the account; the pointer must not be trusted on restart.
    let mut app = AppState::init(dir.path(), test_config()).await.unwrap();
    app.store.update_user(
        &user.id,
        UserPatch {
            active: Some(false),
            ..UserPatch::default()
        },
    );
    app.blob.sync().await.unwrap();
    drop(app);

    let app = AppState::init(dir.path(), test_config()).await.unwrap();
    assert!(app.auth.current_user(&app.store).is_none());
}
