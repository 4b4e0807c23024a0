//! Session lifecycle against a live authority
//!
//! Login, persistence across processes, bearer propagation, logout, and
//! recovery from expired or foreign tokens.

mod common;

use hrportal_auth::{AuthFailure, CredentialStore, FileCredentialStore, SessionStatus};
use serde_json::Value;

use crate::common::{mint, now_secs, TestAuthority, ADMIN, EMPLOYEE};

#[test_log::test(tokio::test)]
async fn test_login_persists_token_and_sets_identity() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut session = authority.session();

    let identity = session.guard.login(ADMIN.0, ADMIN.1).await.unwrap();
    assert_eq!(identity.email, ADMIN.0);
    assert_eq!(identity.role.as_str(), "ADMIN");
    assert_eq!(session.guard.identity(), Some(&identity));

    let store = FileCredentialStore::new(authority.store_dir.path());
    let stored = store.get("hr_system_token").unwrap();
    assert_eq!(stored.as_deref(), session.guard.token());
}

#[test_log::test(tokio::test)]
async fn test_session_survives_restart() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut first = authority.session();
    let identity = first.guard.login(EMPLOYEE.0, EMPLOYEE.1).await.unwrap();

    let mut second = authority.session();
    assert_eq!(second.guard.status(), SessionStatus::Checking);
    assert!(second.guard.check_auth());
    assert_eq!(second.guard.identity(), Some(&identity));
}

#[test_log::test(tokio::test)]
async fn test_rejected_login_stores_nothing() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut session = authority.session();

    let err = session.guard.login(ADMIN.0, "wrong").await.unwrap_err();
    match &err {
        AuthFailure::Rejected { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(!session.guard.is_authenticated());

    let store = FileCredentialStore::new(authority.store_dir.path());
    assert_eq!(store.get("hr_system_token").unwrap(), None);
}

#[test_log::test(tokio::test)]
async fn test_unreachable_authority_is_transport_failure() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut config = authority.config();
    config.api_url = "http://127.0.0.1:1/api".to_string();
    let mut session = hrportal_app::PortalSession::from_config(&config);

    let err = session.guard.login(ADMIN.0, ADMIN.1).await.unwrap_err();
    assert!(matches!(err, AuthFailure::Transport(_)), "{:?}", err);
    assert!(!session.guard.is_authenticated());
}

#[test_log::test(tokio::test)]
async fn test_api_requests_carry_bearer_until_logout() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut session = authority.session();

    let body: Value = session.api.get_json("/whoami").await.unwrap();
    assert_eq!(body["authorization"], Value::Null);

    session.guard.login(ADMIN.0, ADMIN.1).await.unwrap();
    let token = session.guard.token().unwrap().to_string();
    let body: Value = session.api.get_json("/whoami").await.unwrap();
    assert_eq!(body["authorization"], format!("Bearer {}", token));

    session.guard.logout();
    let body: Value = session.api.get_json("/whoami").await.unwrap();
    assert_eq!(body["authorization"], Value::Null);

    let store = FileCredentialStore::new(authority.store_dir.path());
    assert_eq!(store.get("hr_system_token").unwrap(), None);
}

#[test_log::test(tokio::test)]
async fn test_expired_stored_token_is_removed() {
    let authority = TestAuthority::spawn().await.unwrap();
    let store = FileCredentialStore::new(authority.store_dir.path());
    store
        .set("hr_system_token", &mint("ADMIN", now_secs() - 60))
        .unwrap();

    let mut session = authority.session();
    assert!(!session.guard.check_auth());
    assert_eq!(session.guard.status(), SessionStatus::Anonymous);
    assert_eq!(store.get("hr_system_token").unwrap(), None);
    assert!(!session.api.authorization().is_set());
}

#[test_log::test(tokio::test)]
async fn test_garbage_stored_token_is_removed() {
    let authority = TestAuthority::spawn().await.unwrap();
    let store = FileCredentialStore::new(authority.store_dir.path());
    store.set("hr_system_token", "not-a-token").unwrap();

    let mut session = authority.session();
    assert!(!session.guard.check_auth());
    assert_eq!(store.get("hr_system_token").unwrap(), None);
}

#[test_log::test(tokio::test)]
async fn test_logout_is_idempotent() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut session = authority.session();

    session.guard.logout();
    session.guard.login(EMPLOYEE.0, EMPLOYEE.1).await.unwrap();
    session.guard.logout();
    session.guard.logout();

    assert_eq!(session.guard.status(), SessionStatus::Anonymous);
    assert!(!session.guard.check_auth());
}
