//! Route gating end to end: anonymous redirects, role checks, return paths

mod common;

use hrportal_app::{Navigation, Page};

use crate::common::{TestAuthority, ADMIN, EMPLOYEE, HR_ADMIN};

#[test_log::test(tokio::test)]
async fn test_anonymous_redirected_then_returned_after_login() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut session = authority.session();

    let outcome = session.navigator.navigate(&mut session.guard, "/leave");
    assert_eq!(
        outcome,
        Navigation::Redirected {
            requested: "/leave".to_string(),
            to: "/login".to_string(),
            page: Page::Login,
        }
    );

    let outcome = session
        .navigator
        .login(&mut session.guard, EMPLOYEE.0, EMPLOYEE.1)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Navigation::Rendered {
            path: "/leave".to_string(),
            page: Page::Leave,
        }
    );
}

#[test_log::test(tokio::test)]
async fn test_hr_page_by_role() {
    let authority = TestAuthority::spawn().await.unwrap();

    for ((email, password), expected) in [
        (ADMIN, Page::Hr),
        (HR_ADMIN, Page::Hr),
        (EMPLOYEE, Page::Unauthorized),
    ] {
        let store_dir = tempfile::tempdir().unwrap();
        let mut session = hrportal_app::PortalSession::from_config(
            &authority.config_for(store_dir.path()),
        );
        session
            .navigator
            .login(&mut session.guard, email, password)
            .await
            .unwrap();

        let outcome = session.navigator.navigate(&mut session.guard, "/hr");
        assert_eq!(outcome.page(), Some(expected), "{}", email);
    }
}

#[test_log::test(tokio::test)]
async fn test_logout_locks_protected_pages() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut session = authority.session();
    session
        .navigator
        .login(&mut session.guard, ADMIN.0, ADMIN.1)
        .await
        .unwrap();

    let outcome = session.navigator.navigate(&mut session.guard, "/settings");
    assert_eq!(outcome.page(), Some(Page::Settings));

    let outcome = session.navigator.logout(&mut session.guard);
    assert_eq!(outcome.location(), "/login");

    let outcome = session.navigator.navigate(&mut session.guard, "/settings");
    assert_eq!(outcome.location(), "/login");
}

#[test_log::test(tokio::test)]
async fn test_new_process_reuses_stored_session() {
    let authority = TestAuthority::spawn().await.unwrap();
    let mut first = authority.session();
    first
        .navigator
        .login(&mut first.guard, HR_ADMIN.0, HR_ADMIN.1)
        .await
        .unwrap();

    let mut second = authority.session();
    let outcome = second.navigator.navigate(&mut second.guard, "/hr");
    assert_eq!(outcome.page(), Some(Page::Hr));
}
