//! Access gate integration tests: navigation outcomes per role, login redirect
//! round trip, and the navigation menu derived from the policy table.

use std::sync::Arc;

use weconnect::gate::{post_login_destination, PublicPage, VIEW_POLICY};
use weconnect::identity::AcceptAnyPassword;
use weconnect::{AccessGate, MemoryStorage, MockDirectory, NavOutcome, Role, SessionStore, View};

fn gate() -> AccessGate {
    let store = SessionStore::new(
        Arc::new(MockDirectory::seeded()),
        Arc::new(AcceptAnyPassword::new()),
        Arc::new(MemoryStorage::new()),
    );
    AccessGate::new(store)
}

fn email_for(role: Role) -> String {
    MockDirectory::seeded()
        .identities()
        .iter()
        .find(|i| i.role == role)
        .map(|i| i.email.clone())
        .expect("seeded role")
}

async fn gate_as(role: Role) -> AccessGate {
    let g = gate();
    assert!(g.session().login(&email_for(role), "password").await);
    g
}

#[test]
fn unauthenticated_navigation_redirects_to_login_with_origin() {
    let g = gate();
    for view in View::all() {
        assert_eq!(
            g.navigate(view.path()),
            NavOutcome::RedirectLogin { from: view.path().to_string() }
        );
    }
}

#[tokio::test]
async fn login_round_trip_returns_to_requested_view() {
    let g = gate();
    let NavOutcome::RedirectLogin { from } = g.navigate("/clients") else {
        panic!("expected login redirect");
    };
    assert_eq!(from, "/clients");

    assert!(g.session().login("sender@weconnect.com", "x").await);
    let destination = post_login_destination(Some(from.as_str()));
    assert_eq!(destination, "/clients");
    assert_eq!(g.navigate(&destination), NavOutcome::Render { view: View::Clients });
}

#[tokio::test]
async fn viewer_is_refused_users_and_admin_is_not() {
    let viewer = gate_as(Role::Viewer).await;
    assert_eq!(viewer.navigate("/users"), NavOutcome::RedirectUnauthorized);

    let admin = gate_as(Role::Admin).await;
    assert_eq!(admin.navigate("/users"), NavOutcome::Render { view: View::Users });
}

#[tokio::test]
async fn outcomes_follow_policy_table_for_every_role() {
    for role in Role::ALL {
        let g = gate_as(role).await;
        for (view, required) in VIEW_POLICY {
            let expected = if required.is_empty() || required.contains(&role) {
                NavOutcome::Render { view: *view }
            } else {
                NavOutcome::RedirectUnauthorized
            };
            assert_eq!(g.navigate(view.path()), expected, "{} -> {:?}", role, view);
        }
    }
}

#[tokio::test]
async fn decisions_are_not_cached_across_logout_and_relogin() {
    let g = gate_as(Role::Admin).await;
    assert_eq!(g.navigate("/settings"), NavOutcome::Render { view: View::Settings });

    g.session().logout();
    assert_eq!(g.navigate("/settings"), NavOutcome::RedirectLogin { from: "/settings".into() });

    assert!(g.session().login("viewer@weconnect.com", "x").await);
    assert_eq!(g.navigate("/settings"), NavOutcome::RedirectUnauthorized);
}

#[tokio::test]
async fn public_pages_landing_and_unknown_paths() {
    let g = gate();
    assert_eq!(g.navigate("/"), NavOutcome::Public { page: PublicPage::Landing });
    assert_eq!(g.navigate("/login"), NavOutcome::Public { page: PublicPage::Login });
    assert_eq!(g.navigate("/unauthorized"), NavOutcome::Public { page: PublicPage::Unauthorized });
    assert_eq!(g.navigate("/reports"), NavOutcome::NotFound { path: "/reports".into() });

    assert!(g.session().login("db@weconnect.com", "x").await);
    assert_eq!(g.navigate("/"), NavOutcome::Redirect { to: "/dashboard".into() });
    assert_eq!(g.navigate("/login"), NavOutcome::Public { page: PublicPage::Login });
}

#[tokio::test]
async fn paths_are_normalized_before_lookup() {
    let g = gate_as(Role::MessageSender).await;
    assert_eq!(g.navigate("/messages/"), NavOutcome::Render { view: View::Messages });
    assert_eq!(g.navigate("/templates?id=3"), NavOutcome::Render { view: View::Templates });
    assert_eq!(g.navigate("/Messages"), NavOutcome::NotFound { path: "/Messages".into() });
}

#[tokio::test]
async fn menu_lists_permitted_views_in_order() {
    let g = gate();
    assert!(g.menu().is_empty());

    let cases: &[(Role, &[View])] = &[
        (Role::Admin, &[View::Dashboard, View::Clients, View::Messages, View::Templates, View::Calendar, View::Users, View::Settings]),
        (Role::MessageSender, &[View::Dashboard, View::Clients, View::Messages, View::Templates, View::Calendar]),
        (Role::DatabaseManager, &[View::Dashboard, View::Clients, View::Calendar]),
        (Role::Viewer, &[View::Dashboard, View::Calendar]),
    ];
    for (role, expected) in cases {
        let g = gate_as(*role).await;
        assert_eq!(g.menu(), expected.to_vec(), "{}", role);
    }
}
