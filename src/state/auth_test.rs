use super::*;
use crate::net::types::UserMetadata;
use uuid::Uuid;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
}

#[test]
fn auth_state_default_not_loading() {
    let state = AuthState::default();
    assert!(!state.loading);
}

#[test]
fn signed_in_holds_the_user() {
    let user = User {
        id: Uuid::from_u128(1),
        email: Some("a@b.com".to_owned()),
        user_metadata: UserMetadata::default(),
    };
    let state = AuthState::signed_in(user.clone());
    assert_eq!(state.user, Some(user));
    assert!(!state.loading);
}
