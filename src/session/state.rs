//! Session state machine
//!
//! All session mutations flow through [`transition`]: a tagged event plus
//! an exhaustive match, so adding an event without deciding its effect is
//! a compile error. Transitions are all-or-nothing; no event leaves the
//! state partially updated.

use crate::models::Identity;

/// Authoritative "who is logged in" state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// Opaque bearer credential, present iff accepted and not yet proven
    /// expired
    pub token: Option<String>,
    pub authenticated: bool,
    /// True only while an authentication operation is in flight
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Session transitions
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A persisted token was read and decoded at startup
    RestoreSucceeded { token: String, identity: Identity },
    /// The persisted token failed to decode. Explicit error state,
    /// distinct from "no session".
    RestoreFailed { message: String },
    LoginStarted,
    LoginSucceeded { token: String, identity: Identity },
    /// Rolls back to the pre-request session with the failure recorded
    LoginFailed { message: String },
    LoggedOut,
    /// A request was answered with an unauthorized status
    Unauthorized,
}

/// Compute the next state. Pure; the caller swaps the result in under its
/// own lock.
pub fn transition(state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::RestoreSucceeded { token, identity }
        | SessionEvent::LoginSucceeded { token, identity } => SessionState {
            identity: Some(identity),
            token: Some(token),
            authenticated: true,
            loading: false,
            error: None,
        },
        SessionEvent::RestoreFailed { message } => SessionState {
            identity: None,
            token: None,
            authenticated: false,
            loading: false,
            error: Some(message),
        },
        SessionEvent::LoginStarted => SessionState {
            loading: true,
            error: None,
            ..state.clone()
        },
        SessionEvent::LoginFailed { message } => SessionState {
            loading: false,
            error: Some(message),
            ..state.clone()
        },
        SessionEvent::LoggedOut | SessionEvent::Unauthorized => SessionState::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn identity() -> Identity {
        Identity {
            id: 12,
            name: Some("Anne Martin".to_string()),
            email: "anne@example.org".to_string(),
            role: Role::Librarian,
        }
    }

    #[test]
    fn test_login_success_is_authenticated_with_no_error() {
        let state = transition(
            &SessionState::empty(),
            SessionEvent::LoginSucceeded {
                token: "t".to_string(),
                identity: identity(),
            },
        );
        assert!(state.authenticated);
        assert!(state.token.is_some());
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_login_failure_rolls_back_and_records_error() {
        let start = transition(&SessionState::empty(), SessionEvent::LoginStarted);
        assert!(start.loading);

        let state = transition(
            &start,
            SessionEvent::LoginFailed {
                message: "Invalid login or password".to_string(),
            },
        );
        assert!(!state.authenticated);
        assert!(state.token.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid login or password"));
        assert!(!state.loading);
    }

    #[test]
    fn test_restore_failure_is_distinct_from_no_session() {
        let state = transition(
            &SessionState::empty(),
            SessionEvent::RestoreFailed {
                message: "token expired".to_string(),
            },
        );
        assert!(!state.authenticated);
        assert!(state.error.is_some());
        assert_ne!(state, SessionState::empty());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let logged_in = transition(
            &SessionState::empty(),
            SessionEvent::LoginSucceeded {
                token: "t".to_string(),
                identity: identity(),
            },
        );
        let once = transition(&logged_in, SessionEvent::LoggedOut);
        let twice = transition(&once, SessionEvent::LoggedOut);
        assert_eq!(once, twice);
        assert_eq!(once, SessionState::empty());
    }

    #[test]
    fn test_unauthorized_clears_everything() {
        let logged_in = transition(
            &SessionState::empty(),
            SessionEvent::LoginSucceeded {
                token: "t".to_string(),
                identity: identity(),
            },
        );
        let state = transition(&logged_in, SessionEvent::Unauthorized);
        assert_eq!(state, SessionState::empty());
    }
}
