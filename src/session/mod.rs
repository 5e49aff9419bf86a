//! Session lifecycle
//!
//! Single source of truth for "who is logged in and with what
//! permissions". The [`Session`] handle is cheap to clone and shared by
//! the API client (which invalidates it on unauthorized responses) and
//! every front-end surface.

pub mod state;
pub mod store;
pub mod token;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use validator::Validate;

use crate::api::auth::{AuthApi, LoginRequest, RegisterRequest};
use crate::error::ApiResult;
use crate::models::{Identity, Role};

pub use state::{transition, SessionEvent, SessionState};
pub use store::{FileTokenStore, TokenStore};

struct Shared {
    state: RwLock<SessionState>,
    store: Box<dyn TokenStore>,
}

/// Shared session handle
#[derive(Clone)]
pub struct Session {
    shared: Arc<Shared>,
}

impl Session {
    /// Build the session by restoring any persisted token.
    ///
    /// A token that fails to decode (malformed or expired) moves the
    /// session into an explicit authentication-error state and clears the
    /// bad slot; continuing with a malformed identity would make every
    /// role check unsound.
    pub fn restore(store: Box<dyn TokenStore>) -> Self {
        let session = Session {
            shared: Arc::new(Shared {
                state: RwLock::new(SessionState::empty()),
                store,
            }),
        };

        match session.shared.store.load() {
            Ok(Some(raw)) => match token::decode_identity(&raw) {
                Ok(identity) => {
                    tracing::debug!(user = %identity.email, "session restored from persisted token");
                    session.apply(SessionEvent::RestoreSucceeded {
                        token: raw,
                        identity,
                    });
                }
                Err(e) => {
                    tracing::warn!("persisted token rejected: {}", e);
                    if let Err(clear_err) = session.shared.store.clear() {
                        tracing::warn!("failed to clear rejected token: {}", clear_err);
                    }
                    session.apply(SessionEvent::RestoreFailed {
                        message: e.user_message(),
                    });
                }
            },
            Ok(None) => {}
            Err(e) => {
                session.apply(SessionEvent::RestoreFailed {
                    message: e.user_message(),
                });
            }
        }

        session
    }

    pub(crate) fn apply(&self, event: SessionEvent) {
        let mut state = self
            .shared
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *state = transition(&state, event);
    }

    pub fn snapshot(&self) -> SessionState {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .identity
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .authenticated
    }

    pub fn error(&self) -> Option<String> {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .error
            .clone()
    }

    /// Membership check against the current identity's role.
    /// Always `false` when no identity is loaded.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        match self.identity() {
            Some(identity) => roles.contains(&identity.role),
            None => false,
        }
    }

    /// Forced logout on server-side session invalidation.
    ///
    /// Idempotent and safe under concurrent unauthorized responses: the
    /// check and the transition happen under one write lock, so duplicate
    /// calls collapse to a single effective state change. Returns whether
    /// this call performed the change.
    pub fn invalidate(&self) -> bool {
        let had_session = {
            let mut state = self
                .shared
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let had_session = state.authenticated || state.token.is_some();
            if had_session {
                *state = transition(&state, SessionEvent::Unauthorized);
            }
            had_session
        };

        if had_session {
            if let Err(e) = self.shared.store.clear() {
                tracing::warn!("failed to clear persisted token: {}", e);
            }
            tracing::warn!("session invalidated by unauthorized response");
        }
        had_session
    }

    /// Explicit logout. Idempotent: clearing an already-empty session is a
    /// no-op beyond the (already clear) persisted slot.
    pub fn logout(&self) {
        self.apply(SessionEvent::LoggedOut);
        if let Err(e) = self.shared.store.clear() {
            tracing::warn!("failed to clear persisted token: {}", e);
        }
        tracing::info!("logged out");
    }

    pub(crate) fn persist_token(&self, raw: &str) {
        // A session that cannot be persisted still works for this process;
        // it just will not survive a restart.
        if let Err(e) = self.shared.store.save(raw) {
            tracing::warn!("failed to persist token: {}", e);
        }
    }
}

/// Registration form, validated before any network call
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Authentication operations over the remote collaborator
#[derive(Clone)]
pub struct AuthService {
    api: AuthApi,
    session: Session,
}

impl AuthService {
    pub fn new(api: AuthApi, session: Session) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in with credentials.
    ///
    /// On success the identity is decoded from the returned bearer token
    /// (no extra round trip) and the token is persisted. On failure the
    /// session rolls back to its pre-request state with `error` set; the
    /// caller resubmits, nothing retries automatically.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Identity> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        self.session.apply(SessionEvent::LoginStarted);

        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.session.apply(SessionEvent::LoginFailed {
                    message: e.user_message(),
                });
                return Err(e);
            }
        };

        match token::decode_identity(&response.token) {
            Ok(identity) => {
                self.session.persist_token(&response.token);
                self.session.apply(SessionEvent::LoginSucceeded {
                    token: response.token,
                    identity: identity.clone(),
                });
                tracing::info!(user = %identity.email, role = %identity.role, "logged in");
                Ok(identity)
            }
            Err(e) => {
                // The server handed back a token the client cannot decode:
                // fatal, never continue with a malformed identity.
                self.session.apply(SessionEvent::LoginFailed {
                    message: e.user_message(),
                });
                Err(e)
            }
        }
    }

    /// Create a reader account. Never authenticates automatically.
    pub async fn register(&self, form: &RegisterForm) -> ApiResult<()> {
        form.validate()?;
        self.api
            .register(&RegisterRequest {
                name: form.name.clone(),
                email: form.email.clone(),
                password: form.password.clone(),
            })
            .await
    }

    /// Create a librarian account. Requires an admin session server-side.
    pub async fn register_librarian(&self, form: &RegisterForm) -> ApiResult<()> {
        form.validate()?;
        self.api
            .register_librarian(&RegisterRequest {
                name: form.name.clone(),
                email: form.email.clone(),
                password: form.password.clone(),
            })
            .await
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}
