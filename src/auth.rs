//! Global auth slice
//!
//! Holds the current user and token. State changes only through
//! [`AuthStore::dispatch`]; the transition itself is the pure [`reduce`].

use crate::models::{Session, User};
use crate::storage::SessionStore;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// A login or register call is in flight
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Everything that may change the auth slice
#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    /// Login or register sent
    Pending,
    /// Login or register succeeded
    Fulfilled(Session),
    /// Login or register failed with a message for the user
    Rejected(String),
    Logout,
    ClearError,
}

/// Pure reducer: `(AuthState, AuthAction) -> AuthState`
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Pending => AuthState {
            loading: true,
            error: None,
            ..state
        },
        AuthAction::Fulfilled(session) => AuthState {
            user: Some(session.user),
            token: Some(session.token),
            loading: false,
            error: None,
        },
        AuthAction::Rejected(message) => AuthState {
            loading: false,
            error: Some(message),
            ..state
        },
        AuthAction::Logout => AuthState::default(),
        AuthAction::ClearError => AuthState { error: None, ..state },
    }
}

/// Owner of the auth slice and its persisted copy
#[derive(Debug)]
pub struct AuthStore {
    state: AuthState,
    sessions: SessionStore,
}

impl AuthStore {
    /// Start from whatever session survived the last run
    pub fn restore(sessions: SessionStore) -> Self {
        let state = match sessions.load() {
            Ok(Some(session)) => {
                tracing::info!(user = %session.user.username, "Restored session");
                reduce(AuthState::default(), AuthAction::Fulfilled(session))
            }
            Ok(None) => AuthState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not restore session");
                AuthState::default()
            }
        };
        AuthStore { state, sessions }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Apply an action, then persist the result where it matters
    pub fn dispatch(&mut self, action: AuthAction) {
        let persist = match &action {
            AuthAction::Fulfilled(session) => self.sessions.save(session),
            AuthAction::Logout => self.sessions.clear(),
            _ => Ok(()),
        };
        if let Err(e) = persist {
            tracing::error!(error = %e, path = %self.sessions.path().display(), "Failed to persist session");
        }

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }
}
