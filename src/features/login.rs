//! Login form: both fields required, nothing more

use crate::features::register::CredentialField;
use crate::features::{RequestIds, TextField};
use crate::messages::{ApiCall, NetworkCommand};
use crate::models::Credentials;

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
    pub show_password: bool,
    pub focus: CredentialField,
    pub username_error: Option<String>,
    pub password_error: Option<String>,
    pending: Option<u64>,
}

impl LoginForm {
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn owns(&self, id: u64) -> bool {
        self.pending == Some(id)
    }

    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focus {
            CredentialField::Username => &mut self.username,
            CredentialField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn submit(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        if self.pending.is_some() {
            return None;
        }
        self.username_error = self
            .username
            .is_blank()
            .then(|| "Username is required".to_string());
        self.password_error = self
            .password
            .value()
            .is_empty()
            .then(|| "Password is required".to_string());
        if self.username_error.is_some() || self.password_error.is_some() {
            return None;
        }

        let id = ids.next();
        self.pending = Some(id);
        Some(NetworkCommand::execute(
            id,
            ApiCall::Login(Credentials {
                username: self.username.value().trim().to_string(),
                password: self.password.value().to_string(),
            }),
        ))
    }

    pub fn settle(&mut self, id: u64) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forget typed credentials after a successful login
    pub fn reset(&mut self) {
        *self = LoginForm::default();
    }
}
