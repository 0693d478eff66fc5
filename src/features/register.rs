//! Registration form
//!
//! Field checks run locally before anything is sent; a form that fails
//! them never produces a network call.

use crate::constants::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::features::{RequestIds, TextField};
use crate::messages::{ApiCall, NetworkCommand};
use crate::models::Credentials;

/// Per-field validation messages
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Check registration input: username at least 3 chars, password at least 6
pub fn validate_registration(username: &str, password: &str) -> FieldErrors {
    let username_len = username.chars().count();
    let password_len = password.chars().count();

    FieldErrors {
        username: if username_len == 0 {
            Some("Username is required".to_string())
        } else if username_len < MIN_USERNAME_LEN {
            Some(format!(
                "Username must be at least {} characters long",
                MIN_USERNAME_LEN
            ))
        } else {
            None
        },
        password: if password_len == 0 {
            Some("Password is required".to_string())
        } else if password_len < MIN_PASSWORD_LEN {
            Some(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            ))
        } else {
            None
        },
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialField {
    #[default]
    Username,
    Password,
}

impl CredentialField {
    pub fn next(self) -> Self {
        match self {
            CredentialField::Username => CredentialField::Password,
            CredentialField::Password => CredentialField::Username,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub username: TextField,
    pub password: TextField,
    pub show_password: bool,
    pub focus: CredentialField,
    pub errors: FieldErrors,
    pending: Option<u64>,
}

impl RegisterForm {
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

    pub fn validate(&mut self) -> bool {
        self.errors = validate_registration(self.username.value(), self.password.value());
        self.errors.is_empty()
    }

    /// Validate, then build the register call.
    ///
    /// The caller dispatches the pending state on the auth slice.
    pub fn submit(&mut self, ids: &mut RequestIds) -> Option<NetworkCommand> {
        if self.pending.is_some() || !self.validate() {
            return None;
        }
        let id = ids.next();
        self.pending = Some(id);
        Some(NetworkCommand::execute(
            id,
            ApiCall::Register(Credentials {
                username: self.username.value().to_string(),
                password: self.password.value().to_string(),
            }),
        ))
    }

    /// The register call `id` settled
    pub fn settle(&mut self, id: u64) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        let errors = validate_registration("", "secret1");
        assert_eq!(errors.username.as_deref(), Some("Username is required"));
        assert_eq!(errors.password, None);

        let errors = validate_registration("ab", "secret1");
        assert_eq!(
            errors.username.as_deref(),
            Some("Username must be at least 3 characters long")
        );

        assert!(validate_registration("abc", "secret1").is_empty());
    }

    #[test]
    fn test_password_rules() {
        let errors = validate_registration("mira", "");
        assert_eq!(errors.password.as_deref(), Some("Password is required"));
        assert_eq!(errors.username, None);

        let errors = validate_registration("mira", "12345");
        assert_eq!(
            errors.password.as_deref(),
            Some("Password must be at least 6 characters long")
        );
        assert!(validate_registration("mira", "123456").is_empty());
    }

    #[test]
    fn test_lengths_count_chars() {
        assert!(validate_registration("ñoñ", "contraseña").is_empty());
    }

    #[test]
    fn test_invalid_form_never_emits_a_call() {
        let mut ids = RequestIds::default();
        let mut form = RegisterForm::default();
        form.username.set("ab");
        form.password.set("123");
        assert_eq!(form.submit(&mut ids), None);
        assert!(form.errors.username.is_some());
        assert!(form.errors.password.is_some());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_valid_form_emits_register() {
        let mut ids = RequestIds::default();
        let mut form = RegisterForm::default();
        form.username.set("mira");
        form.password.set("hunter22");

        let cmd = form.submit(&mut ids).unwrap();
        assert_eq!(
            cmd,
            NetworkCommand::Execute {
                id: 1,
                call: ApiCall::Register(Credentials {
                    username: "mira".into(),
                    password: "hunter22".into(),
                }),
            }
        );
        assert!(form.errors.is_empty());
        assert!(form.is_submitting());
        assert_eq!(form.submit(&mut ids), None);

        assert!(!form.settle(2));
        assert!(form.settle(1));
        assert!(!form.is_submitting());
    }
}
