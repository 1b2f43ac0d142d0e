use serde::{Deserialize, Serialize};

use crate::validation::{Notification, Validate, Validation};

/// Username/password pair for a deployment target.
///
/// Credentials count as present only when the username is non-blank; an empty
/// username means the connection is anonymous no matter what the password
/// field contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_present(&self) -> bool {
        !self.username.trim().is_empty()
    }
}

impl Validate for Credentials {
    // Absent credentials are legal; a credential pair is never invalid on its own.
    fn validate(&self, _notification: &mut Notification) -> Validation {
        Validation::clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_username_is_not_present() {
        let credentials = Credentials::new("", "secret");
        assert!(!credentials.is_present());
    }

    #[test]
    fn whitespace_username_is_not_present() {
        let credentials = Credentials::new("   ", "secret");
        assert!(!credentials.is_present());
    }

    #[test]
    fn username_without_password_is_present() {
        let credentials = Credentials::new("deploy", "");
        assert!(credentials.is_present());
    }

    #[test]
    fn validate_never_records_errors() {
        let mut notification = Notification::new();
        let outcome = Credentials::default().validate(&mut notification);
        assert!(!notification.has_errors());
        assert_eq!(outcome, Validation::clean());
    }
}
