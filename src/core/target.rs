use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::validation::{Notification, Validate, Validation, ValidationError, ValidationErrorKind};

/// Host description for one deployment: local or remote, optionally
/// credentialed, optionally pointing at a package path on that host.
///
/// Built during plan configuration, read-only from the moment a run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default = "default_is_local")]
    pub is_local: bool,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub package_path: Option<String>,
    #[serde(default)]
    pub encryption_secret: Option<String>,
}

fn default_is_local() -> bool {
    true
}

impl Default for Target {
    fn default() -> Self {
        Self::local()
    }
}

/// Transport-agnostic connection options resolved from a [`Target`].
///
/// Only the fields the target actually carries are populated: host only for
/// remote targets, username/password only when credentials are present, the
/// encryption secret only when one is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_secret: Option<String>,
}

impl Target {
    pub fn local() -> Self {
        Self {
            is_local: true,
            host: None,
            credentials: Credentials::default(),
            package_path: None,
            encryption_secret: None,
        }
    }

    pub fn remote(host: impl Into<String>) -> Self {
        Self {
            is_local: false,
            host: Some(host.into()),
            ..Self::local()
        }
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    pub fn package_path(mut self, path: impl Into<String>) -> Self {
        self.package_path = Some(path.into());
        self
    }

    pub fn encryption_secret(mut self, secret: impl Into<String>) -> Self {
        self.encryption_secret = Some(secret.into());
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_present()
    }

    pub fn has_encryption_secret(&self) -> bool {
        !blank(&self.encryption_secret)
    }

    /// Build the connection options handed to the transport.
    ///
    /// Assumes validation already passed; there is no error path here.
    pub fn resolved_options(&self) -> RemoteOptions {
        let mut options = RemoteOptions::default();

        if !self.is_local {
            options.host = self.host.clone();
        }

        if self.has_credentials() {
            options.username = Some(self.credentials.username.clone());
            options.password = Some(self.credentials.password.clone());
        }

        if self.has_encryption_secret() {
            options.encryption_secret = self.encryption_secret.clone();
        }

        options
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

impl Validate for Target {
    /// A local target always passes the host/path check; a remote target
    /// needs at least one of host name or package path.
    ///
    /// `stop_traversal` is raised exactly when the `NoSource` error fires.
    /// That flag is a flow signal for this node's remaining local checks only;
    /// callers detect errors through the notification, never through the flag.
    fn validate(&self, notification: &mut Notification) -> Validation {
        let outcome = self.credentials.validate(notification);

        if !self.is_local && blank(&self.host) && blank(&self.package_path) {
            notification.add_error(ValidationError::new(
                ValidationErrorKind::NoSource,
                "Neither localhost nor a host name is defined for the target.",
            ));
            return outcome.merge(Validation {
                recorded_errors: true,
                stop_traversal: true,
            });
        }

        outcome
    }
}
