use std::path::{Path, PathBuf};

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::operation::Operation;
use crate::validation::{Notification, Validate, Validation, ValidationError, ValidationErrorKind};

/// Sync a package (file or directory) from the local machine to a path on
/// the target.
pub struct CopyPackageOperation {
    name: String,
    local_path: PathBuf,
    remote_path: String,
}

impl CopyPackageOperation {
    pub fn new(local_path: impl Into<PathBuf>, remote_path: impl Into<String>) -> Self {
        let local_path = local_path.into();
        let name = format!("Copy package {}", local_path.display());
        Self {
            name,
            local_path,
            remote_path: remote_path.into(),
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }
}

impl Validate for CopyPackageOperation {
    fn validate(&self, notification: &mut Notification) -> Validation {
        let mut outcome = Validation::clean();

        if self.local_path.as_os_str().is_empty() {
            notification.add_error(ValidationError::new(
                ValidationErrorKind::MissingArgument,
                "No package path defined for copy operation.",
            ));
            outcome = outcome.merge(Validation::recorded());
        }

        if self.remote_path.trim().is_empty() {
            notification.add_error(ValidationError::new(
                ValidationErrorKind::MissingArgument,
                "No destination path defined for copy operation.",
            ));
            outcome = outcome.merge(Validation::recorded());
        }

        outcome
    }
}

impl Operation for CopyPackageOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()> {
        log_status!(
            "copy",
            "Uploading {} -> {}",
            self.local_path.display(),
            self.remote_path
        );
        ctx.copy_file(&self.local_path, &self.remote_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_local_path_records_missing_argument() {
        let operation = CopyPackageOperation::new("", r"C:\inetpub\site");
        let mut notification = Notification::new();
        let outcome = operation.validate(&mut notification);

        assert_eq!(notification.errors().len(), 1);
        assert!(outcome.recorded_errors);
    }

    #[test]
    fn empty_remote_path_records_missing_argument() {
        let operation = CopyPackageOperation::new("dist/site.zip", "  ");
        let mut notification = Notification::new();
        operation.validate(&mut notification);
        assert_eq!(notification.errors().len(), 1);
    }

    #[test]
    fn both_paths_empty_records_both_errors() {
        let operation = CopyPackageOperation::new("", "");
        let mut notification = Notification::new();
        operation.validate(&mut notification);
        assert_eq!(notification.errors().len(), 2);
    }

    #[test]
    fn configured_operation_is_valid() {
        let operation = CopyPackageOperation::new("dist/site.zip", r"C:\inetpub\site");
        let mut notification = Notification::new();
        operation.validate(&mut notification);
        assert!(!notification.has_errors());
        assert_eq!(operation.name(), "Copy package dist/site.zip");
    }
}
