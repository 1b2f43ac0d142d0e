use crate::context::ExecutionContext;
use crate::error::Result;
use crate::operation::Operation;
use crate::validation::{Notification, Validate, Validation};

/// Toggle Windows features on the target.
///
/// Additions and removals accumulate during configuration and are applied in
/// one script call; an empty removal list is passed as `$null` so the feature
/// cmdlet skips the removal step.
#[derive(Default)]
pub struct WindowsFeatureOperation {
    features_to_add: Vec<String>,
    features_to_remove: Vec<String>,
}

impl WindowsFeatureOperation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feature(mut self, feature: impl Into<String>) -> Self {
        self.features_to_add.push(feature.into());
        self
    }

    pub fn remove_feature(mut self, feature: impl Into<String>) -> Self {
        self.features_to_remove.push(feature.into());
        self
    }

    fn script(&self) -> String {
        let add = self.features_to_add.join(",");
        let remove = if self.features_to_remove.is_empty() {
            "$null".to_string()
        } else {
            self.features_to_remove.join(",")
        };
        format!("Set-DeckhandWindowsFeatures {} {}", add, remove)
    }
}

impl Validate for WindowsFeatureOperation {
    // Feature toggling has no invalid configuration; an empty set is a no-op
    // on the cmdlet side.
    fn validate(&self, _notification: &mut Notification) -> Validation {
        Validation::clean()
    }
}

impl Operation for WindowsFeatureOperation {
    fn name(&self) -> &str {
        "Windows Feature Installer"
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()> {
        log_status!(
            "feature",
            "Applying feature changes: +[{}] -[{}]",
            self.features_to_add.join(","),
            self.features_to_remove.join(",")
        );
        ctx.run_script(&self.script())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_passes_null_for_empty_removals() {
        let operation = WindowsFeatureOperation::new()
            .add_feature("Web-Server")
            .add_feature("NET-Framework-45-ASPNET");

        assert_eq!(
            operation.script(),
            "Set-DeckhandWindowsFeatures Web-Server,NET-Framework-45-ASPNET $null"
        );
    }

    #[test]
    fn script_joins_removals_with_commas() {
        let operation = WindowsFeatureOperation::new()
            .add_feature("Web-Server")
            .remove_feature("Telnet-Client")
            .remove_feature("SMB1");

        assert_eq!(
            operation.script(),
            "Set-DeckhandWindowsFeatures Web-Server Telnet-Client,SMB1"
        );
    }

    #[test]
    fn validation_records_no_errors_even_when_empty() {
        let operation = WindowsFeatureOperation::new();
        let mut notification = Notification::new();
        let outcome = operation.validate(&mut notification);
        assert!(!notification.has_errors());
        assert_eq!(outcome, Validation::clean());
    }
}
