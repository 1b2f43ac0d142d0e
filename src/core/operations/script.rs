use crate::context::ExecutionContext;
use crate::error::Result;
use crate::operation::Operation;
use crate::validation::{Notification, Validate, Validation, ValidationError, ValidationErrorKind};

/// Run an arbitrary script on the target.
pub struct RunScriptOperation {
    name: String,
    script: String,
}

impl RunScriptOperation {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
        }
    }
}

impl Validate for RunScriptOperation {
    fn validate(&self, notification: &mut Notification) -> Validation {
        if self.script.trim().is_empty() {
            notification.add_error(ValidationError::new(
                ValidationErrorKind::MissingArgument,
                format!("No script defined for '{}'.", self.name),
            ));
            return Validation::recorded();
        }
        Validation::clean()
    }
}

impl Operation for RunScriptOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()> {
        let output = ctx.run_script(&self.script)?;
        let trimmed = output.stdout.trim();
        if !trimmed.is_empty() {
            log_status!("shell", "{}", trimmed);
        }
        Ok(())
    }
}
