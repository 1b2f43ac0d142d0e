use serde::Serialize;

/// Category of a pre-flight validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Neither localhost nor a host name/package path identifies the target.
    NoSource,
    /// A required operation argument is empty or missing.
    MissingArgument,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub message: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// Append-only sink for validation errors, shared across one validation pass.
///
/// Errors are kept in insertion order and never removed, so a completed pass
/// reports every problem in the tree at once. One instance lives for exactly
/// one pass; the caller inspects `has_errors` to decide whether to execute.
#[derive(Debug, Default)]
pub struct Notification {
    errors: Vec<ValidationError>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

/// Outcome of validating one node.
///
/// The two flags are deliberately independent: `recorded_errors` says whether
/// the node appended anything to the notification, `stop_traversal` says
/// whether the node asked its caller to skip further local checks on it.
/// Callers aggregating children must never use `stop_traversal` to skip
/// siblings; error detection goes through the notification alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validation {
    pub recorded_errors: bool,
    pub stop_traversal: bool,
}

impl Validation {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn recorded() -> Self {
        Self {
            recorded_errors: true,
            stop_traversal: false,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            recorded_errors: self.recorded_errors || other.recorded_errors,
            stop_traversal: self.stop_traversal || other.stop_traversal,
        }
    }
}

/// Pre-flight validation contract.
///
/// Implementations must be pure with respect to execution state and must
/// report expected-invalid input through the notification instead of
/// panicking or returning an error.
pub trait Validate {
    fn validate(&self, notification: &mut Notification) -> Validation;
}
