use crate::context::ExecutionContext;
use crate::error::Result;
use crate::validation::{Notification, Validate, Validation};

/// One unit of deployment work: a name, a pre-flight check, and an execution
/// routine against the capabilities a host exposes.
///
/// The two phases have deliberately different aggregation rules. Validation
/// is exhaustive so one pass surfaces every misconfiguration; execution is
/// fail-fast because later steps usually depend on the side effects of
/// earlier ones. Each operation is validated once and executed at most once
/// per run.
pub trait Operation: Validate {
    /// Stable identifier used in logs and reports. Install-type operations
    /// additionally carry an idempotency key of their own.
    fn name(&self) -> &str;

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()>;
}

/// An operation built from an ordered list of child operations.
///
/// Children are appended during configuration and never reordered. The
/// composite owns them exclusively.
pub struct CompositeOperation {
    name: String,
    children: Vec<Box<dyn Operation>>,
}

impl CompositeOperation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, operation: Box<dyn Operation>) {
        self.children.push(operation);
    }

    pub fn with(mut self, operation: Box<dyn Operation>) -> Self {
        self.push(operation);
        self
    }

    pub fn children(&self) -> &[Box<dyn Operation>] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }
}

impl Validate for CompositeOperation {
    /// Validates every child unconditionally, in declaration order.
    ///
    /// A child's `stop_traversal` request never skips its siblings; both
    /// flags are ORed into the aggregate so the parent reports without
    /// suppressing anything a child recorded.
    fn validate(&self, notification: &mut Notification) -> Validation {
        let mut aggregate = Validation::clean();
        for child in &self.children {
            aggregate = aggregate.merge(child.validate(notification));
        }
        aggregate
    }
}

impl Operation for CompositeOperation {
    fn name(&self) -> &str {
        &self.name
    }

    /// Executes children sequentially in declaration order. The first
    /// failure propagates unchanged; remaining children do not run.
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()> {
        for child in &self.children {
            log_status!("run", "Executing '{}'", child.name());
            child.execute(ctx)?;
        }
        Ok(())
    }
}
