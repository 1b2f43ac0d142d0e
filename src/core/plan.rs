use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::context::{ExecutionContext, PackageInventory, Transport};
use crate::error::{summarize_validation_errors, Error, Result};
use crate::operation::{CompositeOperation, Operation};
use crate::operations::{
    CopyPackageOperation, InstallPackageOperation, PackageSource, RunScriptOperation,
    WindowsFeatureOperation,
};
use crate::target::Target;
use crate::validation::{Notification, Validate, ValidationError};

/// Outcome of one operation within a run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Succeeded,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRunResult {
    pub name: String,
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationRunResult {
    fn succeeded(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: OperationStatus::Succeeded,
            error: None,
        }
    }

    fn failed(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            status: OperationStatus::Failed,
            error: Some(error),
        }
    }

    fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: OperationStatus::Skipped,
            error: None,
        }
    }
}

/// Overall outcome of a run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    Failed,
    ValidationFailed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub skipped: u32,
}

/// Serializable record of one deployment run: either the complete list of
/// validation problems (and no execution), or per-operation execution
/// results up to the first failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: Uuid,
    pub plan: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<ValidationError>,
    pub operations: Vec<OperationRunResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Succeeded
    }
}

/// Root of the deployment DSL: one target whose connection options are
/// resolved once, plus an ordered tree of operations.
///
/// Operations are appended through the builder methods; a run validates the
/// whole tree exhaustively, then executes it fail-fast only when validation
/// recorded nothing.
pub struct DeploymentPlan {
    name: String,
    target: Target,
    root: CompositeOperation,
}

impl DeploymentPlan {
    pub fn new(name: impl Into<String>, target: Target) -> Self {
        let name = name.into();
        Self {
            root: CompositeOperation::new(name.clone()),
            name,
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn run_script(self, name: impl Into<String>, script: impl Into<String>) -> Self {
        self.operation(Box::new(RunScriptOperation::new(name, script)))
    }

    pub fn copy_package(
        self,
        local_path: impl Into<std::path::PathBuf>,
        remote_path: impl Into<String>,
    ) -> Self {
        self.operation(Box::new(CopyPackageOperation::new(local_path, remote_path)))
    }

    pub fn windows_features(self, features: WindowsFeatureOperation) -> Self {
        self.operation(Box::new(features))
    }

    pub fn install_msi(self, package_name: impl Into<String>, source: PackageSource) -> Self {
        self.operation(Box::new(InstallPackageOperation::msi(package_name, source)))
    }

    pub fn install_executable(
        self,
        package_name: impl Into<String>,
        source: PackageSource,
        params: impl Into<String>,
    ) -> Self {
        self.operation(Box::new(InstallPackageOperation::executable(
            package_name,
            source,
            params,
        )))
    }

    pub fn install(self, operation: InstallPackageOperation) -> Self {
        self.operation(Box::new(operation))
    }

    /// Append an arbitrary operation (including a nested composite).
    pub fn operation(mut self, operation: Box<dyn Operation>) -> Self {
        self.root.push(operation);
        self
    }

    /// Run the exhaustive validation pass over target and operation tree,
    /// collecting every problem into one fresh notification.
    pub fn validate(&self) -> Notification {
        let mut notification = Notification::new();
        self.target.validate(&mut notification);
        self.root.validate(&mut notification);
        notification
    }

    /// Validate, then execute.
    ///
    /// When validation records anything, the report carries the complete
    /// error list and no operation executes. Otherwise top-level operations
    /// run in declaration order; the first failure is recorded with the
    /// failing operation's name and the rest are reported as skipped.
    pub fn run(
        &self,
        transport: &dyn Transport,
        inventory: &dyn PackageInventory,
    ) -> Result<RunReport> {
        if self.root.is_empty() {
            return Err(Error::validation_invalid_argument(
                "operations",
                "No operations configured for plan",
                Some(self.name.clone()),
                None,
            ));
        }

        let started_at = Utc::now();
        let notification = self.validate();

        if notification.has_errors() {
            log_status!(
                "run",
                "Validation failed for '{}': {}",
                self.name,
                summarize_validation_errors(notification.errors())
            );
            let operations: Vec<OperationRunResult> = self
                .root
                .children()
                .iter()
                .map(|op| OperationRunResult::skipped(op.name()))
                .collect();
            let summary = build_summary(&operations);
            return Ok(RunReport {
                run_id: Uuid::new_v4(),
                plan: self.name.clone(),
                started_at,
                finished_at: Utc::now(),
                status: RunStatus::ValidationFailed,
                validation_errors: notification.errors().to_vec(),
                operations,
                summary,
            });
        }

        let ctx = ExecutionContext::new(&self.target, transport, inventory);
        let mut operations: Vec<OperationRunResult> = Vec::with_capacity(self.root.len());
        let mut failed = false;

        for op in self.root.children() {
            if failed {
                operations.push(OperationRunResult::skipped(op.name()));
                continue;
            }

            log_status!("run", "Executing '{}'", op.name());
            match op.execute(&ctx) {
                Ok(()) => operations.push(OperationRunResult::succeeded(op.name())),
                Err(err) => {
                    log_status!("run", "'{}' failed: {}", op.name(), err);
                    operations.push(OperationRunResult::failed(op.name(), err.to_string()));
                    failed = true;
                }
            }
        }

        let summary = build_summary(&operations);
        Ok(RunReport {
            run_id: Uuid::new_v4(),
            plan: self.name.clone(),
            started_at,
            finished_at: Utc::now(),
            status: if failed {
                RunStatus::Failed
            } else {
                RunStatus::Succeeded
            },
            validation_errors: Vec::new(),
            operations,
            summary,
        })
    }
}

fn build_summary(operations: &[OperationRunResult]) -> RunSummary {
    let count = |status: OperationStatus| {
        operations.iter().filter(|r| r.status == status).count() as u32
    };
    RunSummary {
        total: operations.len() as u32,
        succeeded: count(OperationStatus::Succeeded),
        failed: count(OperationStatus::Failed),
        skipped: count(OperationStatus::Skipped),
    }
}
