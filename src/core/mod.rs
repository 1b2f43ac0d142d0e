// Public modules
pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod operation;
pub mod operations;
pub mod plan;
pub mod target;
pub mod transport;
pub mod validation;

// Re-export common types for convenience
pub use context::{CommandOutput, ExecutionContext, PackageInventory, Transport};
pub use credentials::Credentials;
pub use error::{Error, ErrorCode, Result};
pub use operation::{CompositeOperation, Operation};
pub use operations::{
    CopyPackageOperation, InstallOptions, InstallPackageOperation, InstallerKind,
    PackageInstallation, PackageSource, RunScriptOperation, WindowsFeatureOperation,
};
pub use plan::{
    DeploymentPlan, OperationRunResult, OperationStatus, RunReport, RunStatus, RunSummary,
};
pub use target::{RemoteOptions, Target};
pub use validation::{Notification, Validate, Validation, ValidationError, ValidationErrorKind};
