pub mod copy;
pub mod feature;
pub mod install;
pub mod script;

pub use copy::CopyPackageOperation;
pub use feature::WindowsFeatureOperation;
pub use install::{
    InstallOptions, InstallPackageOperation, InstallerKind, PackageInstallation, PackageSource,
};
pub use script::RunScriptOperation;
