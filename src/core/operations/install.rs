use std::path::PathBuf;

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::operation::Operation;
use crate::utils::template::{self, TemplateVars};
use crate::validation::{Notification, Validate, Validation, ValidationError, ValidationErrorKind};

/// Where the installer package comes from: a file path on the machine
/// driving the deployment, or a URI the transport downloads from.
#[derive(Debug, Clone)]
pub enum PackageSource {
    LocalPath(PathBuf),
    Uri(String),
}

impl PackageSource {
    pub fn describe(&self) -> String {
        match self {
            PackageSource::LocalPath(path) => path.display().to_string(),
            PackageSource::Uri(uri) => uri.clone(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            PackageSource::LocalPath(path) => path.as_os_str().is_empty(),
            PackageSource::Uri(uri) => uri.trim().is_empty(),
        }
    }
}

/// Installer flavor: a Windows Installer package handed to msiexec, or a
/// self-contained executable with its own silent-install parameters.
#[derive(Debug, Clone)]
pub enum InstallerKind {
    Msi,
    Executable { params: String },
}

/// Extra arguments appended to the installer invocation.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    args: Vec<String>,
}

impl InstallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Everything a transport needs to install one package.
#[derive(Debug, Clone)]
pub struct PackageInstallation {
    pub package_name: String,
    pub source: PackageSource,
    pub installer: InstallerKind,
    pub options: InstallOptions,
}

/// Install an MSI or executable package on the target, skipping the install
/// when the package already reports present.
///
/// `package_name` is the idempotency key, matched against the target's
/// installed-package inventory before anything runs. It must stay identical
/// across runs: a name that drifts (or never matches what the installer
/// registers) makes every run reinstall the package.
pub struct InstallPackageOperation {
    name: String,
    installation: PackageInstallation,
}

impl InstallPackageOperation {
    pub fn msi(package_name: impl Into<String>, source: PackageSource) -> Self {
        Self::build(package_name.into(), source, InstallerKind::Msi)
    }

    pub fn executable(
        package_name: impl Into<String>,
        source: PackageSource,
        params: impl Into<String>,
    ) -> Self {
        Self::build(
            package_name.into(),
            source,
            InstallerKind::Executable {
                params: params.into(),
            },
        )
    }

    fn build(package_name: String, source: PackageSource, installer: InstallerKind) -> Self {
        Self {
            name: format!("Install {}", package_name),
            installation: PackageInstallation {
                package_name,
                source,
                installer,
                options: InstallOptions::default(),
            },
        }
    }

    pub fn options(mut self, options: InstallOptions) -> Self {
        self.installation.options = options;
        self
    }

    pub fn package_name(&self) -> &str {
        &self.installation.package_name
    }

    /// Render `{{package}}` / `{{source}}` placeholders in installer
    /// parameters and extra arguments.
    fn rendered_installation(&self) -> PackageInstallation {
        let source = self.installation.source.describe();
        let vars: [(&str, &str); 2] = [
            (TemplateVars::PACKAGE, self.installation.package_name.as_str()),
            (TemplateVars::SOURCE, source.as_str()),
        ];

        let mut rendered = self.installation.clone();
        if let InstallerKind::Executable { params } = &mut rendered.installer {
            *params = template::render(params, &vars);
        }
        rendered.options = self
            .installation
            .options
            .args()
            .iter()
            .fold(InstallOptions::new(), |acc, arg| {
                acc.arg(template::render(arg, &vars))
            });
        rendered
    }
}

impl Validate for InstallPackageOperation {
    fn validate(&self, notification: &mut Notification) -> Validation {
        let mut outcome = Validation::clean();

        if self.installation.package_name.trim().is_empty() {
            notification.add_error(ValidationError::new(
                ValidationErrorKind::MissingArgument,
                "No package name defined for install operation.",
            ));
            outcome = outcome.merge(Validation::recorded());
        }

        if self.installation.source.is_blank() {
            notification.add_error(ValidationError::new(
                ValidationErrorKind::MissingArgument,
                format!(
                    "No package source defined for '{}'.",
                    self.installation.package_name
                ),
            ));
            outcome = outcome.merge(Validation::recorded());
        }

        outcome
    }
}

impl Operation for InstallPackageOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()> {
        if ctx.is_package_installed(&self.installation.package_name)? {
            log_status!(
                "install",
                "'{}' already installed, skipping",
                self.installation.package_name
            );
            return Ok(());
        }

        ctx.install_package(&self.rendered_installation())
    }
}
