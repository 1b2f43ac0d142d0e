use std::path::Path;

use crate::error::{Error, RemoteCommandFailedDetails, Result};
use crate::operations::PackageInstallation;
use crate::target::{RemoteOptions, Target};

/// Captured result of one script run on the target.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

/// Capability surface a transport layer supplies to operations.
///
/// Implementations must report success/failure per call; a non-zero exit or
/// failed transfer must never be swallowed into a success result.
pub trait Transport {
    fn run_command(&self, script: &str) -> CommandOutput;

    fn copy_file(
        &self,
        local_path: &Path,
        remote_path: &str,
        options: &RemoteOptions,
    ) -> Result<()>;

    fn install_package(
        &self,
        installation: &PackageInstallation,
        options: &RemoteOptions,
    ) -> Result<()>;
}

/// Query capability backing install idempotency checks.
pub trait PackageInventory {
    fn is_package_installed(&self, identity: &str) -> Result<bool>;
}

/// Everything an operation may touch while executing: the connection options
/// resolved once from the target, plus the transport and inventory
/// capabilities supplied by the caller.
pub struct ExecutionContext<'a> {
    options: RemoteOptions,
    transport: &'a dyn Transport,
    inventory: &'a dyn PackageInventory,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        target: &Target,
        transport: &'a dyn Transport,
        inventory: &'a dyn PackageInventory,
    ) -> Self {
        Self {
            options: target.resolved_options(),
            transport,
            inventory,
        }
    }

    pub fn options(&self) -> &RemoteOptions {
        &self.options
    }

    /// Run a script on the target, converting a failed exit into a typed
    /// error so callers cannot ignore it.
    pub fn run_script(&self, script: &str) -> Result<CommandOutput> {
        let output = self.transport.run_command(script);
        if !output.success {
            return Err(Error::remote_command_failed(RemoteCommandFailedDetails {
                command: script.to_string(),
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
                host: self.options.host.clone(),
            }));
        }
        Ok(output)
    }

    pub fn copy_file(&self, local_path: &Path, remote_path: &str) -> Result<()> {
        self.transport.copy_file(local_path, remote_path, &self.options)
    }

    pub fn install_package(&self, installation: &PackageInstallation) -> Result<()> {
        self.transport.install_package(installation, &self.options)
    }

    pub fn is_package_installed(&self, identity: &str) -> Result<bool> {
        self.inventory.is_package_installed(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    struct FixedTransport {
        output: CommandOutput,
    }

    impl Transport for FixedTransport {
        fn run_command(&self, _script: &str) -> CommandOutput {
            self.output.clone()
        }

        fn copy_file(&self, _l: &Path, _r: &str, _o: &RemoteOptions) -> Result<()> {
            Ok(())
        }

        fn install_package(&self, _i: &PackageInstallation, _o: &RemoteOptions) -> Result<()> {
            Ok(())
        }
    }

    struct NoInventory;

    impl PackageInventory for NoInventory {
        fn is_package_installed(&self, _identity: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn run_script_surfaces_failed_exit_as_error() {
        let transport = FixedTransport {
            output: CommandOutput {
                stdout: "partial".to_string(),
                stderr: "boom".to_string(),
                success: false,
                exit_code: 3,
            },
        };
        let inventory = NoInventory;
        let ctx = ExecutionContext::new(&Target::remote("web01"), &transport, &inventory);

        let err = ctx.run_script("Get-Service").unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteCommandFailed);
        assert_eq!(err.details["exitCode"], 3);
        assert_eq!(err.details["stderr"], "boom");
        assert_eq!(err.details["host"], "web01");
    }

    #[test]
    fn run_script_passes_through_successful_output() {
        let transport = FixedTransport {
            output: CommandOutput {
                stdout: "ok".to_string(),
                stderr: String::new(),
                success: true,
                exit_code: 0,
            },
        };
        let inventory = NoInventory;
        let ctx = ExecutionContext::new(&Target::local(), &transport, &inventory);

        let output = ctx.run_script("Get-Service").unwrap();
        assert_eq!(output.stdout, "ok");
    }

    #[test]
    fn context_resolves_options_once_from_target() {
        let transport = FixedTransport {
            output: CommandOutput {
                stdout: String::new(),
                stderr: String::new(),
                success: true,
                exit_code: 0,
            },
        };
        let inventory = NoInventory;
        let target = Target::remote("web01").credentials("deploy", "pw");
        let ctx = ExecutionContext::new(&target, &transport, &inventory);

        assert_eq!(ctx.options().host.as_deref(), Some("web01"));
        assert_eq!(ctx.options().username.as_deref(), Some("deploy"));
    }
}
