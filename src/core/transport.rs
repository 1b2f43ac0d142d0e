use std::path::Path;
use std::process::Command;

use crate::context::{CommandOutput, Transport};
use crate::error::{Error, Result};
use crate::operations::{InstallerKind, PackageInstallation, PackageSource};
use crate::target::RemoteOptions;
use crate::utils::powershell;

/// Transport for the local machine: scripts run in a local shell, copies go
/// through the filesystem, installers are invoked directly.
///
/// This covers the `is_local = true` half of the model. Remote transports
/// (WinRM, web-deployment agents) live outside this crate and plug in
/// through the [`Transport`] trait.
#[derive(Debug, Default)]
pub struct LocalShellTransport;

impl LocalShellTransport {
    pub fn new() -> Self {
        Self
    }
}

pub fn execute_local_command(command: &str) -> CommandOutput {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-NonInteractive", "-Command", command]);
        cmd
    };

    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    };

    match cmd.output() {
        Ok(out) => CommandOutput {
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
            success: out.status.success(),
            exit_code: out.status.code().unwrap_or(-1),
        },
        Err(e) => CommandOutput {
            stdout: String::new(),
            stderr: format!("Command error: {}", e),
            success: false,
            exit_code: -1,
        },
    }
}

fn copy_recursive(source: &Path, destination: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        std::fs::create_dir_all(destination)?;
        for entry in std::fs::read_dir(source)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &destination.join(entry.file_name()))?;
        }
    } else {
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, destination)?;
    }
    Ok(())
}

/// Build the installer invocation for a package staged at `path`.
fn install_command(installation: &PackageInstallation, path: &Path) -> String {
    let quoted_path = powershell::quote_path(&path.to_string_lossy());
    let extra = powershell::quote_args(installation.options.args());

    let mut command = match &installation.installer {
        InstallerKind::Msi => format!("msiexec /i {} /quiet /norestart", quoted_path),
        InstallerKind::Executable { params } => format!("{} {}", quoted_path, params),
    };

    if !extra.is_empty() {
        command.push(' ');
        command.push_str(&extra);
    }

    command
}

impl Transport for LocalShellTransport {
    fn run_command(&self, script: &str) -> CommandOutput {
        execute_local_command(script)
    }

    fn copy_file(
        &self,
        local_path: &Path,
        remote_path: &str,
        _options: &RemoteOptions,
    ) -> Result<()> {
        copy_recursive(local_path, Path::new(remote_path)).map_err(|e| {
            Error::remote_copy_failed(
                local_path.display().to_string(),
                remote_path.to_string(),
                e.to_string(),
            )
        })
    }

    fn install_package(
        &self,
        installation: &PackageInstallation,
        _options: &RemoteOptions,
    ) -> Result<()> {
        let path = match &installation.source {
            PackageSource::LocalPath(path) => path,
            PackageSource::Uri(uri) => {
                return Err(Error::remote_install_failed(
                    installation.package_name.clone(),
                    uri.clone(),
                    "URI package sources need a transport that can download",
                )
                .with_hint("Stage the package locally and use a LocalPath source"));
            }
        };

        let command = install_command(installation, path);
        log_status!("install", "Running installer: {}", command);

        let output = execute_local_command(&command);
        if !output.success {
            let error_detail = if output.stderr.is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            return Err(Error::remote_install_failed(
                installation.package_name.clone(),
                path.display().to_string(),
                format!("exit {}: {}", output.exit_code, error_detail),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::InstallOptions;
    use std::path::PathBuf;

    #[test]
    fn run_command_captures_stdout_and_exit() {
        let transport = LocalShellTransport::new();
        let output = transport.run_command("echo deckhand");
        assert!(output.success);
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.trim(), "deckhand");
    }

    #[test]
    fn run_command_reports_failure_exit() {
        let transport = LocalShellTransport::new();
        let output = transport.run_command("exit 3");
        assert!(!output.success);
        assert_eq!(output.exit_code, 3);
    }

    #[test]
    fn copy_file_creates_destination_parents() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("site.zip");
        std::fs::write(&source, b"payload").unwrap();
        let destination = dir.path().join("staging/deep/site.zip");

        let transport = LocalShellTransport::new();
        transport
            .copy_file(&source, &destination.to_string_lossy(), &RemoteOptions::default())
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"payload");
    }

    #[test]
    fn copy_file_syncs_directories_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("pkg");
        std::fs::create_dir_all(source.join("bin")).unwrap();
        std::fs::write(source.join("bin/app.dll"), b"dll").unwrap();
        let destination = dir.path().join("deployed");

        let transport = LocalShellTransport::new();
        transport
            .copy_file(&source, &destination.to_string_lossy(), &RemoteOptions::default())
            .unwrap();

        assert_eq!(std::fs::read(destination.join("bin/app.dll")).unwrap(), b"dll");
    }

    #[test]
    fn copy_file_surfaces_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let transport = LocalShellTransport::new();
        let err = transport
            .copy_file(
                &dir.path().join("missing.zip"),
                &dir.path().join("out.zip").to_string_lossy(),
                &RemoteOptions::default(),
            )
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::RemoteCopyFailed);
    }

    #[test]
    fn uri_source_is_rejected_with_hint() {
        let transport = LocalShellTransport::new();
        let installation = PackageInstallation {
            package_name: "7-Zip".to_string(),
            source: PackageSource::Uri("https://pkg.example/7z.msi".to_string()),
            installer: InstallerKind::Msi,
            options: InstallOptions::default(),
        };

        let err = transport
            .install_package(&installation, &RemoteOptions::default())
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::RemoteInstallFailed);
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn msi_command_uses_msiexec_with_quiet_flags() {
        let installation = PackageInstallation {
            package_name: "7-Zip".to_string(),
            source: PackageSource::LocalPath(PathBuf::from(r"C:\pkg\7z.msi")),
            installer: InstallerKind::Msi,
            options: InstallOptions::new().arg("/L*V").arg("install.log"),
        };

        let command = install_command(&installation, Path::new(r"C:\pkg\7z.msi"));
        assert_eq!(
            command,
            r"msiexec /i 'C:\pkg\7z.msi' /quiet /norestart /L*V install.log"
        );
    }

    #[test]
    fn executable_command_appends_params() {
        let installation = PackageInstallation {
            package_name: "Node.js".to_string(),
            source: PackageSource::LocalPath(PathBuf::from("node.exe")),
            installer: InstallerKind::Executable {
                params: "/S /norestart".to_string(),
            },
            options: InstallOptions::default(),
        };

        let command = install_command(&installation, Path::new("node.exe"));
        assert_eq!(command, "'node.exe' /S /norestart");
    }
}
