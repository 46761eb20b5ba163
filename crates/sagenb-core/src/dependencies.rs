//! Minimum-version gate for the notebook's SDK package.

use crate::error::{NotebookError, NotebookResult};
use crate::events::{EventSink, NotebookEvent};
use crate::pip::PackageManager;
use crate::restart::RestartSignal;
use crate::version::VersionTuple;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PACKAGE: &str = "sagemaker";
pub const DEFAULT_REQUIRED_VERSION: &str = "2.90.0";
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Package that must be installed at `required_version` or newer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRequirement {
    pub package: String,
    pub required_version: String,
}

impl Default for DependencyRequirement {
    fn default() -> Self {
        Self { package: DEFAULT_PACKAGE.to_string(), required_version: DEFAULT_REQUIRED_VERSION.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DependencyStatus {
    /// Installed version already meets the requirement.
    Satisfied { package: String, installed: String },
    /// The package was upgraded and a kernel restart was requested.
    Upgraded { package: String, previous: String, installed: String, installer_output: String },
}

impl DependencyStatus {
    pub fn restart_requested(&self) -> bool {
        matches!(self, Self::Upgraded { .. })
    }
}

/// Checks one requirement against a package manager and restarts the kernel
/// after an upgrade.
pub struct DependencyChecker<'a> {
    requirement: DependencyRequirement,
    packages: &'a dyn PackageManager,
    events: &'a dyn EventSink,
    restart: &'a dyn RestartSignal,
}

impl<'a> DependencyChecker<'a> {
    pub fn new(
        requirement: DependencyRequirement,
        packages: &'a dyn PackageManager,
        events: &'a dyn EventSink,
        restart: &'a dyn RestartSignal,
    ) -> Self {
        Self { requirement, packages, events, restart }
    }

    pub fn requirement(&self) -> &DependencyRequirement {
        &self.requirement
    }

    pub async fn check(&self) -> NotebookResult<DependencyStatus> {
        let DependencyRequirement { package, required_version } = &self.requirement;

        let installed = self.packages.installed_version(package).await?;
        let installed_tuple = VersionTuple::parse(&installed)?;
        let required_tuple = VersionTuple::parse(required_version)?;
        tracing::debug!(%package, %installed, required = %required_version, "comparing package versions");

        if installed_tuple >= required_tuple {
            return Ok(DependencyStatus::Satisfied { package: package.clone(), installed });
        }

        self.events.on_event(NotebookEvent::VersionMismatch {
            package: package.clone(),
            required: required_version.clone(),
            installed: installed.clone(),
        });

        let output = self.packages.install_exact(package, required_version).await?;
        let combined = output.combined();
        self.events.on_event(NotebookEvent::InstallerOutput { package: package.clone(), output: combined.clone() });

        if !output.success() {
            return Err(NotebookError::InstallFailed { status: output.status, output: combined });
        }
        tracing::info!(%package, from = %installed, to = %required_version, "package upgraded");

        self.events.on_event(NotebookEvent::RestartRequested);
        if self.restart.terminates_process() {
            self.events.on_event(NotebookEvent::RestartPending);
            self.restart.request_restart().await?;
        } else {
            self.restart.request_restart().await?;
            self.events.on_event(NotebookEvent::RestartPending);
        }

        Ok(DependencyStatus::Upgraded {
            package: package.clone(),
            previous: installed,
            installed: required_version.clone(),
            installer_output: combined,
        })
    }
}

/// One-shot form of [`DependencyChecker::check`].
pub async fn check_dependencies(
    requirement: DependencyRequirement,
    packages: &dyn PackageManager,
    events: &dyn EventSink,
    restart: &dyn RestartSignal,
) -> NotebookResult<DependencyStatus> {
    DependencyChecker::new(requirement, packages, events, restart).check().await
}
