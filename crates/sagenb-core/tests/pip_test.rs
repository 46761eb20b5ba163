//! pip-backed dependency checks against a fake interpreter.
#![cfg(unix)]

use sagenb_core::{
    check_dependencies, DependencyRequirement, DependencyStatus, NoRestart, NotebookError, PackageManager,
    PipPackageManager, TracingEventSink,
};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

static SERIAL: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Answers `-m pip show` with `{installed}` and `-m pip install` with `{status}`.
const FAKE_PYTHON: &str = r#"#!/bin/sh
echo "$@" >> "{dir}/calls.log"
if [ "$1 $2 $3" = "-m pip show" ]; then
  if [ "{installed}" = "missing" ]; then
    echo "WARNING: Package(s) not found: $4" >&2
    exit 1
  fi
  printf 'Name: %s\nVersion: %s\nSummary: fake\n' "$4" "{installed}"
  exit 0
fi
if [ "$1 $2 $3 $4" = "-m pip install -U" ]; then
  echo "Collecting $5"
  echo "Successfully installed $5"
  echo "WARNING: Running pip as the 'root' user" >&2
  exit {status}
fi
exit 2
"#;

fn install_fake_python(dir: &Path, installed: &str, status: i32) -> PathBuf {
    let path = dir.join("python");
    let script = FAKE_PYTHON
        .replace("{dir}", &dir.display().to_string())
        .replace("{installed}", installed)
        .replace("{status}", &status.to_string());
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_installed_version_reads_pip_show() {
    let _guard = SERIAL.lock().await;
    let temp = TempDir::new().unwrap();
    let pip = PipPackageManager::new(install_fake_python(temp.path(), "2.91.1", 0).display().to_string());

    assert_eq!(pip.installed_version("sagemaker").await.unwrap(), "2.91.1");
    assert_eq!(calls(temp.path()), vec!["-m pip show sagemaker".to_string()]);
}

#[tokio::test]
async fn test_missing_package_is_environment_error() {
    let _guard = SERIAL.lock().await;
    let temp = TempDir::new().unwrap();
    let pip = PipPackageManager::new(install_fake_python(temp.path(), "missing", 0).display().to_string());

    let err = pip.installed_version("sagemaker").await.unwrap_err();
    assert!(matches!(err, NotebookError::Environment(ref msg) if msg.contains("not installed")));
}

#[tokio::test]
async fn test_upgrade_runs_pinned_install() {
    let _guard = SERIAL.lock().await;
    let temp = TempDir::new().unwrap();
    let pip = PipPackageManager::new(install_fake_python(temp.path(), "2.50.0", 0).display().to_string());

    let requirement = DependencyRequirement::default();
    let status = check_dependencies(requirement, &pip, &TracingEventSink, &NoRestart).await.unwrap();

    match status {
        DependencyStatus::Upgraded { previous, installed, installer_output, .. } => {
            assert_eq!(previous, "2.50.0");
            assert_eq!(installed, "2.90.0");
            assert_eq!(
                installer_output,
                "Collecting sagemaker==2.90.0\nSuccessfully installed sagemaker==2.90.0\nWARNING: Running pip as the 'root' user\n"
            );
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(
        calls(temp.path()),
        vec!["-m pip show sagemaker".to_string(), "-m pip install -U sagemaker==2.90.0".to_string()]
    );
}

#[tokio::test]
async fn test_installer_failure_is_reported() {
    let _guard = SERIAL.lock().await;
    let temp = TempDir::new().unwrap();
    let pip = PipPackageManager::new(install_fake_python(temp.path(), "2.50.0", 1).display().to_string());

    let err = check_dependencies(DependencyRequirement::default(), &pip, &TracingEventSink, &NoRestart)
        .await
        .unwrap_err();
    match err {
        NotebookError::InstallFailed { status, output } => {
            assert_eq!(status, Some(1));
            assert!(output.contains("Successfully installed sagemaker==2.90.0"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_current_package_is_not_reinstalled() {
    let _guard = SERIAL.lock().await;
    let temp = TempDir::new().unwrap();
    let pip = PipPackageManager::new(install_fake_python(temp.path(), "2.90.0", 0).display().to_string());

    let status = check_dependencies(DependencyRequirement::default(), &pip, &TracingEventSink, &NoRestart)
        .await
        .unwrap();
    assert!(!status.restart_requested());
    assert_eq!(calls(temp.path()).len(), 1);
}
