//! Dependency checker behavior with recording doubles.

use async_trait::async_trait;
use sagenb_core::{
    check_dependencies, DependencyChecker, DependencyRequirement, DependencyStatus, EventSink, InstallOutput,
    NotebookError, NotebookEvent, NotebookResult, PackageManager, RestartSignal,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

struct FakePackages {
    installed: String,
    install_status: Option<i32>,
    installs: Mutex<Vec<(String, String)>>,
}

impl FakePackages {
    fn installed(version: &str) -> Self {
        Self { installed: version.to_string(), install_status: Some(0), installs: Mutex::new(Vec::new()) }
    }

    fn failing_install(mut self) -> Self {
        self.install_status = Some(1);
        self
    }

    fn installs(&self) -> Vec<(String, String)> {
        self.installs.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageManager for FakePackages {
    async fn installed_version(&self, _package: &str) -> NotebookResult<String> {
        Ok(self.installed.clone())
    }

    async fn install_exact(&self, package: &str, version: &str) -> NotebookResult<InstallOutput> {
        self.installs.lock().unwrap().push((package.to_string(), version.to_string()));
        let ok = self.install_status == Some(0);
        Ok(InstallOutput {
            command: format!("python3 -m pip install -U {package}=={version}"),
            status: self.install_status,
            stdout: if ok { format!("Successfully installed {package}-{version}\n") } else { String::new() },
            stderr: if ok { String::new() } else { "ERROR: No matching distribution found\n".to_string() },
        })
    }
}

#[derive(Default)]
struct CountingRestart {
    calls: AtomicUsize,
}

#[async_trait]
impl RestartSignal for CountingRestart {
    fn id(&self) -> &'static str {
        "counting"
    }

    async fn request_restart(&self) -> NotebookResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct NoKernel;

#[async_trait]
impl RestartSignal for NoKernel {
    fn id(&self) -> &'static str {
        "no-kernel"
    }

    async fn request_restart(&self) -> NotebookResult<()> {
        Err(NotebookError::Environment("no interactive kernel".to_string()))
    }
}

/// Stands in for a restart that ends the process: records which events the
/// sink had seen by the time the restart was requested.
struct TerminatingRestart<'a> {
    sink: &'a RecordingSink,
    seen_at_restart: Mutex<Option<Vec<NotebookEvent>>>,
}

#[async_trait]
impl RestartSignal for TerminatingRestart<'_> {
    fn id(&self) -> &'static str {
        "terminating"
    }

    fn terminates_process(&self) -> bool {
        true
    }

    async fn request_restart(&self) -> NotebookResult<()> {
        *self.seen_at_restart.lock().unwrap() = Some(self.sink.events());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSink(Mutex<Vec<NotebookEvent>>);

impl EventSink for RecordingSink {
    fn on_event(&self, event: NotebookEvent) {
        self.0.lock().unwrap().push(event);
    }
}

impl RecordingSink {
    fn events(&self) -> Vec<NotebookEvent> {
        self.0.lock().unwrap().clone()
    }
}

fn requirement(version: &str) -> DependencyRequirement {
    DependencyRequirement { package: "sagemaker".to_string(), required_version: version.to_string() }
}

#[tokio::test]
async fn test_up_to_date_package_is_left_alone() {
    for installed in ["2.90.0", "2.90.1", "2.91.0", "3.0.0"] {
        let packages = FakePackages::installed(installed);
        let sink = RecordingSink::default();
        let restart = CountingRestart::default();

        let status = check_dependencies(requirement("2.90.0"), &packages, &sink, &restart).await.unwrap();

        assert_eq!(
            status,
            DependencyStatus::Satisfied { package: "sagemaker".to_string(), installed: installed.to_string() }
        );
        assert!(packages.installs().is_empty());
        assert!(sink.events().is_empty());
        assert_eq!(restart.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_old_package_is_pinned_and_kernel_restarted_once() {
    let packages = FakePackages::installed("2.80.3");
    let sink = RecordingSink::default();
    let restart = CountingRestart::default();

    let checker = DependencyChecker::new(requirement("2.90.0"), &packages, &sink, &restart);
    let status = checker.check().await.unwrap();

    assert!(status.restart_requested());
    assert_eq!(packages.installs(), vec![("sagemaker".to_string(), "2.90.0".to_string())]);
    assert_eq!(restart.calls.load(Ordering::SeqCst), 1);

    match status {
        DependencyStatus::Upgraded { previous, installed, installer_output, .. } => {
            assert_eq!(previous, "2.80.3");
            assert_eq!(installed, "2.90.0");
            assert_eq!(installer_output, "Successfully installed sagemaker-2.90.0\n");
        }
        other => panic!("unexpected status: {other:?}"),
    }

    assert_eq!(
        sink.events(),
        vec![
            NotebookEvent::VersionMismatch {
                package: "sagemaker".to_string(),
                required: "2.90.0".to_string(),
                installed: "2.80.3".to_string(),
            },
            NotebookEvent::InstallerOutput {
                package: "sagemaker".to_string(),
                output: "Successfully installed sagemaker-2.90.0\n".to_string(),
            },
            NotebookEvent::RestartRequested,
            NotebookEvent::RestartPending,
        ]
    );
}

#[tokio::test]
async fn test_shorter_installed_version_counts_as_older() {
    let packages = FakePackages::installed("2.90");
    let restart = CountingRestart::default();
    let status = check_dependencies(requirement("2.90.0"), &packages, &RecordingSink::default(), &restart)
        .await
        .unwrap();
    assert!(status.restart_requested());
    assert_eq!(restart.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_prerelease_version_is_malformed() {
    let packages = FakePackages::installed("2.90.0rc1");
    let restart = CountingRestart::default();
    let err = check_dependencies(requirement("2.90.0"), &packages, &RecordingSink::default(), &restart)
        .await
        .unwrap_err();
    assert!(matches!(err, NotebookError::MalformedVersion(ref v) if v == "2.90.0rc1"));
    assert!(packages.installs().is_empty());
    assert_eq!(restart.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_install_does_not_restart() {
    let packages = FakePackages::installed("2.10.0").failing_install();
    let sink = RecordingSink::default();
    let restart = CountingRestart::default();

    let err = check_dependencies(requirement("2.90.0"), &packages, &sink, &restart).await.unwrap_err();

    assert!(matches!(err, NotebookError::InstallFailed { status: Some(1), .. }));
    assert_eq!(restart.calls.load(Ordering::SeqCst), 0);
    assert!(sink.events().iter().all(|e| !matches!(e, NotebookEvent::RestartRequested)));
}

#[tokio::test]
async fn test_missing_kernel_surfaces_environment_error() {
    let packages = FakePackages::installed("2.10.0");
    let err = check_dependencies(requirement("2.90.0"), &packages, &RecordingSink::default(), &NoKernel)
        .await
        .unwrap_err();
    assert!(matches!(err, NotebookError::Environment(_)));
    assert_eq!(packages.installs().len(), 1);
}

#[tokio::test]
async fn test_warning_precedes_terminating_restart() {
    let packages = FakePackages::installed("2.80.3");
    let sink = RecordingSink::default();
    let restart = TerminatingRestart { sink: &sink, seen_at_restart: Mutex::new(None) };

    check_dependencies(requirement("2.90.0"), &packages, &sink, &restart).await.unwrap();

    let seen = restart.seen_at_restart.lock().unwrap().clone().unwrap();
    assert_eq!(seen.last(), Some(&NotebookEvent::RestartPending));
    assert_eq!(sink.events().iter().filter(|e| **e == NotebookEvent::RestartPending).count(), 1);
}
