use serde::{Deserialize, Serialize};

/// Notices the dependency checker emits while it works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotebookEvent {
    VersionMismatch { package: String, required: String, installed: String },
    InstallerOutput { package: String, output: String },
    RestartRequested,
    RestartPending,
}

pub trait EventSink: Send + Sync {
    fn on_event(&self, event: NotebookEvent);
}

/// Prints events the way a notebook cell shows them.
#[derive(Debug, Default)]
pub struct StdoutEventSink;

impl EventSink for StdoutEventSink {
    fn on_event(&self, event: NotebookEvent) {
        match event {
            NotebookEvent::VersionMismatch { package, required, installed } => println!(
                "{package} {installed} is older than the required {required}. Installing {package}=={required}..."
            ),
            NotebookEvent::InstallerOutput { output, .. } => {
                print!("{output}");
                if !output.is_empty() && !output.ends_with('\n') {
                    println!();
                }
            }
            NotebookEvent::RestartRequested => {
                println!("Restarting kernel after installing new dependencies...");
            }
            NotebookEvent::RestartPending => println!(
                "WARNING: Kernel restarting. Wait about 30 seconds before running the next cell!"
            ),
        }
    }
}

/// Routes events to `tracing` so stdout stays free for machine-readable output.
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn on_event(&self, event: NotebookEvent) {
        match event {
            NotebookEvent::VersionMismatch { package, required, installed } => {
                tracing::warn!(%package, %required, %installed, "installed package is older than required");
            }
            NotebookEvent::InstallerOutput { package, output } => {
                tracing::info!(%package, "installer output:\n{output}");
            }
            NotebookEvent::RestartRequested => tracing::info!("requesting kernel restart"),
            NotebookEvent::RestartPending => tracing::warn!("kernel restarting"),
        }
    }
}
