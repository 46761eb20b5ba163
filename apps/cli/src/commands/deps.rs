//! `check-deps` command.

use crate::commands::types::CheckDepsArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use sagenb_core::{
    DependencyChecker, DependencyStatus, EventSink, NotebookConfig, PipPackageManager, StdoutEventSink,
    TracingEventSink,
};

pub async fn execute(config: &NotebookConfig, args: &CheckDepsArgs) -> Result<()> {
    let mut dependency = config.dependency.clone();
    dependency.merge(&args.dependency_config());
    let mut restart_config = config.restart.clone();
    restart_config.merge(&args.restart_config());

    let restart = restart_config.build_signal().context("Failed to set up kernel restart")?;
    let packages = PipPackageManager::new(dependency.interpreter());
    let events: Box<dyn EventSink> =
        if args.json { Box::new(TracingEventSink) } else { Box::new(StdoutEventSink) };

    let requirement = dependency.requirement();
    tracing::debug!(
        package = %requirement.package,
        required = %requirement.required_version,
        interpreter = packages.interpreter(),
        restart = restart.id(),
        "checking dependencies"
    );

    let checker = DependencyChecker::new(requirement, &packages, events.as_ref(), restart.as_ref());
    let status = checker.check().await.with_context(|| {
        format!("Dependency check failed for {}", checker.requirement().package)
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    match status {
        DependencyStatus::Satisfied { package, installed } => println!(
            "{} {} {} (requires >= {})",
            "✓".green(),
            package.bold(),
            installed,
            checker.requirement().required_version
        ),
        DependencyStatus::Upgraded { package, previous, installed, .. } => {
            println!("{} {} upgraded {} → {}", "✓".green(), package.bold(), previous.dimmed(), installed.cyan());
        }
    }
    Ok(())
}
