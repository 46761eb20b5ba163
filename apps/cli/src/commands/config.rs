//! `config` subcommands.

use crate::commands::types::ConfigCommand;
use anyhow::Result;
use sagenb_core::NotebookConfig;

const REDACTED: &str = "***";

/// Copy of `config` that is safe to print.
fn redacted(config: &NotebookConfig) -> NotebookConfig {
    let mut shown = config.clone();
    if shown.restart.token.is_some() {
        shown.restart.token = Some(REDACTED.to_string());
    }
    shown
}

pub fn execute(config: &NotebookConfig, command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            print!("{}", redacted(config).to_toml()?);
        }
        ConfigCommand::Paths => {
            println!("global: {}", NotebookConfig::default_global_path().display());
            println!("local:  {}", NotebookConfig::default_local_path().display());
        }
    }
    Ok(())
}
