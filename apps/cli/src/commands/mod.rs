//! Command implementations for the sagenb CLI.

pub mod config;
pub mod deps;
pub mod jobs;
pub mod types;

pub use types::{AwsArgs, CheckDepsArgs, ConfigCommand};
