//! Training job lookup and model artifact commands.

use crate::commands::types::AwsArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use sagenb_core::{AwsCliClient, NotebookConfig};
use serde_json::json;

fn client(config: &NotebookConfig, aws: &AwsArgs) -> AwsCliClient {
    let mut merged = config.aws.clone();
    merged.merge(&aws.as_config());
    merged.client()
}

pub async fn latest_job(config: &NotebookConfig, prefix: &str, aws: &AwsArgs, json_output: bool) -> Result<()> {
    let client = client(config, aws);
    let job = sagenb_core::latest_training_job(&client, prefix)
        .await
        .with_context(|| format!("Failed to find the latest completed training job for '{prefix}'"))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&job)?);
        return Ok(());
    }

    println!("{}", job.training_job_name);
    tracing::info!(created = %job.creation_time, "latest completed training job");
    Ok(())
}

pub async fn model_artifacts(
    config: &NotebookConfig,
    job_name: &str,
    aws: &AwsArgs,
    json_output: bool,
) -> Result<()> {
    let client = client(config, aws);
    let uri = sagenb_core::get_training_job_s3_model_artifacts(&client, job_name)
        .await
        .with_context(|| format!("Failed to resolve model artifacts for training job '{job_name}'"))?;

    if json_output {
        let out = json!({ "training_job_name": job_name, "s3_model_artifacts": uri });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{uri}");
    Ok(())
}

pub async fn resolve_model(config: &NotebookConfig, prefix: &str, aws: &AwsArgs, json_output: bool) -> Result<()> {
    let client = client(config, aws);
    let resolved = sagenb_core::latest_model_artifacts(&client, prefix)
        .await
        .with_context(|| format!("Failed to resolve the latest model for '{prefix}'"))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!();
    println!("{}", "Latest trained model".bold().cyan());
    println!("  Job:   {}", resolved.training_job_name.cyan());
    println!("  Model: {}", resolved.s3_model_artifacts.dimmed());
    println!();
    Ok(())
}
