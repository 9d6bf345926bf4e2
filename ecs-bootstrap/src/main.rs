//! ECS Bootstrap
//!
//! Starts a task definition on the ECS container instance this process runs
//! on, and waits until the task is RUNNING.
//!
//! Architecture:
//! - Configuration: command-line arguments with environment fallbacks
//! - Repositories: the local ECS agent (HTTP) and the ECS API (AWS SDK)
//! - Services: metadata fetching, identity parsing, task launching
//! - Bootstrap: the sequential pipeline tying the services together

mod bootstrap;
mod config;
mod error;
mod repository;
mod service;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bootstrap::Bootstrapper;
use crate::config::Config;
use crate::repository::{EcsTaskRepositoryFactory, HttpAgentRepository};
use ecs_bootstrap_client::DEFAULT_METADATA_URL;

#[derive(Parser)]
#[command(name = "ecs-bootstrap")]
#[command(about = "Start an ECS task on this container instance", long_about = None)]
struct Cli {
    /// Task definition to start (family, family:revision or ARN)
    task_definition: String,

    /// ECS agent metadata endpoint
    #[arg(long, env = "ECS_BOOTSTRAP_METADATA_URL", default_value = DEFAULT_METADATA_URL)]
    metadata_url: String,

    /// Seconds to wait for the task to reach RUNNING on each attempt
    #[arg(long, env = "ECS_BOOTSTRAP_WAIT_TIMEOUT", default_value_t = 600)]
    wait_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecs_bootstrap=info,ecs_bootstrap_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.metadata_url)
        .with_wait_timeout(Duration::from_secs(cli.wait_timeout));
    config.validate()?;
    info!(
        "Loaded configuration: metadata_url={}, wait_timeout={:?}",
        config.metadata_url, config.wait_timeout
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let agent = Arc::new(HttpAgentRepository::new(config.metadata_url.clone()));
    let factory = Arc::new(EcsTaskRepositoryFactory::new(
        sdk_config,
        config.wait_timeout,
    ));
    let bootstrapper = Bootstrapper::new(agent, factory);

    let result = bootstrapper
        .run(&cli.task_definition)
        .await
        .with_context(|| format!("Failed to start {}", cli.task_definition))?;

    info!("Task {} is running", result.task_handle);
    println!(
        "{}",
        format!("Successfully started {}", cli.task_definition)
            .green()
            .bold()
    );

    Ok(())
}
