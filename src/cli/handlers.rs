//! Command handlers; each returns the process exit code

use super::commands::{ListArgs, RunArgs};
use super::output::OutputFormatter;
use crate::config::{CodecConfig, ConfigError, MODULE_DIR_VAR, SYSTEMD_PATH_VAR};
use crate::health::{HealthHandle, HealthReporter};
use crate::module::{ModuleError, ModulePipeline, ProcessReport};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 1;
pub const EXIT_PIPELINE: i32 = 2;

/// Loads configuration from the environment, preferring command-line paths
pub fn resolve_config(
    module_dir: Option<&Path>,
    systemd_path: Option<&Path>,
) -> Result<CodecConfig, ConfigError> {
    CodecConfig::from_lookup(|key| {
        let flag = match key {
            MODULE_DIR_VAR => module_dir,
            SYSTEMD_PATH_VAR => systemd_path,
            _ => None,
        };
        flag.map(|p| p.to_string_lossy().into_owned())
            .or_else(|| env::var(key).ok())
    })
}

pub async fn handle_run(args: &RunArgs) -> i32 {
    let mut config = match resolve_config(args.module_dir.as_deref(), args.systemd_path.as_deref())
    {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return EXIT_CONFIG;
        }
    };
    if args.standalone {
        config.health = None;
    }
    debug!("Configuration: {:?}", config);

    let health = match &config.health {
        Some(health_config) => {
            info!("health check: starting...");
            Some(HealthReporter::new(health_config).spawn())
        }
        None => {
            info!("health check: skipped");
            None
        }
    };

    if let Err(e) = run_pipeline(config.module_dir, config.systemd_path).await {
        error!("module system: {:#}", e);
        if let Some(handle) = health {
            handle.stop().await;
        }
        return EXIT_PIPELINE;
    }

    match health {
        Some(handle) => wait_for_shutdown(handle).await,
        None => EXIT_OK,
    }
}

async fn run_pipeline(module_dir: PathBuf, systemd_path: PathBuf) -> Result<ProcessReport> {
    let task = tokio::task::spawn_blocking(move || -> Result<ProcessReport, ModuleError> {
        let pipeline = ModulePipeline::default();
        let modules = pipeline.discover(&module_dir)?;
        pipeline.process(&modules, &systemd_path)
    });

    let report = task
        .await
        .map_err(|e| anyhow!("pipeline task failed: {}", e))?
        .context("module pipeline failed")?;

    info!(
        "Installed {} fragment(s) and {} unit(s) for {} module(s)",
        report.fragment_count(),
        report.unit_count(),
        report.modules.len()
    );
    Ok(report)
}

async fn wait_for_shutdown(handle: HealthHandle) -> i32 {
    info!("Modules installed; reporting health until interrupted");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    info!("Shutting down");
    handle.stop().await;
    EXIT_OK
}

pub fn handle_list(args: &ListArgs) -> i32 {
    let module_dir = match args
        .module_dir
        .clone()
        .or_else(|| env::var(MODULE_DIR_VAR).ok().filter(|v| !v.is_empty()).map(PathBuf::from))
    {
        Some(dir) => dir,
        None => {
            error!("{}", ConfigError::MissingVar(MODULE_DIR_VAR));
            return EXIT_CONFIG;
        }
    };

    let modules = match ModulePipeline::default().discover(&module_dir) {
        Ok(modules) => modules,
        Err(e) => {
            error!("module system: {}", e);
            return EXIT_PIPELINE;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_modules(&module_dir, &modules) {
        Ok(out) => {
            println!("{}", out);
            EXIT_OK
        }
        Err(e) => {
            error!("Failed to format module list: {}", e);
            EXIT_PIPELINE
        }
    }
}
