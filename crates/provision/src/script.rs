use anyhow::Result;
use firstboot_core::{ScriptEnv, ScriptHost};
use firstboot_logger::Logger;
use std::path::Path;

use crate::config::ProvisionPaths;

pub const ENV_BASE_DIR: &str = "FIRSTBOOT_BASE_DIR";
pub const ENV_LOG_PATH: &str = "FIRSTBOOT_LOG_PATH";
pub const ENV_CONFIG_PATH: &str = "FIRSTBOOT_CONFIG_PATH";
pub const ENV_RUN_ID: &str = "FIRSTBOOT_RUN_ID";

pub fn script_env(paths: &ProvisionPaths, log_path: &Path, run_id: &str) -> ScriptEnv {
    ScriptEnv::default()
        .with(ENV_BASE_DIR, paths.base_dir.display().to_string())
        .with(ENV_LOG_PATH, log_path.display().to_string())
        .with(ENV_CONFIG_PATH, paths.config_path.display().to_string())
        .with(ENV_RUN_ID, run_id)
}

/// Hands off to the secondary script if it exists. Returns whether it ran.
pub fn run_secondary_script<H: ScriptHost + ?Sized>(
    host: &H,
    logger: &Logger,
    script: &Path,
    env: &ScriptEnv,
) -> Result<bool> {
    if !script.exists() {
        logger.info(format!(
            "Secondary script {} not found, skipping",
            script.display()
        ))?;
        return Ok(false);
    }

    logger.info(format!("Running secondary script {}", script.display()))?;
    host.run_script(script, env)?;
    logger.info("Secondary script finished")?;
    Ok(true)
}
