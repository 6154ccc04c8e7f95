use anyhow::Result;
use firstboot_core::{normalize, Host};
use firstboot_logger::Logger;
use serde::Serialize;
use uuid::Uuid;

pub mod adapters;
pub mod config;
pub mod disks;
pub mod letters;
pub mod remoting;
pub mod script;

#[cfg(test)]
pub(crate) mod testing;

pub use adapters::{align_adapter_names, AdapterRename};
pub use config::{load_config, load_normalized, ProvisionPaths, Settings};
pub use disks::{bring_online_and_partition, offline_disks, DiskBatch, PartitionedDisk};
pub use letters::{available_drive_letters, first_available_drive_letter};
pub use remoting::configure_remoting;
pub use script::run_secondary_script;

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub run_id: Uuid,
    pub config_loaded: bool,
    pub disks: DiskBatch,
    pub renamed_adapters: Vec<AdapterRename>,
    pub secondary_script_ran: bool,
}

#[derive(Debug, Clone)]
pub enum ProvisionOutcome {
    Completed(ProvisionReport),
    Failed { error: String },
}

impl ProvisionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProvisionOutcome::Completed(_))
    }
}

/// Runs every stage in order and stops at the first failure.
pub fn run_provisioning<H: Host + ?Sized>(
    host: &H,
    logger: &Logger,
    paths: &ProvisionPaths,
) -> Result<ProvisionReport> {
    let run_id = Uuid::new_v4();
    logger.info(format!(
        "Provisioning run {} started by {}",
        run_id,
        host.current_user()
    ))?;

    configure_remoting(host, logger)?;

    let config = match load_config(&paths.config_path)? {
        Some(document) => {
            logger.info(format!(
                "Configuration loaded from {}",
                paths.config_path.display()
            ))?;
            normalize(&document)
        }
        None => {
            logger.info(format!(
                "No configuration file at {}, using defaults",
                paths.config_path.display()
            ))?;
            None
        }
    };
    let config_loaded = config.is_some();
    let settings = Settings::from_config(config.as_ref(), &paths.base_dir)?;

    let offline = offline_disks(host.list_disks()?);
    let disks = if offline.is_empty() {
        logger.info("No offline disk(s) found")?;
        DiskBatch::default()
    } else {
        logger.info(format!("Processing {} disks", offline.len()))?;
        bring_online_and_partition(host, logger, &offline, &settings)?
    };
    logger.info(format!(
        "Disk stage complete: {} partitioned, {} untouched",
        disks.partitioned.len(),
        disks.untouched.len()
    ))?;

    logger.info("Aligning network adapter names")?;
    let renamed_adapters = align_adapter_names(host, logger, &settings.adapter_name_property)?;
    logger.info(format!(
        "Adapter names aligned ({} renamed)",
        renamed_adapters.len()
    ))?;

    let env = script::script_env(paths, logger.path(), &run_id.to_string());
    let secondary_script_ran =
        run_secondary_script(host, logger, &settings.secondary_script, &env)?;

    logger.info(format!("Provisioning run {} completed", run_id))?;
    Ok(ProvisionReport {
        run_id,
        config_loaded,
        disks,
        renamed_adapters,
        secondary_script_ran,
    })
}

/// The one place a fault is handled: it is logged at ERROR and returned, never re-raised.
pub fn run_with_boundary<H: Host + ?Sized>(
    host: &H,
    logger: &Logger,
    paths: &ProvisionPaths,
) -> ProvisionOutcome {
    match run_provisioning(host, logger, paths) {
        Ok(report) => ProvisionOutcome::Completed(report),
        Err(err) => {
            let error = format!("{:#}", err);
            if let Err(log_err) = logger.error(&error) {
                eprintln!("{}", error);
                eprintln!("failed to write log: {:#}", log_err);
            }
            ProvisionOutcome::Failed { error }
        }
    }
}
