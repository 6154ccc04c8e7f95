use anyhow::Result;
use clap::{Parser, Subcommand};
use firstboot_core::DiskHost;
use firstboot_host_windows::WindowsHost;
use firstboot_logger::Logger;
use firstboot_provision::{
    available_drive_letters, first_available_drive_letter, load_normalized, offline_disks,
    run_with_boundary, ProvisionOutcome, ProvisionPaths, Settings,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "firstboot", about = "First-boot provisioning for Windows hosts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Configure remoting, bring disks online, align adapter names, run the follow-up script.
    Run {
        /// Directory holding provision.json, provision.log and post-provision.ps1.
        #[arg(long)]
        base_dir: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        log: Option<PathBuf>,
        /// Only write to the log file.
        #[arg(long)]
        quiet: bool,
    },
    /// Print drive letters not bound to a volume or network share.
    DriveLetters {
        #[arg(long)]
        first: bool,
    },
    /// Print the disks the host reports.
    Disks {
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the normalized configuration document and the settings derived from it.
    Config {
        #[arg(long)]
        base_dir: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let host = WindowsHost;

    match cli.command {
        Command::Run {
            base_dir,
            config,
            log,
            quiet,
        } => {
            let paths = resolve_paths(base_dir, config, log)?;
            let logger = Logger::new(&paths.log_path).with_console(!quiet);
            match run_with_boundary(&host, &logger, &paths) {
                ProvisionOutcome::Completed(report) => {
                    if !quiet {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                ProvisionOutcome::Failed { .. } => Ok(ExitCode::FAILURE),
            }
        }
        Command::DriveLetters { first } => {
            if first {
                match first_available_drive_letter(&host)? {
                    Some(letter) => println!("{}", letter),
                    None => eprintln!("no drive letters available"),
                }
            } else {
                let letters: String = available_drive_letters(&host)?.into_iter().collect();
                println!("{}", letters);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Disks { offline, pretty } => {
            let mut disks = host.list_disks()?;
            if offline {
                disks = offline_disks(disks);
            }
            if pretty {
                println!("{}", serde_json::to_string_pretty(&disks)?);
            } else {
                println!("{}", serde_json::to_string(&disks)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { base_dir, config } => {
            let paths = resolve_paths(base_dir, config, None)?;
            let document = load_normalized(&paths.config_path)?;
            let settings = Settings::from_config(document.as_ref(), &paths.base_dir)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
            println!("volume_label: {}", settings.volume_label);
            println!("file_system: {}", settings.file_system.as_str());
            println!("partition_style: {}", settings.partition_style.as_str());
            println!("adapter_name_property: {}", settings.adapter_name_property);
            println!("secondary_script: {}", settings.secondary_script.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn resolve_paths(
    base_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    log: Option<PathBuf>,
) -> Result<ProvisionPaths> {
    let mut paths = ProvisionPaths::from_base(ProvisionPaths::resolve_base(base_dir)?);
    if let Some(config) = config {
        paths.config_path = config;
    }
    if let Some(log) = log {
        paths.log_path = log;
    }
    Ok(paths)
}
