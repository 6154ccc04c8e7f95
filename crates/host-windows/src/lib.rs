use anyhow::Result;
use firstboot_core::{
    AdapterHost, CredSspRole, DiskDescriptor, DiskHost, ExecutionPolicy, FileSystem,
    PartitionStyle, RemotingHost, ScriptEnv, ScriptHost,
};
use std::path::Path;

pub mod adapters;
pub mod disks;
pub mod format;
pub mod powershell;
pub mod remoting;
pub mod shares;

#[cfg(windows)]
pub mod volumes;
#[cfg(not(windows))]
#[path = "volumes_stub.rs"]
pub mod volumes;

/// The live machine, reached through PowerShell cmdlets and Win32 calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsHost;

impl RemotingHost for WindowsHost {
    fn set_execution_policy(&self, policy: ExecutionPolicy) -> Result<()> {
        remoting::set_execution_policy(policy)
    }

    fn enable_remoting(&self) -> Result<()> {
        remoting::enable_remoting()
    }

    fn relax_transport(&self, trusted_hosts: &str) -> Result<()> {
        remoting::relax_transport(trusted_hosts)
    }

    fn restart_remoting(&self) -> Result<()> {
        remoting::restart_remoting()
    }

    fn enable_credssp(&self, role: CredSspRole, delegate_to: Option<&str>) -> Result<()> {
        remoting::enable_credssp(role, delegate_to)
    }
}

impl DiskHost for WindowsHost {
    fn list_disks(&self) -> Result<Vec<DiskDescriptor>> {
        disks::enumerate_disks()
    }

    fn set_disk_online(&self, number: u32) -> Result<()> {
        disks::set_online(number)
    }

    fn partition_count(&self, number: u32) -> Result<usize> {
        disks::partition_count(number)
    }

    fn initialize_disk(&self, number: u32, style: PartitionStyle) -> Result<()> {
        format::initialize_disk(number, style)
    }

    fn create_max_partition(&self, number: u32, letter: char) -> Result<()> {
        format::create_max_partition(number, letter)
    }

    fn format_volume(&self, letter: char, fs: FileSystem, label: &str) -> Result<()> {
        format::format_volume(letter, fs, label)
    }

    fn volume_letters(&self) -> Result<Vec<char>> {
        volumes::mounted_letters()
    }

    fn mapped_share_letters(&self) -> Result<Vec<char>> {
        shares::mapped_letters()
    }
}

impl AdapterHost for WindowsHost {
    fn list_adapters(&self) -> Result<Vec<String>> {
        adapters::adapter_names()
    }

    fn adapter_property(&self, adapter: &str, display_name: &str) -> Result<Option<String>> {
        adapters::advanced_property(adapter, display_name)
    }

    fn rename_adapter(&self, from: &str, to: &str) -> Result<()> {
        adapters::rename(from, to)
    }
}

impl ScriptHost for WindowsHost {
    fn current_user(&self) -> String {
        let user = std::env::var("USERNAME")
            .or_else(|_| std::env::var("USER"))
            .unwrap_or_else(|_| "unknown".to_string());
        match std::env::var("USERDOMAIN") {
            Ok(domain) if !domain.is_empty() => format!("{}\\{}", domain, user),
            _ => user,
        }
    }

    fn run_script(&self, path: &Path, env: &ScriptEnv) -> Result<()> {
        powershell::run_file(path, env)
    }
}
