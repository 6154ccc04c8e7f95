use anyhow::Result;
use std::path::Path;

use crate::{CredSspRole, DiskDescriptor, ExecutionPolicy, FileSystem, PartitionStyle};

pub trait RemotingHost {
    fn set_execution_policy(&self, policy: ExecutionPolicy) -> Result<()>;
    fn enable_remoting(&self) -> Result<()>;
    /// Accept unencrypted traffic and trust `trusted_hosts` on the listener.
    fn relax_transport(&self, trusted_hosts: &str) -> Result<()>;
    fn restart_remoting(&self) -> Result<()>;
    /// `delegate_to` only applies to the client role.
    fn enable_credssp(&self, role: CredSspRole, delegate_to: Option<&str>) -> Result<()>;
}

pub trait DiskHost {
    fn list_disks(&self) -> Result<Vec<DiskDescriptor>>;
    fn set_disk_online(&self, number: u32) -> Result<()>;
    fn partition_count(&self, number: u32) -> Result<usize>;
    fn initialize_disk(&self, number: u32, style: PartitionStyle) -> Result<()>;
    /// One partition spanning the whole usable size, mounted at `letter`.
    fn create_max_partition(&self, number: u32, letter: char) -> Result<()>;
    fn format_volume(&self, letter: char, fs: FileSystem, label: &str) -> Result<()>;
    fn volume_letters(&self) -> Result<Vec<char>>;
    fn mapped_share_letters(&self) -> Result<Vec<char>>;
}

pub trait AdapterHost {
    fn list_adapters(&self) -> Result<Vec<String>>;
    /// Value of the advanced property whose display name is `display_name`, if the adapter has one.
    fn adapter_property(&self, adapter: &str, display_name: &str) -> Result<Option<String>>;
    fn rename_adapter(&self, from: &str, to: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptEnv {
    pub vars: Vec<(String, String)>,
}

impl ScriptEnv {
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.push((key.to_string(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

pub trait ScriptHost {
    fn current_user(&self) -> String;
    fn run_script(&self, path: &Path, env: &ScriptEnv) -> Result<()>;
}

pub trait Host: RemotingHost + DiskHost + AdapterHost + ScriptHost {}

impl<T> Host for T where T: RemotingHost + DiskHost + AdapterHost + ScriptHost {}
