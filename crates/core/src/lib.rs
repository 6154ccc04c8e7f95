use serde::{Deserialize, Serialize};

pub mod host;
pub mod letters;
pub mod normalize;

pub use host::{AdapterHost, DiskHost, Host, RemotingHost, ScriptEnv, ScriptHost};
pub use letters::{free_drive_letters, parse_drive_letter, DRIVE_LETTERS};
pub use normalize::{normalize, NormalizedValue, Scalar};

pub const DEFAULT_VOLUME_LABEL: &str = "Data";
pub const DEFAULT_ADAPTER_NAME_PROPERTY: &str = "Hyper-V Network Adapter Name";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiskDescriptor {
    pub number: u32,
    pub model: String,
    pub size_bytes: u64,
    pub operational_status: OperationalStatus,
    pub has_partitions: bool,
}

impl DiskDescriptor {
    pub fn is_offline(&self) -> bool {
        self.operational_status == OperationalStatus::Offline
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum OperationalStatus {
    Online,
    Offline,
    NotReady,
    NoMedia,
    Failed,
    Other(String),
}

impl OperationalStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "online" => Self::Online,
            "offline" => Self::Offline,
            "not ready" | "notready" => Self::NotReady,
            "no media" | "nomedia" => Self::NoMedia,
            "failed" => Self::Failed,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NetAdapterDescriptor {
    pub current_name: String,
    pub hypervisor_suggested_name: String,
}

impl NetAdapterDescriptor {
    pub fn needs_rename(&self) -> bool {
        self.current_name != self.hypervisor_suggested_name
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FileSystem {
    Ntfs,
    ReFs,
    ExFat,
    Fat32,
}

impl FileSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileSystem::Ntfs => "NTFS",
            FileSystem::ReFs => "ReFS",
            FileSystem::ExFat => "exFAT",
            FileSystem::Fat32 => "FAT32",
        }
    }
}

pub fn parse_filesystem(value: &str) -> Option<FileSystem> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ntfs" => Some(FileSystem::Ntfs),
        "refs" => Some(FileSystem::ReFs),
        "exfat" => Some(FileSystem::ExFat),
        "fat32" => Some(FileSystem::Fat32),
        _ => None,
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStyle {
    Gpt,
    Mbr,
}

impl PartitionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionStyle::Gpt => "GPT",
            PartitionStyle::Mbr => "MBR",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPolicy {
    Unrestricted,
    Bypass,
    RemoteSigned,
}

impl ExecutionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionPolicy::Unrestricted => "Unrestricted",
            ExecutionPolicy::Bypass => "Bypass",
            ExecutionPolicy::RemoteSigned => "RemoteSigned",
        }
    }
}

/// CredSSP participates on both ends; the client side also names who may receive credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredSspRole {
    Server,
    Client,
}

impl CredSspRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredSspRole::Server => "Server",
            CredSspRole::Client => "Client",
        }
    }
}
