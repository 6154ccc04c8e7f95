use anyhow::{anyhow, Result};
use firstboot_core::{
    AdapterHost, CredSspRole, DiskDescriptor, DiskHost, ExecutionPolicy, FileSystem,
    OperationalStatus, PartitionStyle, RemotingHost, ScriptEnv, ScriptHost,
};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FakeDisk {
    pub descriptor: DiskDescriptor,
    pub partitions: usize,
    pub style: Option<PartitionStyle>,
    pub letter: Option<char>,
    pub formatted: Option<(FileSystem, String)>,
}

#[derive(Debug, Clone)]
pub struct FakeAdapter {
    pub name: String,
    pub hypervisor_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub disks: RefCell<Vec<FakeDisk>>,
    pub volume_letters: RefCell<Vec<char>>,
    pub share_letters: Vec<char>,
    pub adapters: RefCell<Vec<FakeAdapter>>,
    pub calls: RefCell<Vec<String>>,
    pub scripts: RefCell<Vec<(PathBuf, ScriptEnv)>>,
    pub fail_format: Cell<bool>,
    pub fail_script: Cell<bool>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volume_letters(self, letters: &[char]) -> Self {
        self.volume_letters.borrow_mut().extend_from_slice(letters);
        self
    }

    pub fn with_share_letters(mut self, letters: &[char]) -> Self {
        self.share_letters.extend_from_slice(letters);
        self
    }

    pub fn with_disk(self, number: u32, status: OperationalStatus, partitions: usize) -> Self {
        self.disks.borrow_mut().push(FakeDisk {
            descriptor: DiskDescriptor {
                number,
                model: format!("Virtual Disk {}", number),
                size_bytes: 64 << 30,
                operational_status: status,
                has_partitions: partitions > 0,
            },
            partitions,
            style: None,
            letter: None,
            formatted: None,
        });
        self
    }

    pub fn with_adapter(self, name: &str, hypervisor_name: Option<&str>) -> Self {
        self.adapters.borrow_mut().push(FakeAdapter {
            name: name.to_string(),
            hypervisor_name: hypervisor_name.map(str::to_string),
        });
        self
    }

    pub fn disk(&self, number: u32) -> FakeDisk {
        self.disks
            .borrow()
            .iter()
            .find(|disk| disk.descriptor.number == number)
            .cloned()
            .expect("fake disk exists")
    }

    pub fn called(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn with_disk_mut<T>(&self, number: u32, f: impl FnOnce(&mut FakeDisk) -> T) -> Result<T> {
        let mut disks = self.disks.borrow_mut();
        let disk = disks
            .iter_mut()
            .find(|disk| disk.descriptor.number == number)
            .ok_or_else(|| anyhow!("disk {} not found", number))?;
        Ok(f(disk))
    }
}

impl RemotingHost for FakeHost {
    fn set_execution_policy(&self, policy: ExecutionPolicy) -> Result<()> {
        self.record(format!("policy {}", policy.as_str()));
        Ok(())
    }

    fn enable_remoting(&self) -> Result<()> {
        self.record("remoting enable".to_string());
        Ok(())
    }

    fn relax_transport(&self, trusted_hosts: &str) -> Result<()> {
        self.record(format!("remoting relax {}", trusted_hosts));
        Ok(())
    }

    fn restart_remoting(&self) -> Result<()> {
        self.record("remoting restart".to_string());
        Ok(())
    }

    fn enable_credssp(&self, role: CredSspRole, delegate_to: Option<&str>) -> Result<()> {
        self.record(format!("credssp {} {}", role.as_str(), delegate_to.unwrap_or("-")));
        Ok(())
    }
}

impl DiskHost for FakeHost {
    fn list_disks(&self) -> Result<Vec<DiskDescriptor>> {
        Ok(self
            .disks
            .borrow()
            .iter()
            .map(|disk| disk.descriptor.clone())
            .collect())
    }

    fn set_disk_online(&self, number: u32) -> Result<()> {
        self.record(format!("online {}", number));
        self.with_disk_mut(number, |disk| {
            disk.descriptor.operational_status = OperationalStatus::Online;
        })
    }

    fn partition_count(&self, number: u32) -> Result<usize> {
        self.with_disk_mut(number, |disk| disk.partitions)
    }

    fn initialize_disk(&self, number: u32, style: PartitionStyle) -> Result<()> {
        self.record(format!("initialize {} {}", number, style.as_str()));
        self.with_disk_mut(number, |disk| disk.style = Some(style))
    }

    fn create_max_partition(&self, number: u32, letter: char) -> Result<()> {
        self.record(format!("partition {} {}", number, letter));
        self.with_disk_mut(number, |disk| {
            disk.partitions += 1;
            disk.descriptor.has_partitions = true;
            disk.letter = Some(letter);
        })?;
        self.volume_letters.borrow_mut().push(letter);
        Ok(())
    }

    fn format_volume(&self, letter: char, fs: FileSystem, label: &str) -> Result<()> {
        self.record(format!("format {} {} {}", letter, fs.as_str(), label));
        if self.fail_format.get() {
            return Err(anyhow!("Format-Volume failed: the device is not ready"));
        }
        let mut disks = self.disks.borrow_mut();
        let disk = disks
            .iter_mut()
            .find(|disk| disk.letter == Some(letter))
            .ok_or_else(|| anyhow!("no volume mounted at {}:", letter))?;
        disk.formatted = Some((fs, label.to_string()));
        Ok(())
    }

    fn volume_letters(&self) -> Result<Vec<char>> {
        Ok(self.volume_letters.borrow().clone())
    }

    fn mapped_share_letters(&self) -> Result<Vec<char>> {
        Ok(self.share_letters.clone())
    }
}

impl AdapterHost for FakeHost {
    fn list_adapters(&self) -> Result<Vec<String>> {
        Ok(self
            .adapters
            .borrow()
            .iter()
            .map(|adapter| adapter.name.clone())
            .collect())
    }

    fn adapter_property(&self, adapter: &str, _display_name: &str) -> Result<Option<String>> {
        self.adapters
            .borrow()
            .iter()
            .find(|candidate| candidate.name == adapter)
            .map(|candidate| candidate.hypervisor_name.clone())
            .ok_or_else(|| anyhow!("adapter {} not found", adapter))
    }

    fn rename_adapter(&self, from: &str, to: &str) -> Result<()> {
        self.record(format!("rename {} -> {}", from, to));
        let mut adapters = self.adapters.borrow_mut();
        let adapter = adapters
            .iter_mut()
            .find(|adapter| adapter.name == from)
            .ok_or_else(|| anyhow!("adapter {} not found", from))?;
        adapter.name = to.to_string();
        Ok(())
    }
}

impl ScriptHost for FakeHost {
    fn current_user(&self) -> String {
        "WORKGROUP\\Administrator".to_string()
    }

    fn run_script(&self, path: &Path, env: &ScriptEnv) -> Result<()> {
        self.scripts
            .borrow_mut()
            .push((path.to_path_buf(), env.clone()));
        if self.fail_script.get() {
            return Err(anyhow!("{} exited with exit code: 1", path.display()));
        }
        Ok(())
    }
}
