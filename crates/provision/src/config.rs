use anyhow::{anyhow, Context, Result};
use firstboot_core::{
    normalize, parse_filesystem, FileSystem, NormalizedValue, PartitionStyle,
    DEFAULT_ADAPTER_NAME_PROPERTY, DEFAULT_VOLUME_LABEL,
};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "provision.json";
pub const LOG_FILE: &str = "provision.log";
pub const SECONDARY_SCRIPT: &str = "post-provision.ps1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPaths {
    pub base_dir: PathBuf,
    pub config_path: PathBuf,
    pub log_path: PathBuf,
}

impl ProvisionPaths {
    pub fn from_base(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            config_path: base_dir.join(CONFIG_FILE),
            log_path: base_dir.join(LOG_FILE),
            base_dir,
        }
    }

    /// Directory of the running executable unless one is given.
    pub fn resolve_base(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(base) = explicit {
            return Ok(base);
        }
        let exe = std::env::current_exe().context("locate running executable")?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))
    }
}

/// Parsed document, or `None` when the file does not exist.
pub fn load_config(path: &Path) -> Result<Option<Value>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("read configuration {}", path.display()))
        }
    };
    let value = serde_json::from_str(&text)
        .with_context(|| format!("parse configuration {}", path.display()))?;
    Ok(Some(value))
}

pub fn load_normalized(path: &Path) -> Result<Option<NormalizedValue>> {
    Ok(load_config(path)?.as_ref().and_then(normalize))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub volume_label: String,
    pub file_system: FileSystem,
    pub partition_style: PartitionStyle,
    pub adapter_name_property: String,
    pub secondary_script: PathBuf,
}

impl Settings {
    pub fn defaults(base_dir: &Path) -> Self {
        Self {
            volume_label: DEFAULT_VOLUME_LABEL.to_string(),
            file_system: FileSystem::Ntfs,
            partition_style: PartitionStyle::Gpt,
            adapter_name_property: DEFAULT_ADAPTER_NAME_PROPERTY.to_string(),
            secondary_script: base_dir.join(SECONDARY_SCRIPT),
        }
    }

    /// Overlays the recognized keys of `config` on the defaults. Other keys are ignored.
    pub fn from_config(config: Option<&NormalizedValue>, base_dir: &Path) -> Result<Self> {
        let mut settings = Self::defaults(base_dir);
        let Some(config) = config else {
            return Ok(settings);
        };
        if !matches!(config, NormalizedValue::Mapping(_)) {
            return Ok(settings);
        }

        if let Some(label) = optional_text(config, "volumeLabel")? {
            settings.volume_label = label.to_string();
        }
        if let Some(fs) = optional_text(config, "fileSystem")? {
            settings.file_system =
                parse_filesystem(fs).ok_or_else(|| anyhow!("unsupported fileSystem {}", fs))?;
        }
        if let Some(property) = optional_text(config, "adapterNameProperty")? {
            settings.adapter_name_property = property.to_string();
        }
        if let Some(script) = optional_text(config, "secondaryScript")? {
            settings.secondary_script = base_dir.join(script);
        }
        Ok(settings)
    }
}

fn optional_text<'a>(config: &'a NormalizedValue, key: &str) -> Result<Option<&'a str>> {
    match config.get(key) {
        None | Some(NormalizedValue::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| anyhow!("configuration key {} must be text", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_config(&dir.path().join(CONFIG_FILE)).unwrap().is_none());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("read configuration"));
    }

    #[test]
    fn null_document_loads_as_no_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "null").unwrap();
        assert_eq!(load_config(&path).unwrap(), Some(Value::Null));
        assert_eq!(load_normalized(&path).unwrap(), None);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse configuration"));
    }

    #[test]
    fn defaults_match_fixed_behavior() {
        let base = Path::new("C:\\Provision");
        let settings = Settings::from_config(None, base).unwrap();
        assert_eq!(settings.volume_label, "Data");
        assert_eq!(settings.file_system, FileSystem::Ntfs);
        assert_eq!(settings.partition_style, PartitionStyle::Gpt);
        assert_eq!(settings.adapter_name_property, "Hyper-V Network Adapter Name");
        assert_eq!(settings.secondary_script, base.join(SECONDARY_SCRIPT));
    }

    #[test]
    fn recognized_keys_override_defaults() {
        let config = normalize(&json!({
            "volumeLabel": "Scratch",
            "fileSystem": "ReFS",
            "secondaryScript": "custom.ps1",
            "unrelated": [1, 2, 3]
        }));
        let base = Path::new("/opt/firstboot");
        let settings = Settings::from_config(config.as_ref(), base).unwrap();
        assert_eq!(settings.volume_label, "Scratch");
        assert_eq!(settings.file_system, FileSystem::ReFs);
        assert_eq!(settings.secondary_script, base.join("custom.ps1"));
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        let base = Path::new("/opt/firstboot");
        let config = normalize(&json!({"volumeLabel": 7}));
        assert!(Settings::from_config(config.as_ref(), base).is_err());
        let config = normalize(&json!({"fileSystem": "ext4"}));
        assert!(Settings::from_config(config.as_ref(), base).is_err());
    }

    #[test]
    fn non_mapping_document_keeps_defaults() {
        let base = Path::new("/opt/firstboot");
        let config = normalize(&json!(["a", "b"]));
        assert_eq!(
            Settings::from_config(config.as_ref(), base).unwrap(),
            Settings::defaults(base)
        );
    }

    #[test]
    fn paths_hang_off_base() {
        let paths = ProvisionPaths::from_base("/srv/boot");
        assert_eq!(paths.config_path, Path::new("/srv/boot").join(CONFIG_FILE));
        assert_eq!(paths.log_path, Path::new("/srv/boot").join(LOG_FILE));
        assert_eq!(
            ProvisionPaths::resolve_base(Some(PathBuf::from("/x"))).unwrap(),
            PathBuf::from("/x")
        );
    }
}
