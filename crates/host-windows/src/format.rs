use anyhow::{Context, Result};
use firstboot_core::{FileSystem, PartitionStyle};

use crate::powershell::{self, quote};

pub fn initialize_disk(number: u32, style: PartitionStyle) -> Result<()> {
    powershell::run(&initialize_script(number, style))
        .with_context(|| format!("initialize disk {} as {}", number, style.as_str()))?;
    Ok(())
}

pub fn create_max_partition(number: u32, letter: char) -> Result<()> {
    powershell::run(&partition_script(number, letter))
        .with_context(|| format!("create partition {}: on disk {}", letter, number))?;
    Ok(())
}

pub fn format_volume(letter: char, fs: FileSystem, label: &str) -> Result<()> {
    powershell::run(&format_script(letter, fs, label))
        .with_context(|| format!("format {}: as {}", letter, fs.as_str()))?;
    Ok(())
}

fn initialize_script(number: u32, style: PartitionStyle) -> String {
    format!(
        "Initialize-Disk -Number {} -PartitionStyle {} -Confirm:$false",
        number,
        style.as_str()
    )
}

fn partition_script(number: u32, letter: char) -> String {
    format!(
        "New-Partition -DiskNumber {} -UseMaximumSize -DriveLetter {} | Out-Null",
        number, letter
    )
}

fn format_script(letter: char, fs: FileSystem, label: &str) -> String {
    format!(
        "Format-Volume -DriveLetter {} -FileSystem {} -NewFileSystemLabel {} -Confirm:$false | Out-Null",
        letter,
        fs.as_str(),
        quote(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializes_as_gpt() {
        assert_eq!(
            initialize_script(1, PartitionStyle::Gpt),
            "Initialize-Disk -Number 1 -PartitionStyle GPT -Confirm:$false"
        );
    }

    #[test]
    fn partition_spans_disk_with_letter() {
        let script = partition_script(4, 'E');
        assert!(script.contains("-DiskNumber 4"));
        assert!(script.contains("-UseMaximumSize"));
        assert!(script.contains("-DriveLetter E"));
    }

    #[test]
    fn format_quotes_label() {
        let script = format_script('F', FileSystem::Ntfs, "Data");
        assert!(script.starts_with("Format-Volume -DriveLetter F -FileSystem NTFS"));
        assert!(script.contains("-NewFileSystemLabel 'Data'"));
    }
}
