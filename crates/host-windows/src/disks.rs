use anyhow::{anyhow, Context, Result};
use firstboot_core::{DiskDescriptor, OperationalStatus};

use crate::powershell;

const LIST_DISKS: &str = r#"Get-Disk | ForEach-Object { "{0}|{1}|{2}|{3}|{4}" -f $_.Number, $_.FriendlyName, $_.Size, $_.OperationalStatus, $_.NumberOfPartitions }"#;

pub fn enumerate_disks() -> Result<Vec<DiskDescriptor>> {
    let output = powershell::run(LIST_DISKS)?;
    powershell::lines(&output).map(parse_disk_line).collect()
}

pub fn set_online(number: u32) -> Result<()> {
    powershell::run(&set_online_script(number))
        .with_context(|| format!("bring disk {} online", number))?;
    Ok(())
}

pub fn partition_count(number: u32) -> Result<usize> {
    let output = powershell::run(&partition_count_script(number))
        .with_context(|| format!("query partitions on disk {}", number))?;
    let count = powershell::lines(&output)
        .next()
        .unwrap_or("0")
        .parse::<usize>()
        .with_context(|| format!("parse partition count for disk {}", number))?;
    Ok(count)
}

fn set_online_script(number: u32) -> String {
    format!("Set-Disk -Number {} -IsOffline $false", number)
}

fn partition_count_script(number: u32) -> String {
    format!(
        "@(Get-Partition -DiskNumber {} -ErrorAction SilentlyContinue).Count",
        number
    )
}

/// `number|friendly name|size|status|partitions`. The friendly name may itself contain `|`.
fn parse_disk_line(line: &str) -> Result<DiskDescriptor> {
    let mut tail = line.rsplitn(4, '|');
    let partitions = tail.next();
    let status = tail.next();
    let size = tail.next();
    let head = tail.next();
    let (Some(partitions), Some(status), Some(size), Some(head)) = (partitions, status, size, head)
    else {
        return Err(anyhow!("unexpected Get-Disk line: {}", line));
    };
    let (number, model) = head
        .split_once('|')
        .ok_or_else(|| anyhow!("unexpected Get-Disk line: {}", line))?;

    Ok(DiskDescriptor {
        number: number
            .trim()
            .parse()
            .with_context(|| format!("parse disk number in {}", line))?,
        model: model.trim().to_string(),
        size_bytes: size
            .trim()
            .parse()
            .with_context(|| format!("parse disk size in {}", line))?,
        operational_status: OperationalStatus::parse(status),
        has_partitions: partitions
            .trim()
            .parse::<u32>()
            .with_context(|| format!("parse partition count in {}", line))?
            > 0,
    })
}
