use anyhow::{anyhow, Result};
use firstboot_core::{DiskDescriptor, DiskHost};
use firstboot_logger::Logger;
use serde::Serialize;

use crate::config::Settings;
use crate::letters::first_available_drive_letter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionedDisk {
    pub number: u32,
    pub letter: char,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiskBatch {
    pub partitioned: Vec<PartitionedDisk>,
    /// Brought online but left alone because a partition table was already there.
    pub untouched: Vec<u32>,
}

pub fn offline_disks(disks: Vec<DiskDescriptor>) -> Vec<DiskDescriptor> {
    disks.into_iter().filter(DiskDescriptor::is_offline).collect()
}

/// Brings each disk online in the given order and lays out blank ones as a single volume.
///
/// The first failure aborts the batch. Nothing is rolled back: a disk whose format fails keeps
/// its new, unformatted partition.
pub fn bring_online_and_partition<H: DiskHost + ?Sized>(
    host: &H,
    logger: &Logger,
    disks: &[DiskDescriptor],
    settings: &Settings,
) -> Result<DiskBatch> {
    let mut batch = DiskBatch::default();

    for disk in disks {
        logger.info(format!(
            "Bringing disk {} ({}, {} bytes) online",
            disk.number, disk.model, disk.size_bytes
        ))?;
        host.set_disk_online(disk.number)?;

        let partitions = host.partition_count(disk.number)?;
        if partitions > 0 {
            logger.info(format!(
                "Disk {} already has {} partition(s), skipping partitioning",
                disk.number, partitions
            ))?;
            batch.untouched.push(disk.number);
            continue;
        }

        let letter = first_available_drive_letter(host)?
            .ok_or_else(|| anyhow!("no drive letter available for disk {}", disk.number))?;

        logger.info(format!(
            "Initializing disk {} as {}",
            disk.number,
            settings.partition_style.as_str()
        ))?;
        host.initialize_disk(disk.number, settings.partition_style)?;

        logger.info(format!("Creating partition {}: on disk {}", letter, disk.number))?;
        host.create_max_partition(disk.number, letter)?;

        logger.info(format!(
            "Formatting {}: as {} with label '{}'",
            letter,
            settings.file_system.as_str(),
            settings.volume_label
        ))?;
        host.format_volume(letter, settings.file_system, &settings.volume_label)?;

        logger.info(format!("Disk {} ready at {}:", disk.number, letter))?;
        batch.partitioned.push(PartitionedDisk {
            number: disk.number,
            letter,
        });
    }

    Ok(batch)
}
