use anyhow::Result;
use firstboot_core::{free_drive_letters, DiskHost};

/// Free letters in ascending order. Reads the host every call; never cache the result across
/// allocations.
pub fn available_drive_letters<H: DiskHost + ?Sized>(host: &H) -> Result<Vec<char>> {
    let mut used = host.volume_letters()?;
    used.extend(host.mapped_share_letters()?);
    Ok(free_drive_letters(used))
}

/// Lowest free letter, which is also the head of `available_drive_letters`.
pub fn first_available_drive_letter<H: DiskHost + ?Sized>(host: &H) -> Result<Option<char>> {
    Ok(available_drive_letters(host)?.into_iter().next())
}
