use anyhow::{Context, Result};
use firstboot_core::parse_drive_letter;

use crate::powershell;

const MAPPED_SHARES: &str =
    "Get-CimInstance -ClassName Win32_MappedLogicalDisk | ForEach-Object { $_.DeviceID }";

pub fn mapped_letters() -> Result<Vec<char>> {
    let output = powershell::run(MAPPED_SHARES).context("list mapped network drives")?;
    Ok(parse_device_ids(&output))
}

fn parse_device_ids(output: &str) -> Vec<char> {
    powershell::lines(output).filter_map(parse_drive_letter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_device_ids() {
        assert_eq!(parse_device_ids("Z:\r\nY:\r\n\r\n"), vec!['Z', 'Y']);
        assert!(parse_device_ids("").is_empty());
    }
}
