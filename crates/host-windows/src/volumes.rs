use anyhow::Result;
use windows::Win32::Storage::FileSystem::GetLogicalDrives;

/// Letters bound to a mounted volume, straight from the logical drive bitmask.
pub fn mounted_letters() -> Result<Vec<char>> {
    let mask = unsafe { GetLogicalDrives() };
    Ok(letters_from_mask(mask))
}

fn letters_from_mask(mask: u32) -> Vec<char> {
    ('A'..='Z')
        .enumerate()
        .filter(|(idx, _)| mask & (1u32 << idx) != 0)
        .map(|(_, letter)| letter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bitmask() {
        assert_eq!(letters_from_mask(0b1101), vec!['A', 'C', 'D']);
        assert_eq!(letters_from_mask(1 << 25), vec!['Z']);
    }
}
