use std::collections::HashSet;

/// Assignable letters. A and B stay reserved for legacy removable media.
pub const DRIVE_LETTERS: [char; 24] = [
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T',
    'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Letters from `DRIVE_LETTERS` not present in `used`, in ascending order.
pub fn free_drive_letters<I>(used: I) -> Vec<char>
where
    I: IntoIterator<Item = char>,
{
    let used: HashSet<char> = used
        .into_iter()
        .map(|letter| letter.to_ascii_uppercase())
        .collect();
    DRIVE_LETTERS
        .iter()
        .copied()
        .filter(|letter| !used.contains(letter))
        .collect()
}

/// Pulls the drive letter out of strings such as `D`, `D:` or `D:\`.
pub fn parse_drive_letter(value: &str) -> Option<char> {
    let trimmed = value.trim().trim_end_matches('\\').trim_end_matches(':');
    let mut chars = trimmed.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_ascii_alphabetic() {
        return None;
    }
    Some(letter.to_ascii_uppercase())
}
