use anyhow::{anyhow, Result};

pub fn mounted_letters() -> Result<Vec<char>> {
    Err(anyhow!("mounted volume letters require Windows"))
}
