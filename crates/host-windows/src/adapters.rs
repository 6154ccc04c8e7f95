use anyhow::{Context, Result};

use crate::powershell::{self, quote};

pub fn adapter_names() -> Result<Vec<String>> {
    let output = powershell::run("Get-NetAdapter | ForEach-Object { $_.Name }")
        .context("list network adapters")?;
    Ok(powershell::lines(&output).map(str::to_string).collect())
}

pub fn advanced_property(adapter: &str, display_name: &str) -> Result<Option<String>> {
    let output = powershell::run(&property_script(adapter, display_name))
        .with_context(|| format!("read '{}' on adapter {}", display_name, adapter))?;
    Ok(first_value(&output))
}

fn first_value(output: &str) -> Option<String> {
    powershell::lines(output).next().map(str::to_string)
}

pub fn rename(from: &str, to: &str) -> Result<()> {
    powershell::run(&rename_script(from, to))
        .with_context(|| format!("rename adapter {} to {}", from, to))?;
    Ok(())
}

fn property_script(adapter: &str, display_name: &str) -> String {
    format!(
        "Get-NetAdapterAdvancedProperty -Name {} -DisplayName {} -ErrorAction SilentlyContinue | ForEach-Object {{ $_.DisplayValue }}",
        quote(adapter),
        quote(display_name)
    )
}

fn rename_script(from: &str, to: &str) -> String {
    format!("Rename-NetAdapter -Name {} -NewName {}", quote(from), quote(to))
}
