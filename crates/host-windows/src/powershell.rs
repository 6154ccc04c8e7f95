use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;

use firstboot_core::ScriptEnv;

const POWERSHELL: &str = "powershell";

/// Runs `script` with errors promoted to terminating so a failing cmdlet yields a non-zero exit.
pub fn run(script: &str) -> Result<String> {
    let wrapped = format!("$ErrorActionPreference = 'Stop'; {}", script);
    let output = Command::new(POWERSHELL)
        .args([
            "-NoProfile",
            "-NonInteractive",
            "-ExecutionPolicy",
            "Bypass",
            "-Command",
            &wrapped,
        ])
        .output()
        .with_context(|| format!("run {}", POWERSHELL))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "{} failed: {}",
            first_word(script),
            first_line(&stderr)
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn run_file(path: &Path, env: &ScriptEnv) -> Result<()> {
    let status = Command::new(POWERSHELL)
        .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-File"])
        .arg(path)
        .envs(env.vars.iter().map(|(key, value)| (key.as_str(), value.as_str())))
        .status()
        .with_context(|| format!("run {}", path.display()))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("{} exited with {}", path.display(), status))
    }
}

/// Single-quoted PowerShell literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Non-empty trimmed lines of command output.
pub fn lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// PowerShell error records span several lines; the first carries the message.
fn first_line(stderr: &str) -> &str {
    lines(stderr).next().unwrap_or("no error output")
}

fn first_word(script: &str) -> &str {
    script.split_whitespace().next().unwrap_or(POWERSHELL)
}
