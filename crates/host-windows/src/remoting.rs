use anyhow::{Context, Result};
use firstboot_core::{CredSspRole, ExecutionPolicy};

use crate::powershell::{self, quote};

pub fn set_execution_policy(policy: ExecutionPolicy) -> Result<()> {
    powershell::run(&execution_policy_script(policy))
        .with_context(|| format!("set execution policy {}", policy.as_str()))?;
    Ok(())
}

pub fn enable_remoting() -> Result<()> {
    powershell::run("Enable-PSRemoting -Force -SkipNetworkProfileCheck | Out-Null")
        .context("enable PowerShell remoting")?;
    Ok(())
}

/// Lets the WinRM listener take unencrypted traffic from `trusted_hosts`.
pub fn relax_transport(trusted_hosts: &str) -> Result<()> {
    powershell::run(&relax_transport_script(trusted_hosts))
        .context("relax WSMan transport settings")?;
    Ok(())
}

pub fn restart_remoting() -> Result<()> {
    powershell::run("Restart-Service -Name WinRM -Force").context("restart WinRM")?;
    Ok(())
}

pub fn enable_credssp(role: CredSspRole, delegate_to: Option<&str>) -> Result<()> {
    powershell::run(&credssp_script(role, delegate_to))
        .with_context(|| format!("enable CredSSP {} role", role.as_str()))?;
    Ok(())
}

fn execution_policy_script(policy: ExecutionPolicy) -> String {
    format!(
        "Set-ExecutionPolicy -ExecutionPolicy {} -Scope LocalMachine -Force",
        policy.as_str()
    )
}

fn relax_transport_script(trusted_hosts: &str) -> String {
    format!(
        "Set-Item -Path WSMan:\\localhost\\Service\\AllowUnencrypted -Value $true -Force; \
         Set-Item -Path WSMan:\\localhost\\Client\\TrustedHosts -Value {} -Force",
        quote(trusted_hosts)
    )
}

fn credssp_script(role: CredSspRole, delegate_to: Option<&str>) -> String {
    match (role, delegate_to) {
        (CredSspRole::Client, Some(peer)) => format!(
            "Enable-WSManCredSSP -Role Client -DelegateComputer {} -Force | Out-Null",
            quote(peer)
        ),
        _ => format!("Enable-WSManCredSSP -Role {} -Force | Out-Null", role.as_str()),
    }
}
