use anyhow::Result;
use firstboot_core::{CredSspRole, ExecutionPolicy, RemotingHost};
use firstboot_logger::Logger;

/// Accept remoting and CredSSP delegation from any peer.
pub const ANY_PEER: &str = "*";

/// Opens the host to remote management. Every setting is re-asserted on each run.
///
/// The listener ends up accepting unencrypted traffic from any host and clients may delegate
/// credentials anywhere. That is intended for lab and first-boot images only.
pub fn configure_remoting<H: RemotingHost + ?Sized>(host: &H, logger: &Logger) -> Result<()> {
    logger.info("Configuring remoting")?;
    logger.info("Setting execution policy to Unrestricted")?;
    host.set_execution_policy(ExecutionPolicy::Unrestricted)?;

    logger.info("Enabling PowerShell remoting")?;
    host.enable_remoting()?;

    logger.warning(format!(
        "Allowing unencrypted WinRM traffic and trusting hosts '{}'",
        ANY_PEER
    ))?;
    host.relax_transport(ANY_PEER)?;

    logger.info("Restarting WinRM")?;
    host.restart_remoting()?;

    logger.info("Enabling CredSSP for server and client roles")?;
    host.enable_credssp(CredSspRole::Server, None)?;
    host.enable_credssp(CredSspRole::Client, Some(ANY_PEER))?;

    logger.info("Remoting configured")?;
    Ok(())
}
