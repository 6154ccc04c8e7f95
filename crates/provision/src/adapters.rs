use anyhow::Result;
use firstboot_core::{AdapterHost, NetAdapterDescriptor};
use firstboot_logger::Logger;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterRename {
    pub from: String,
    pub to: String,
}

/// Renames every adapter whose name differs from the one the hypervisor reports through the
/// `property` advanced property. Adapters without that property are left alone.
pub fn align_adapter_names<H: AdapterHost + ?Sized>(
    host: &H,
    logger: &Logger,
    property: &str,
) -> Result<Vec<AdapterRename>> {
    let mut renamed = Vec::new();

    for name in host.list_adapters()? {
        let Some(suggested) = host.adapter_property(&name, property)? else {
            logger.info(format!("Adapter '{}' has no '{}' property, skipping", name, property))?;
            continue;
        };
        let adapter = NetAdapterDescriptor {
            current_name: name,
            hypervisor_suggested_name: suggested,
        };

        if !adapter.needs_rename() {
            logger.info(format!(
                "Adapter '{}' already matches its hypervisor name, skipping",
                adapter.current_name
            ))?;
            continue;
        }

        logger.info(format!(
            "Renaming adapter '{}' to '{}'",
            adapter.current_name, adapter.hypervisor_suggested_name
        ))?;
        host.rename_adapter(&adapter.current_name, &adapter.hypervisor_suggested_name)?;
        renamed.push(AdapterRename {
            from: adapter.current_name,
            to: adapter.hypervisor_suggested_name,
        });
    }

    Ok(renamed)
}
