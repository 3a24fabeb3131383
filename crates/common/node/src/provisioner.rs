use async_trait::async_trait;
use simnet_network_spec::config::ClientDefinition;
use simnet_node_config::bundle::NodeConfig;

use crate::{errors::ProvisionError, handle::NodeHandle, role::NodeRole};

/// Starts node images. Timeouts and readiness polling are the provisioner's concern.
#[async_trait]
pub trait NodeProvisioner: Send + Sync {
    type Handle: NodeHandle;

    async fn start(
        &self,
        role: NodeRole,
        client: &ClientDefinition,
        config: NodeConfig,
    ) -> Result<Self::Handle, ProvisionError>;
}
