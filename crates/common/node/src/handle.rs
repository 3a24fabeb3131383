use async_trait::async_trait;
use simnet_network_spec::config::ClientDefinition;

use crate::errors::Unavailable;

/// A running node returned by a [`NodeProvisioner`](crate::provisioner::NodeProvisioner).
///
/// Every address lookup may fail with [`Unavailable`] while the node has not exposed the
/// interface yet, or when the interface does not exist for the node's role.
#[async_trait]
pub trait NodeHandle: Send + Sync {
    fn client(&self) -> &ClientDefinition;

    /// Execution layer peer address (enode URL).
    async fn discovery_address(&self) -> Result<String, Unavailable>;

    /// JSON-RPC endpoint for users.
    async fn user_rpc_address(&self) -> Result<String, Unavailable>;

    /// Authenticated engine API endpoint.
    async fn engine_rpc_address(&self) -> Result<String, Unavailable>;

    /// Address validator clients reach the beacon API on.
    async fn beacon_api_address(&self) -> Result<String, Unavailable>;

    /// Consensus layer ENR.
    async fn discovery_record(&self) -> Result<String, Unavailable>;
}
