use std::collections::HashSet;

use async_trait::async_trait;
use simnet_network_spec::config::ClientDefinition;
use simnet_node::{
    errors::{Interface, ProvisionError, Unavailable},
    handle::NodeHandle,
    provisioner::NodeProvisioner,
    role::NodeRole,
};
use simnet_node_config::bundle::NodeConfig;
use tokio::sync::Mutex;

/// A node start recorded by [`MockProvisioner`].
#[derive(Debug, Clone)]
pub struct StartedNode {
    pub role: NodeRole,
    pub client: ClientDefinition,
    pub config: NodeConfig,
}

/// Provisioner that starts nothing and remembers every configuration it was handed.
#[derive(Debug, Default)]
pub struct MockProvisioner {
    started: Mutex<Vec<StartedNode>>,
    unavailable: HashSet<Interface>,
    failing_clients: HashSet<String>,
}

impl MockProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles started from now on report `interface` as unavailable.
    pub fn with_unavailable(mut self, interface: Interface) -> Self {
        self.unavailable.insert(interface);
        self
    }

    /// Starting a client with this name fails.
    pub fn with_failing_client(mut self, name: impl Into<String>) -> Self {
        self.failing_clients.insert(name.into());
        self
    }

    /// Every successful start, in order.
    pub async fn started(&self) -> Vec<StartedNode> {
        self.started.lock().await.clone()
    }
}

#[async_trait]
impl NodeProvisioner for MockProvisioner {
    type Handle = MockHandle;

    async fn start(
        &self,
        role: NodeRole,
        client: &ClientDefinition,
        config: NodeConfig,
    ) -> Result<MockHandle, ProvisionError> {
        if self.failing_clients.contains(&client.name) {
            return Err(ProvisionError::Startup(format!(
                "{client} exited during start-up"
            )));
        }

        let mut started = self.started.lock().await;
        let ordinal = started.iter().filter(|node| node.role == role).count();
        started.push(StartedNode {
            role,
            client: client.clone(),
            config,
        });

        Ok(MockHandle {
            role,
            ordinal,
            client: client.clone(),
            unavailable: self.unavailable.clone(),
        })
    }
}

/// Handle of a node started by [`MockProvisioner`].
///
/// Addresses are derived from the role and the start order within the role, so the `n`th beacon
/// node always answers with the same addresses.
#[derive(Debug, Clone)]
pub struct MockHandle {
    pub role: NodeRole,
    pub ordinal: usize,
    client: ClientDefinition,
    unavailable: HashSet<Interface>,
}

impl MockHandle {
    fn host(&self) -> String {
        format!("{}-{}", self.role, self.ordinal)
    }

    fn address(&self, interface: Interface, address: String) -> Result<String, Unavailable> {
        if self.unavailable.contains(&interface) {
            return Err(Unavailable::new(
                interface,
                format!("{} has not started listening", self.host()),
            ));
        }
        Ok(address)
    }
}

#[async_trait]
impl NodeHandle for MockHandle {
    fn client(&self) -> &ClientDefinition {
        &self.client
    }

    async fn discovery_address(&self) -> Result<String, Unavailable> {
        self.address(
            Interface::DiscoveryAddress,
            format!("enode://{}@{}:30303", self.host(), self.host()),
        )
    }

    async fn user_rpc_address(&self) -> Result<String, Unavailable> {
        self.address(Interface::UserRpc, format!("http://{}:8545", self.host()))
    }

    async fn engine_rpc_address(&self) -> Result<String, Unavailable> {
        self.address(Interface::EngineRpc, format!("http://{}:8551", self.host()))
    }

    async fn beacon_api_address(&self) -> Result<String, Unavailable> {
        self.address(Interface::BeaconApi, format!("http://{}:4000", self.host()))
    }

    async fn discovery_record(&self) -> Result<String, Unavailable> {
        self.address(Interface::DiscoveryRecord, format!("enr:-{}", self.host()))
    }
}
