use std::{
    net::Ipv4Addr,
    sync::atomic::{AtomicU8, Ordering},
};

use alloy_primitives::hex;
use async_trait::async_trait;
use enr::{CombinedKey, Enr};
use simnet_network_spec::{
    config::ClientDefinition,
    constants::{
        PORT_BEACON_API, PORT_BEACON_TCP, PORT_BEACON_UDP, PORT_ENGINE_RPC, PORT_EXECUTION_P2P,
        PORT_USER_RPC,
    },
};
use simnet_node::{
    errors::{Interface, ProvisionError, Unavailable},
    handle::NodeHandle,
    provisioner::NodeProvisioner,
    role::NodeRole,
};
use simnet_node_config::bundle::NodeConfig;
use tracing::info;

/// Provisioner that only logs the configuration each node would have been started with.
///
/// Every node gets its own loopback address and a freshly generated secp256k1 identity, so the
/// addresses wired into later nodes have the same shape as those of real clients.
#[derive(Debug)]
pub struct DryRunProvisioner {
    next_host: AtomicU8,
}

impl DryRunProvisioner {
    pub fn new() -> Self {
        Self {
            next_host: AtomicU8::new(1),
        }
    }
}

impl Default for DryRunProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeProvisioner for DryRunProvisioner {
    type Handle = DryRunHandle;

    async fn start(
        &self,
        role: NodeRole,
        client: &ClientDefinition,
        config: NodeConfig,
    ) -> Result<DryRunHandle, ProvisionError> {
        let host = self
            .next_host
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |host| {
                host.checked_add(1)
            })
            .map_err(|_| ProvisionError::Startup("out of loopback addresses".to_string()))?;
        let ip = Ipv4Addr::new(127, 0, 0, host);
        let key = CombinedKey::generate_secp256k1();

        let (enode, enr) = match role {
            NodeRole::Execution => (Some(enode_url(&key, ip)?), None),
            NodeRole::Beacon => (None, Some(enr_record(&key, ip)?)),
            NodeRole::Validator => (None, None),
        };

        info!("{role} node {client} at {ip}");
        for (name, value) in config.params() {
            info!("  {name}={value}");
        }
        for (path, contents) in config.files() {
            info!("  {path} ({} bytes)", contents.len());
        }

        Ok(DryRunHandle {
            role,
            client: client.clone(),
            ip,
            enode,
            enr,
        })
    }
}

fn enode_url(key: &CombinedKey, ip: Ipv4Addr) -> Result<String, ProvisionError> {
    let CombinedKey::Secp256k1(signing_key) = key else {
        return Err(ProvisionError::Startup(
            "execution node identity must be secp256k1".to_string(),
        ));
    };
    let public_key = signing_key.verifying_key().to_encoded_point(false);
    // Drop the SEC1 tag byte, enode ids are the raw 64-byte point.
    let node_id = hex::encode(&public_key.as_bytes()[1..]);
    Ok(format!("enode://{node_id}@{ip}:{PORT_EXECUTION_P2P}"))
}

fn enr_record(key: &CombinedKey, ip: Ipv4Addr) -> Result<String, ProvisionError> {
    let enr = Enr::<CombinedKey>::builder()
        .ip4(ip)
        .tcp4(PORT_BEACON_TCP)
        .udp4(PORT_BEACON_UDP)
        .build(key)
        .map_err(|err| ProvisionError::Startup(format!("Failed to build ENR: {err:?}")))?;
    Ok(enr.to_base64())
}

#[derive(Debug, Clone)]
pub struct DryRunHandle {
    role: NodeRole,
    client: ClientDefinition,
    ip: Ipv4Addr,
    enode: Option<String>,
    enr: Option<String>,
}

impl DryRunHandle {
    fn require_role(&self, expected: NodeRole, interface: Interface) -> Result<(), Unavailable> {
        if self.role != expected {
            return Err(Unavailable::new(
                interface,
                format!("{} node does not serve it", self.role),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NodeHandle for DryRunHandle {
    fn client(&self) -> &ClientDefinition {
        &self.client
    }

    async fn discovery_address(&self) -> Result<String, Unavailable> {
        self.enode.clone().ok_or_else(|| {
            Unavailable::new(
                Interface::DiscoveryAddress,
                format!("{} node has no enode", self.role),
            )
        })
    }

    async fn user_rpc_address(&self) -> Result<String, Unavailable> {
        self.require_role(NodeRole::Execution, Interface::UserRpc)?;
        Ok(format!("http://{}:{PORT_USER_RPC}", self.ip))
    }

    async fn engine_rpc_address(&self) -> Result<String, Unavailable> {
        self.require_role(NodeRole::Execution, Interface::EngineRpc)?;
        Ok(format!("http://{}:{PORT_ENGINE_RPC}", self.ip))
    }

    async fn beacon_api_address(&self) -> Result<String, Unavailable> {
        self.require_role(NodeRole::Beacon, Interface::BeaconApi)?;
        Ok(format!("http://{}:{PORT_BEACON_API}", self.ip))
    }

    async fn discovery_record(&self) -> Result<String, Unavailable> {
        self.enr.clone().ok_or_else(|| {
            Unavailable::new(
                Interface::DiscoveryRecord,
                format!("{} node has no ENR", self.role),
            )
        })
    }
}
