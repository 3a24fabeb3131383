use alloy_primitives::hex;
use itertools::Itertools;
use simnet_network_spec::config::{ClientDefinition, ConsensusType};
use simnet_node::{handle::NodeHandle, provisioner::NodeProvisioner, role::NodeRole};
use simnet_node_config::{
    bundle::{NodeConfig, bundle},
    keys::{
        BN_API_IP, BOOTNODE, BOOTNODE_ENRS, CLIQUE_PRIVATEKEY, ETH1_ENGINE_RPC_ADDRS,
        ETH1_RPC_ADDRS, MINER,
    },
};
use tracing::{debug, info};

use crate::{
    errors::TestnetError,
    prepared::PreparedTestnet,
    testnet::{Testnet, ValidatorClient},
};

/// How a new node joins its layer.
#[derive(Debug)]
enum Bootstrap<'a, H> {
    /// No node of the layer runs yet; the new node is the one everybody else connects to.
    Anchor,
    /// Connect to the first node of the layer.
    Peer(&'a H),
}

impl<'a, H> Bootstrap<'a, H> {
    fn of(nodes: &'a [H]) -> Self {
        if nodes.is_empty() {
            Bootstrap::Anchor
        } else {
            Bootstrap::Peer(&nodes[0])
        }
    }
}

fn check_index(
    role: NodeRole,
    dependency: &'static str,
    index: usize,
    available: usize,
) -> Result<(), TestnetError> {
    if index >= available {
        return Err(TestnetError::Index {
            role,
            dependency,
            index,
            available,
        });
    }
    Ok(())
}

async fn start_node<P: NodeProvisioner>(
    provisioner: &P,
    role: NodeRole,
    client: &ClientDefinition,
    config: NodeConfig,
) -> Result<P::Handle, TestnetError> {
    info!("Starting {role} node: {client}");
    debug!("{role} node config:\n{}", config.to_env());

    provisioner
        .start(role, client, config)
        .await
        .map_err(|source| TestnetError::Provision {
            role,
            client: client.to_string(),
            source,
        })
}

impl PreparedTestnet {
    /// Starts an execution node and appends it to `testnet`.
    ///
    /// The first execution node produces blocks with the producer credentials of the execution
    /// genesis, every later one bootstraps off the first.
    pub async fn start_execution_node<P: NodeProvisioner>(
        &self,
        testnet: &mut Testnet<P::Handle>,
        provisioner: &P,
        client: &ClientDefinition,
        consensus: ConsensusType,
    ) -> Result<(), TestnetError> {
        let role = NodeRole::Execution;
        let producer = &self.eth1_genesis.producer;

        let bootstrap_config = match Bootstrap::of(&testnet.execution_nodes) {
            Bootstrap::Anchor => match consensus {
                ConsensusType::Ethash => {
                    NodeConfig::new().with_param(MINER, hex_without_prefix(producer.miner))
                }
                ConsensusType::Clique => NodeConfig::new()
                    .with_param(
                        CLIQUE_PRIVATEKEY,
                        hex_without_prefix(producer.clique_private_key),
                    )
                    .with_param(MINER, hex_without_prefix(producer.clique_signer)),
            },
            Bootstrap::Peer(first) => {
                let enode = first
                    .discovery_address()
                    .await
                    .map_err(|source| TestnetError::Dependency {
                        role,
                        dependency: NodeRole::Execution,
                        index: 0,
                        source,
                    })?;
                NodeConfig::new().with_param(BOOTNODE, enode)
            }
        };

        let config = bundle([&self.execution_config, &bootstrap_config]);
        let handle = start_node(provisioner, role, client, config).await?;
        testnet.execution_nodes.push(handle);
        Ok(())
    }

    /// Starts a beacon node connected to the execution nodes at `eth1_indices` and appends it to
    /// `testnet`.
    pub async fn start_beacon_node<P: NodeProvisioner>(
        &self,
        testnet: &mut Testnet<P::Handle>,
        provisioner: &P,
        client: &ClientDefinition,
        eth1_indices: &[usize],
    ) -> Result<(), TestnetError> {
        let role = NodeRole::Beacon;

        for &index in eth1_indices {
            check_index(
                role,
                "execution nodes",
                index,
                testnet.execution_nodes.len(),
            )?;
        }

        let mut user_rpc_addresses = Vec::with_capacity(eth1_indices.len());
        let mut engine_rpc_addresses = Vec::with_capacity(eth1_indices.len());
        for &index in eth1_indices {
            let node = &testnet.execution_nodes[index];
            let dependency_error = |source| TestnetError::Dependency {
                role,
                dependency: NodeRole::Execution,
                index,
                source,
            };
            user_rpc_addresses.push(node.user_rpc_address().await.map_err(dependency_error)?);
            engine_rpc_addresses.push(node.engine_rpc_address().await.map_err(dependency_error)?);
        }

        let mut wiring_config = NodeConfig::new()
            .with_param(ETH1_RPC_ADDRS, user_rpc_addresses.iter().join(","))
            .with_param(ETH1_ENGINE_RPC_ADDRS, engine_rpc_addresses.iter().join(","));

        if let Bootstrap::Peer(first) = Bootstrap::of(&testnet.beacon_nodes) {
            let enr = first
                .discovery_record()
                .await
                .map_err(|source| TestnetError::Dependency {
                    role,
                    dependency: NodeRole::Beacon,
                    index: 0,
                    source,
                })?;
            wiring_config = wiring_config.with_param(BOOTNODE_ENRS, enr);
        }

        let config = bundle([&self.beacon_config, &wiring_config]);
        let handle = start_node(provisioner, role, client, config).await?;
        testnet.beacon_nodes.push(handle);
        Ok(())
    }

    /// Starts a validator client running the keys of tranche `tranche_index` against beacon node
    /// `beacon_index` and appends it to `testnet`.
    pub async fn start_validator_client<P: NodeProvisioner>(
        &self,
        testnet: &mut Testnet<P::Handle>,
        provisioner: &P,
        client: &ClientDefinition,
        beacon_index: usize,
        tranche_index: usize,
    ) -> Result<(), TestnetError> {
        let role = NodeRole::Validator;

        check_index(role, "beacon nodes", beacon_index, testnet.beacon_nodes.len())?;
        check_index(role, "key tranches", tranche_index, self.key_tranches.len())?;

        let beacon_api_address = testnet.beacon_nodes[beacon_index]
            .beacon_api_address()
            .await
            .map_err(|source| TestnetError::Dependency {
                role,
                dependency: NodeRole::Beacon,
                index: beacon_index,
                source,
            })?;

        let tranche = self.key_tranches[tranche_index].clone();
        let config = bundle([
            &self.validator_config,
            &NodeConfig::new().with_param(BN_API_IP, beacon_api_address),
            &tranche.to_bundle()?,
        ]);

        let handle = start_node(provisioner, role, client, config).await?;
        testnet
            .validator_clients
            .push(ValidatorClient { handle, tranche });
        Ok(())
    }

    /// Starts the standard topology: for every node definition `i`, an execution node, a beacon
    /// node on execution node `i` and a validator client on beacon node `i` with tranche `i`.
    pub async fn start_testnet<P: NodeProvisioner>(
        &self,
        provisioner: &P,
    ) -> Result<Testnet<P::Handle>, TestnetError> {
        let mut testnet = self.create_testnet();
        let consensus = self.eth1_genesis.consensus;

        for (index, node) in self.nodes.iter().enumerate() {
            self.start_execution_node(&mut testnet, provisioner, &node.execution_client, consensus)
                .await?;
            self.start_beacon_node(&mut testnet, provisioner, &node.consensus_client, &[index])
                .await?;
            self.start_validator_client(
                &mut testnet,
                provisioner,
                &node.validator_client,
                index,
                index,
            )
            .await?;
        }

        info!(
            "Started testnet with {} execution nodes, {} beacon nodes and {} validator clients",
            testnet.execution_nodes.len(),
            testnet.beacon_nodes.len(),
            testnet.validator_clients.len()
        );
        Ok(testnet)
    }
}

fn hex_without_prefix(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}
