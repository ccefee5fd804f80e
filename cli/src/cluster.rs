//! Cluster and stake account argument types for the server CLI

use clap::ValueEnum;
use solana_stake_action::Cluster;

/// CLI argument type for cluster selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClusterArg {
    Mainnet,
    Devnet,
    Testnet,
}

impl From<ClusterArg> for Cluster {
    fn from(arg: ClusterArg) -> Self {
        match arg {
            ClusterArg::Mainnet => Cluster::Mainnet,
            ClusterArg::Devnet => Cluster::Devnet,
            ClusterArg::Testnet => Cluster::Testnet,
        }
    }
}

/// How new stake accounts are addressed
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StakeAccountArg {
    /// Derive from the staker address and a random seed (staker signs alone)
    Seeded,
    /// Generate a keypair that co-signs the transaction
    Ephemeral,
}
