//! Service configuration.
//!
//! Everything a deployment can tune lives here and is handed to the HTTP
//! layer at construction time; nothing is read from globals.

use crate::builder::StakeAccountStrategy;
use crate::pubkey::Pubkey;
use crate::rpc::DEFAULT_RPC_TIMEOUT;
use std::time::Duration;

/// Yonta Labs validator vote account.
pub const DEFAULT_VOTE_ACCOUNT: &str = "BeSov1og3sEYyH9JY3ap7QcQDvVX8f4sugfNPf9YLkcV";

/// Decoded form of [`DEFAULT_VOTE_ACCOUNT`].
const DEFAULT_VOTE_ACCOUNT_BYTES: [u8; 32] = [
    158, 44, 138, 151, 112, 227, 246, 52, 223, 98, 181, 79, 137, 219, 171, 53, 207, 46, 75, 254,
    65, 48, 21, 80, 77, 113, 20, 115, 45, 20, 49, 126,
];

/// Actions spec version advertised in `X-Action-Version`.
pub const DEFAULT_ACTION_VERSION: &str = "2.4";

/// Solana cluster the service builds transactions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cluster {
    #[default]
    Mainnet,
    Devnet,
    Testnet,
}

impl Cluster {
    /// CAIP-2 chain id (`solana:` + first 32 chars of the genesis hash).
    pub fn chain_id(&self) -> &'static str {
        match self {
            Self::Mainnet => "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
            Self::Devnet => "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1",
            Self::Testnet => "solana:4uhcVJyU9pJkvQyS88uRDiswHXSCkY3z",
        }
    }

    /// Public RPC endpoint operated by the Solana Foundation.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
        }
    }
}

/// Text and amounts shown by wallets rendering the action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionConfig {
    pub title: String,
    pub label: String,
    pub description: String,
    /// Root-relative path (resolved against the request origin) or absolute URL
    pub icon: String,
    /// Used in the POST response message
    pub validator_name: String,
    /// One button per amount, in SOL
    pub preset_amounts: Vec<f64>,
    /// Lower bound advertised for the custom amount input
    pub min_amount: f64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            title: "Stake with Yonta Labs".to_string(),
            label: "Stake with Yonta".to_string(),
            description: "Delegate your SOL directly to the Yonta Labs validator: 0% commission, \
                          Jito MEV rewards, independent and veteran-owned, community-first \
                          Solana infrastructure."
                .to_string(),
            icon: "/yonta-logo.png".to_string(),
            validator_name: "Yonta Labs".to_string(),
            preset_amounts: vec![1.0, 5.0],
            min_amount: 0.01,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub cluster: Cluster,
    pub rpc_url: String,
    pub rpc_timeout: Duration,
    /// Validator every stake is delegated to
    pub vote_account: Pubkey,
    pub stake_account: StakeAccountStrategy,
    pub action_version: String,
    pub action: ActionConfig,
}

impl ServiceConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            cluster,
            rpc_url: cluster.default_rpc_url().to_string(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            vote_account: Pubkey::new_from_array(DEFAULT_VOTE_ACCOUNT_BYTES),
            stake_account: StakeAccountStrategy::default(),
            action_version: DEFAULT_ACTION_VERSION.to_string(),
            action: ActionConfig::default(),
        }
    }

    pub fn chain_id(&self) -> &'static str {
        self.cluster.chain_id()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::for_cluster(Cluster::default())
    }
}
