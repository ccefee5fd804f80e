//! solana-stake-action: a Solana Actions (Blinks) endpoint for native staking.
//!
//! The crate builds stake transactions with the official Solana SDK crates
//! (`solana-system-interface`, `solana-stake-interface`) and serves them over
//! HTTP with actix-web.
//!
//! # Architecture
//!
//! 1. **Core** (`builder`, `rpc`, `keypair`, `pubkey`, `transaction`) - validate
//!    input, query the chain, assemble and encode the transaction
//! 2. **Actions payloads** (`action`) - descriptor, manifest and POST shapes
//! 3. **HTTP** (`server`) - actix-web routes, headers and the error envelope
//!
//! # Usage from Rust
//!
//! ```rust,no_run
//! use solana_stake_action::{Pubkey, SolanaRpc, StakeAccountStrategy, StakeTransactionBuilder};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), solana_stake_action::StakeActionError> {
//! let rpc = SolanaRpc::new("https://api.devnet.solana.com", Duration::from_secs(10));
//! let builder = StakeTransactionBuilder::new(rpc, StakeAccountStrategy::default());
//! let vote: Pubkey = "BeSov1og3sEYyH9JY3ap7QcQDvVX8f4sugfNPf9YLkcV".parse().unwrap();
//!
//! let built = builder
//!     .build("DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB", 1.5, &vote)
//!     .await?;
//! println!("{}", built.to_base64()?);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod builder;
pub mod config;
mod error;
pub mod keypair;
pub mod pubkey;
pub mod rpc;
pub mod server;
pub mod transaction;

// Re-export core types at crate root
pub use builder::{
    BuiltStakeTransaction, StakeAccountKind, StakeAccountStrategy, StakeRequest,
    StakeTransactionBuilder,
};
pub use config::{ActionConfig, Cluster, ServiceConfig};
pub use error::StakeActionError;
pub use keypair::{EntropySource, Keypair, KeypairExt, OsEntropy};
pub use pubkey::{Pubkey, PubkeyExt};
pub use rpc::{ChainRpc, SolanaRpc};
pub use server::StakeActionService;
pub use transaction::{Transaction, TransactionExt};
