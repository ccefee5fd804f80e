//! Chain queries needed to assemble a stake transaction.
//!
//! Only two calls are made per request: the rent-exempt reserve for a stake
//! account and the latest blockhash. [`ChainRpc`] is the seam; [`SolanaRpc`]
//! talks to a JSON-RPC endpoint through `solana-rpc-client`.

use crate::error::StakeActionError;
use solana_commitment_config::CommitmentConfig;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::client_error::{Error as ClientError, ErrorKind as ClientErrorKind};
use solana_sdk::hash::Hash;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only chain access used by the stake builder.
pub trait ChainRpc: Send + Sync {
    /// Most recent blockhash at the configured commitment.
    fn latest_blockhash(&self) -> impl Future<Output = Result<Hash, StakeActionError>> + Send;

    /// Lamports an account of `space` bytes must hold to be rent exempt.
    fn minimum_balance_for_rent_exemption(
        &self,
        space: usize,
    ) -> impl Future<Output = Result<u64, StakeActionError>> + Send;
}

/// JSON-RPC backed [`ChainRpc`].
pub struct SolanaRpc {
    client: RpcClient,
    commitment: CommitmentConfig,
    timeout: Duration,
}

impl SolanaRpc {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let commitment = CommitmentConfig::finalized();
        Self {
            client: RpcClient::new_with_timeout_and_commitment(url.into(), timeout, commitment),
            commitment,
            timeout,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    async fn with_timeout<T, F>(&self, call: &str, fut: F) -> Result<T, StakeActionError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify(call, err)),
            Err(_) => Err(StakeActionError::NetworkUnavailable(format!(
                "{} timed out after {:?}",
                call, self.timeout
            ))),
        }
    }
}

impl ChainRpc for SolanaRpc {
    async fn latest_blockhash(&self) -> Result<Hash, StakeActionError> {
        let (blockhash, last_valid_block_height) = self
            .with_timeout(
                "getLatestBlockhash",
                self.client
                    .get_latest_blockhash_with_commitment(self.commitment),
            )
            .await?;
        tracing::debug!(%blockhash, last_valid_block_height, "fetched latest blockhash");
        Ok(blockhash)
    }

    async fn minimum_balance_for_rent_exemption(
        &self,
        space: usize,
    ) -> Result<u64, StakeActionError> {
        self.with_timeout(
            "getMinimumBalanceForRentExemption",
            self.client.get_minimum_balance_for_rent_exemption(space),
        )
        .await
    }
}

/// Transport failures are `NetworkUnavailable`; anything the node answered is `Rpc`.
fn classify(call: &str, err: ClientError) -> StakeActionError {
    match err.kind() {
        ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
            StakeActionError::NetworkUnavailable(format!("{}: {}", call, err))
        }
        _ => StakeActionError::Rpc(format!("{}: {}", call, err)),
    }
}
