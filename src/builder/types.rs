//! Types for stake transaction building.

use crate::error::StakeActionError;
use crate::pubkey::{Pubkey, PubkeyExt};
use crate::transaction::{Transaction, TransactionExt};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Longest seed `create_with_seed` accepts.
const MAX_SEED_LEN: usize = 32;
/// Random bytes appended to every seed, hex encoded.
pub(crate) const SEED_TOKEN_BYTES: usize = 8;
/// Prefix budget left once the `-` separator and hex token are accounted for.
pub const MAX_SEED_PREFIX_LEN: usize = MAX_SEED_LEN - 1 - SEED_TOKEN_BYTES * 2;
/// Seed prefix of the default [`StakeAccountStrategy`].
pub const DEFAULT_SEED_PREFIX: &str = "yonta";

/// Parse the `amount` query parameter.
pub fn parse_sol_amount(raw: &str) -> Result<f64, StakeActionError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| StakeActionError::InvalidAmount(raw.to_string()))?;
    validate_sol_amount(amount)?;
    Ok(amount)
}

fn validate_sol_amount(sol: f64) -> Result<(), StakeActionError> {
    if !sol.is_finite() || sol <= 0.0 {
        return Err(StakeActionError::InvalidAmount(sol.to_string()));
    }
    Ok(())
}

/// Convert SOL to lamports, rounding half away from zero.
///
/// Amounts that round to zero lamports or overflow `u64` are rejected.
pub fn sol_to_lamports(sol: f64) -> Result<u64, StakeActionError> {
    validate_sol_amount(sol)?;
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    if lamports < 1.0 || lamports >= u64::MAX as f64 {
        return Err(StakeActionError::InvalidAmount(sol.to_string()));
    }
    Ok(lamports as u64)
}

/// A request to stake `sol_amount` from `staker`.
#[derive(Debug, Clone, PartialEq)]
pub struct StakeRequest {
    /// Staker wallet address (base58); also fee payer and stake authority
    pub staker: String,
    /// Amount to delegate, in SOL
    pub sol_amount: f64,
}

impl StakeRequest {
    pub fn new(staker: impl Into<String>, sol_amount: f64) -> Self {
        Self {
            staker: staker.into(),
            sol_amount,
        }
    }

    /// Validate the request without touching the network.
    ///
    /// The amount is checked before the address.
    pub fn validate(&self) -> Result<(Pubkey, u64), StakeActionError> {
        let lamports = sol_to_lamports(self.sol_amount)?;
        let staker = Pubkey::from_base58(&self.staker)?;
        Ok((staker, lamports))
    }
}

/// How the new stake account address is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakeAccountStrategy {
    /// Address derived from the staker, a random seed and the stake program.
    /// Only the staker signs.
    Seeded { prefix: String },
    /// Fresh keypair that co-signs the transaction and is then dropped.
    Ephemeral,
}

impl StakeAccountStrategy {
    pub fn seeded(prefix: impl Into<String>) -> Result<Self, StakeActionError> {
        let prefix = prefix.into();
        if prefix.is_empty() || prefix.len() > MAX_SEED_PREFIX_LEN {
            return Err(StakeActionError::InvalidConfig(format!(
                "seed prefix must be 1-{} bytes, got {}",
                MAX_SEED_PREFIX_LEN,
                prefix.len()
            )));
        }
        Ok(Self::Seeded { prefix })
    }
}

impl Default for StakeAccountStrategy {
    fn default() -> Self {
        Self::Seeded {
            prefix: DEFAULT_SEED_PREFIX.to_string(),
        }
    }
}

/// Which stake account derivation a built transaction used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakeAccountKind {
    Seeded { seed: String },
    Ephemeral,
}

/// Result of building a stake transaction.
#[derive(Debug, Clone)]
pub struct BuiltStakeTransaction {
    /// Transaction awaiting the staker signature
    pub transaction: Transaction,
    /// Address of the stake account being created
    pub stake_account: Pubkey,
    pub stake_account_kind: StakeAccountKind,
    /// Requested delegation, in lamports
    pub lamports: u64,
    /// Rent-exempt reserve added on top of `lamports`
    pub rent_exempt_reserve: u64,
}

impl BuiltStakeTransaction {
    /// Lamports moved into the new stake account.
    pub fn funded_lamports(&self) -> u64 {
        self.lamports + self.rent_exempt_reserve
    }

    pub fn to_base64(&self) -> Result<String, StakeActionError> {
        self.transaction.to_base64()
    }
}
