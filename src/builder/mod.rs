//! Stake transaction building.
//!
//! This module provides [`StakeTransactionBuilder`], which turns a staker
//! address and a SOL amount into a ready-to-sign native stake transaction:
//! create the stake account, initialize it and delegate it to a vote account.

mod build;
mod types;

pub use build::{StakeTransactionBuilder, STAKE_ACCOUNT_SPACE};
pub use types::{
    parse_sol_amount, sol_to_lamports, BuiltStakeTransaction, StakeAccountKind,
    StakeAccountStrategy, StakeRequest, DEFAULT_SEED_PREFIX, LAMPORTS_PER_SOL,
    MAX_SEED_PREFIX_LEN,
};
