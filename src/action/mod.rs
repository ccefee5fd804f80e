//! Solana Actions payloads.
//!
//! Wallets and Blink clients discover the action through `actions.json`,
//! render the descriptor returned on GET, and POST the chosen amount back.

mod descriptor;
mod types;

pub use descriptor::{actions_manifest, stake_descriptor, stake_message};
pub use types::*;

/// Route serving the stake descriptor (GET) and transactions (POST).
pub const STAKE_ACTION_PATH: &str = "/stake-action";
/// Discovery manifest route.
pub const ACTIONS_MANIFEST_PATH: &str = "/actions.json";
/// Website path that wallets unfurl into the stake action.
pub const STAKE_PAGE_PATTERN: &str = "/stake";
