//! Solana public key (address) parsing.
//!
//! Wallets send the staker address as a base58 string; this module turns it
//! into a `Pubkey` or an `InvalidAddress` error.

use crate::error::StakeActionError;
use std::str::FromStr;

/// Re-export the underlying Solana Pubkey type.
pub use solana_sdk::pubkey::Pubkey;

/// Extension trait for Pubkey to add request-friendly error handling.
pub trait PubkeyExt {
    fn from_base58(address: &str) -> Result<Pubkey, StakeActionError>;
}

impl PubkeyExt for Pubkey {
    /// Create a Pubkey from a base58 string.
    fn from_base58(address: &str) -> Result<Pubkey, StakeActionError> {
        Pubkey::from_str(address.trim())
            .map_err(|e| StakeActionError::InvalidAddress(format!("{}: {}", address, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base58() {
        let address = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
        let pubkey = Pubkey::from_base58(address).unwrap();
        assert_eq!(pubkey.to_string(), address);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let pubkey = Pubkey::from_base58(" FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH\n").unwrap();
        assert_eq!(
            pubkey.to_string(),
            "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH"
        );
    }

    #[test]
    fn test_invalid_base58() {
        let err = Pubkey::from_base58("invalid!@#$").unwrap_err();
        assert!(matches!(err, StakeActionError::InvalidAddress(_)));
    }

    #[test]
    fn test_wrong_length_base58() {
        // Valid base58 alphabet, but decodes to fewer than 32 bytes
        assert!(Pubkey::from_base58("3yZe7d").is_err());
    }

    #[test]
    fn test_system_program_address() {
        let pubkey = Pubkey::from_base58("11111111111111111111111111111111").unwrap();
        assert_eq!(pubkey, Pubkey::from([0u8; 32]));
    }
}
