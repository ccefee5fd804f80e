//! Solana transaction wire encoding and partial signing.
//!
//! Wraps `solana_transaction::Transaction`.
//!
//! # Wire Format
//!
//! Legacy Solana transactions are bincode encoded:
//! - Signatures (compact-u16 length, 64 bytes each)
//! - Message (header, account keys, blockhash, instructions)
//!
//! Action responses carry that byte string base64 encoded. Encoding never
//! verifies signatures, so a transaction with empty signer slots survives the
//! trip to the wallet unchanged.

use crate::error::StakeActionError;
use base64::prelude::*;
use solana_address::Address;
use solana_signature::Signature;
use std::str::FromStr;

/// Re-export the underlying Solana Transaction type.
pub use solana_transaction::Transaction;

/// Extension trait for Transaction.
pub trait TransactionExt {
    /// Deserialize a transaction from raw bytes (wire format).
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, StakeActionError>;

    /// Deserialize a transaction from a base64 string.
    fn from_base64(encoded: &str) -> Result<Transaction, StakeActionError>;

    /// Get the fee payer address as base58 string.
    fn fee_payer_string(&self) -> Option<String>;

    /// Get the recent blockhash as base58 string.
    fn blockhash_string(&self) -> String;

    fn num_instructions(&self) -> usize;

    fn num_signatures(&self) -> usize;

    /// Number of signer slots still holding the default (all-zero) signature.
    fn num_missing_signatures(&self) -> usize;

    /// Serialize transaction to bytes (wire format).
    fn to_bytes(&self) -> Result<Vec<u8>, StakeActionError>;

    /// Serialize transaction to base64.
    fn to_base64(&self) -> Result<String, StakeActionError>;

    /// Place a signature for a given public key.
    ///
    /// The pubkey must be one of the required signers in the transaction.
    /// The signature bytes must be exactly 64 bytes (Ed25519 signature).
    fn add_signature(&mut self, pubkey: &str, signature: &[u8]) -> Result<(), StakeActionError>;

    /// Get the index of a pubkey in the account keys, if it's a signer.
    fn signer_index(&self, pubkey: &str) -> Option<usize>;
}

impl TransactionExt for Transaction {
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, StakeActionError> {
        bincode::deserialize(bytes).map_err(|e| {
            StakeActionError::Transaction(format!("Failed to deserialize transaction: {}", e))
        })
    }

    fn from_base64(encoded: &str) -> Result<Transaction, StakeActionError> {
        let bytes = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| StakeActionError::Transaction(format!("Invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    fn fee_payer_string(&self) -> Option<String> {
        self.message.account_keys.first().map(|p| p.to_string())
    }

    fn blockhash_string(&self) -> String {
        self.message.recent_blockhash.to_string()
    }

    fn num_instructions(&self) -> usize {
        self.message.instructions.len()
    }

    fn num_signatures(&self) -> usize {
        self.signatures.len()
    }

    fn num_missing_signatures(&self) -> usize {
        let empty = Signature::default();
        self.signatures.iter().filter(|s| **s == empty).count()
    }

    fn to_bytes(&self) -> Result<Vec<u8>, StakeActionError> {
        bincode::serialize(self).map_err(|e| {
            StakeActionError::Transaction(format!("Failed to serialize transaction: {}", e))
        })
    }

    fn to_base64(&self) -> Result<String, StakeActionError> {
        Ok(BASE64_STANDARD.encode(self.to_bytes()?))
    }

    fn signer_index(&self, pubkey: &str) -> Option<usize> {
        let target_address = Address::from_str(pubkey).ok()?;
        let num_signers = self.message.header.num_required_signatures as usize;

        let signed_keys = self.message.account_keys.get(0..num_signers)?;
        signed_keys.iter().position(|x| *x == target_address)
    }

    fn add_signature(
        &mut self,
        pubkey: &str,
        signature_bytes: &[u8],
    ) -> Result<(), StakeActionError> {
        let bytes: [u8; 64] = signature_bytes.try_into().map_err(|_| {
            StakeActionError::Transaction(format!(
                "Invalid signature length: expected 64 bytes, got {}",
                signature_bytes.len()
            ))
        })?;

        let signer_idx = self
            .signer_index(pubkey)
            .ok_or_else(|| StakeActionError::Transaction(format!("unknown signer: {}", pubkey)))?;

        let num_signers = self.message.header.num_required_signatures as usize;
        if self.signatures.len() < num_signers {
            self.signatures.resize(num_signers, Signature::default());
        }

        self.signatures[signer_idx] = Signature::from(bytes);

        Ok(())
    }
}
