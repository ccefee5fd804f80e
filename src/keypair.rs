//! Ephemeral Ed25519 keypairs and the entropy they are drawn from.
//!
//! Wraps `solana_keypair::Keypair`. Randomness comes through [`EntropySource`]
//! so tests can pin the generated stake account and seed.

use rand::rngs::OsRng;
use rand::RngCore;
use solana_signer::Signer;

/// Re-export the underlying Solana Keypair type.
pub use solana_keypair::Keypair;

/// Source of random bytes for stake account keys and seeds.
pub trait EntropySource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Extension trait for Keypair.
pub trait KeypairExt {
    fn from_entropy<E: EntropySource + ?Sized>(entropy: &E) -> Keypair;
    fn address(&self) -> String;
    fn sign_bytes(&self, message: &[u8]) -> [u8; 64];
}

impl KeypairExt for Keypair {
    /// Draw a fresh keypair from the entropy source.
    fn from_entropy<E: EntropySource + ?Sized>(entropy: &E) -> Keypair {
        let mut secret = [0u8; 32];
        entropy.fill_bytes(&mut secret);
        let keypair = Keypair::new_from_array(secret);
        secret.fill(0);
        keypair
    }

    /// Get the Solana address (base58-encoded public key).
    fn address(&self) -> String {
        self.pubkey().to_string()
    }

    /// Ed25519 signature over `message`.
    fn sign_bytes(&self, message: &[u8]) -> [u8; 64] {
        let signature = self.sign_message(message);
        let mut out = [0u8; 64];
        out.copy_from_slice(signature.as_ref());
        out
    }
}
