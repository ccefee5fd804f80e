//! Stake transaction building implementation.
//!
//! Uses the Solana SDK instruction builders; this module only decides the
//! stake account address, the funding amount and the instruction order.

use crate::error::StakeActionError;
use crate::keypair::{EntropySource, Keypair, KeypairExt, OsEntropy};
use crate::pubkey::Pubkey;
use crate::rpc::ChainRpc;
use crate::transaction::TransactionExt;

use super::types::*;

use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::transaction::Transaction;
use solana_stake_interface::instruction as stake_ix;
use solana_stake_interface::state::{Authorized, Lockup};
use solana_system_interface::instruction as system_ix;

/// Size of `StakeStateV2` in bytes.
pub const STAKE_ACCOUNT_SPACE: u64 = 200;

/// Stake account chosen for one transaction.
enum NewStakeAccount {
    Seeded { address: Pubkey, seed: String },
    Ephemeral { address: Pubkey, keypair: Keypair },
}

impl NewStakeAccount {
    fn address(&self) -> Pubkey {
        match self {
            Self::Seeded { address, .. } | Self::Ephemeral { address, .. } => *address,
        }
    }
}

/// Builds native stake transactions: create account, initialize, delegate.
pub struct StakeTransactionBuilder<R, E = OsEntropy> {
    rpc: R,
    entropy: E,
    strategy: StakeAccountStrategy,
}

impl<R: ChainRpc> StakeTransactionBuilder<R> {
    pub fn new(rpc: R, strategy: StakeAccountStrategy) -> Self {
        Self::with_entropy(rpc, strategy, OsEntropy)
    }
}

impl<R: ChainRpc, E: EntropySource> StakeTransactionBuilder<R, E> {
    pub fn with_entropy(rpc: R, strategy: StakeAccountStrategy, entropy: E) -> Self {
        Self {
            rpc,
            entropy,
            strategy,
        }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Build a transaction that stakes `sol_amount` SOL from `staker_address`
    /// and delegates it to `vote_account`.
    ///
    /// Input is validated before any RPC call. The staker signature slot is
    /// left empty for the wallet to fill.
    pub async fn build(
        &self,
        staker_address: &str,
        sol_amount: f64,
        vote_account: &Pubkey,
    ) -> Result<BuiltStakeTransaction, StakeActionError> {
        self.build_request(&StakeRequest::new(staker_address, sol_amount), vote_account)
            .await
    }

    pub async fn build_request(
        &self,
        request: &StakeRequest,
        vote_account: &Pubkey,
    ) -> Result<BuiltStakeTransaction, StakeActionError> {
        let (staker, lamports) = request.validate()?;

        let rent_exempt_reserve = self
            .rpc
            .minimum_balance_for_rent_exemption(STAKE_ACCOUNT_SPACE as usize)
            .await?;
        let funded = lamports.checked_add(rent_exempt_reserve).ok_or_else(|| {
            StakeActionError::InvalidAmount(format!(
                "{} lamports plus rent reserve overflows",
                lamports
            ))
        })?;

        let stake_account = self.new_stake_account(&staker)?;
        let stake_address = stake_account.address();
        let instructions = stake_instructions(&staker, &stake_account, funded, vote_account);

        // Fetched last: the blockhash is only valid for a short window
        let blockhash = self.rpc.latest_blockhash().await?;

        let message = Message::new_with_blockhash(&instructions, Some(&staker), &blockhash);
        let mut transaction = Transaction::new_unsigned(message);

        let stake_account_kind = match stake_account {
            NewStakeAccount::Seeded { seed, .. } => StakeAccountKind::Seeded { seed },
            NewStakeAccount::Ephemeral { keypair, .. } => {
                let signature = keypair.sign_bytes(&transaction.message.serialize());
                transaction.add_signature(&keypair.address(), &signature)?;
                StakeAccountKind::Ephemeral
            }
        };

        tracing::debug!(
            staker = %staker,
            stake_account = %stake_address,
            vote_account = %vote_account,
            lamports,
            rent_exempt_reserve,
            "assembled stake transaction"
        );

        Ok(BuiltStakeTransaction {
            transaction,
            stake_account: stake_address,
            stake_account_kind,
            lamports,
            rent_exempt_reserve,
        })
    }

    fn new_stake_account(&self, staker: &Pubkey) -> Result<NewStakeAccount, StakeActionError> {
        match &self.strategy {
            StakeAccountStrategy::Seeded { prefix } => {
                let mut token = [0u8; SEED_TOKEN_BYTES];
                self.entropy.fill_bytes(&mut token);
                let seed = format!("{}-{}", prefix, hex::encode(token));
                let address =
                    Pubkey::create_with_seed(staker, &seed, &solana_stake_interface::program::ID)
                        .map_err(|e| {
                            StakeActionError::Transaction(format!(
                                "Failed to derive stake address from seed {}: {}",
                                seed, e
                            ))
                        })?;
                Ok(NewStakeAccount::Seeded { address, seed })
            }
            StakeAccountStrategy::Ephemeral => {
                let keypair = Keypair::from_entropy(&self.entropy);
                let address: Pubkey = keypair.address().parse().map_err(|_| {
                    StakeActionError::Transaction("Failed to generate stake address".to_string())
                })?;
                Ok(NewStakeAccount::Ephemeral { address, keypair })
            }
        }
    }
}

/// Create → initialize → delegate. The account must exist and be owned by
/// the stake program before the later instructions reference it.
fn stake_instructions(
    staker: &Pubkey,
    stake_account: &NewStakeAccount,
    lamports: u64,
    vote_account: &Pubkey,
) -> Vec<Instruction> {
    let stake_pubkey = stake_account.address();
    let create = match stake_account {
        NewStakeAccount::Seeded { seed, .. } => system_ix::create_account_with_seed(
            staker,
            &stake_pubkey,
            staker,
            seed,
            lamports,
            STAKE_ACCOUNT_SPACE,
            &solana_stake_interface::program::ID,
        ),
        NewStakeAccount::Ephemeral { .. } => system_ix::create_account(
            staker,
            &stake_pubkey,
            lamports,
            STAKE_ACCOUNT_SPACE,
            &solana_stake_interface::program::ID,
        ),
    };

    vec![
        create,
        stake_ix::initialize(
            &stake_pubkey,
            &Authorized {
                staker: *staker,
                withdrawer: *staker,
            },
            &Lockup::default(),
        ),
        stake_ix::delegate_stake(&stake_pubkey, staker, vote_account),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::test_utils::FixedEntropy;
    use crate::rpc::test_utils::{MockRpc, TEST_BLOCKHASH, TEST_RENT_RESERVE};
    use crate::transaction::Transaction as WireTransaction;
    use solana_stake_interface::instruction::StakeInstruction;
    use solana_system_interface::instruction::SystemInstruction;

    const STAKER: &str = "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB";
    const VOTE: &str = "BeSov1og3sEYyH9JY3ap7QcQDvVX8f4sugfNPf9YLkcV";

    fn vote() -> Pubkey {
        VOTE.parse().unwrap()
    }

    fn seeded_builder(rpc: MockRpc) -> StakeTransactionBuilder<MockRpc, FixedEntropy> {
        StakeTransactionBuilder::with_entropy(
            rpc,
            StakeAccountStrategy::seeded("yonta").unwrap(),
            FixedEntropy(0xab),
        )
    }

    fn ephemeral_builder(rpc: MockRpc) -> StakeTransactionBuilder<MockRpc, FixedEntropy> {
        StakeTransactionBuilder::with_entropy(rpc, StakeAccountStrategy::Ephemeral, FixedEntropy(3))
    }

    fn program_of(tx: &WireTransaction, ix: usize) -> Pubkey {
        let idx = tx.message.instructions[ix].program_id_index as usize;
        tx.message.account_keys[idx]
    }

    fn create_lamports(tx: &WireTransaction) -> u64 {
        match bincode::deserialize::<SystemInstruction>(&tx.message.instructions[0].data).unwrap() {
            SystemInstruction::CreateAccountWithSeed { lamports, .. } => lamports,
            SystemInstruction::CreateAccount { lamports, .. } => lamports,
            other => panic!("unexpected first instruction: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_build_seeded_stake() {
        let builder = seeded_builder(MockRpc::default());
        let built = builder.build(STAKER, 1.0, &vote()).await.unwrap();
        let tx = &built.transaction;

        assert_eq!(tx.fee_payer_string().as_deref(), Some(STAKER));
        assert_eq!(tx.blockhash_string(), TEST_BLOCKHASH);
        assert_eq!(tx.num_instructions(), 3);
        assert_eq!(tx.message.header.num_required_signatures, 1);
        assert_eq!(tx.num_missing_signatures(), 1);

        assert_eq!(program_of(tx, 0), solana_system_interface::program::ID);
        assert_eq!(program_of(tx, 1), solana_stake_interface::program::ID);
        assert_eq!(program_of(tx, 2), solana_stake_interface::program::ID);

        let seed = format!("yonta-{}", "ab".repeat(8));
        assert_eq!(
            built.stake_account_kind,
            StakeAccountKind::Seeded { seed: seed.clone() }
        );
        let staker: Pubkey = STAKER.parse().unwrap();
        let expected =
            Pubkey::create_with_seed(&staker, &seed, &solana_stake_interface::program::ID)
                .unwrap();
        assert_eq!(built.stake_account, expected);

        match bincode::deserialize::<SystemInstruction>(&tx.message.instructions[0].data).unwrap() {
            SystemInstruction::CreateAccountWithSeed {
                base,
                seed: ix_seed,
                lamports,
                space,
                owner,
            } => {
                assert_eq!(base, staker);
                assert_eq!(ix_seed, seed);
                assert_eq!(lamports, 1_000_000_000 + TEST_RENT_RESERVE);
                assert_eq!(space, STAKE_ACCOUNT_SPACE);
                assert_eq!(owner, solana_stake_interface::program::ID);
            }
            other => panic!("expected CreateAccountWithSeed, got {:?}", other),
        }

        assert!(matches!(
            bincode::deserialize::<StakeInstruction>(&tx.message.instructions[1].data).unwrap(),
            StakeInstruction::Initialize(..)
        ));
        assert!(matches!(
            bincode::deserialize::<StakeInstruction>(&tx.message.instructions[2].data).unwrap(),
            StakeInstruction::DelegateStake
        ));
        assert!(tx.message.account_keys.contains(&vote()));

        // One rent query, one blockhash query
        assert_eq!(builder.rpc().calls(), 2);
    }

    #[actix_web::test]
    async fn test_build_ephemeral_stake_is_cosigned() {
        let builder = ephemeral_builder(MockRpc::default());
        let built = builder.build(STAKER, 5.0, &vote()).await.unwrap();
        let tx = &built.transaction;

        assert_eq!(built.stake_account_kind, StakeAccountKind::Ephemeral);
        assert_eq!(tx.fee_payer_string().as_deref(), Some(STAKER));
        assert_eq!(tx.message.header.num_required_signatures, 2);
        // Staker slot is empty, stake account slot is signed
        assert_eq!(tx.num_missing_signatures(), 1);
        assert_eq!(tx.signatures[0], Default::default());
        let stake_idx = tx.signer_index(&built.stake_account.to_string()).unwrap();
        assert_eq!(stake_idx, 1);
        assert_ne!(tx.signatures[stake_idx], Default::default());

        let expected = Keypair::from_entropy(&FixedEntropy(3)).address();
        assert_eq!(built.stake_account.to_string(), expected);
        assert_eq!(create_lamports(tx), 5_000_000_000 + TEST_RENT_RESERVE);
    }

    #[actix_web::test]
    async fn test_invalid_amount_makes_no_rpc_calls() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let builder = seeded_builder(MockRpc::default());
            let err = builder.build(STAKER, amount, &vote()).await.unwrap_err();
            assert!(matches!(err, StakeActionError::InvalidAmount(_)));
            assert_eq!(builder.rpc().calls(), 0);
        }
    }

    #[actix_web::test]
    async fn test_invalid_address_makes_no_rpc_calls() {
        let builder = seeded_builder(MockRpc::default());
        let err = builder.build("0OIl", 1.0, &vote()).await.unwrap_err();
        assert!(matches!(err, StakeActionError::InvalidAddress(_)));
        assert_eq!(builder.rpc().calls(), 0);
    }

    #[actix_web::test]
    async fn test_blockhash_failure_propagates() {
        let builder = seeded_builder(MockRpc::failing_blockhash());
        let err = builder.build(STAKER, 1.0, &vote()).await.unwrap_err();
        assert!(matches!(err, StakeActionError::NetworkUnavailable(_)));
        assert!(!err.is_client_error());
    }

    #[actix_web::test]
    async fn test_rent_failure_propagates() {
        let builder = seeded_builder(MockRpc {
            fail_rent: true,
            ..Default::default()
        });
        let err = builder.build(STAKER, 1.0, &vote()).await.unwrap_err();
        assert!(matches!(err, StakeActionError::Rpc(_)));
        // Blockhash is never requested once the rent query fails
        assert_eq!(builder.rpc().calls(), 1);
    }

    #[actix_web::test]
    async fn test_funding_never_below_requested() {
        let builder = seeded_builder(MockRpc::default());
        for sol in [0.01, 0.5, 1.0, 2.75, 1234.567891234] {
            let built = builder.build(STAKER, sol, &vote()).await.unwrap();
            let requested = (sol * 1_000_000_000f64).round() as u64;
            let funded = create_lamports(&built.transaction);
            assert_eq!(funded, built.funded_lamports());
            assert!(funded >= requested);
            assert_eq!(built.lamports, requested);
        }
    }

    #[actix_web::test]
    async fn test_fixed_entropy_gives_identical_bytes() {
        let a = seeded_builder(MockRpc::default())
            .build(STAKER, 1.0, &vote())
            .await
            .unwrap();
        let b = seeded_builder(MockRpc::default())
            .build(STAKER, 1.0, &vote())
            .await
            .unwrap();
        assert_eq!(a.to_base64().unwrap(), b.to_base64().unwrap());

        let c = StakeTransactionBuilder::with_entropy(
            MockRpc::default(),
            StakeAccountStrategy::seeded("yonta").unwrap(),
            FixedEntropy(0xcd),
        )
        .build(STAKER, 1.0, &vote())
        .await
        .unwrap();
        assert_ne!(a.stake_account, c.stake_account);
    }

    #[actix_web::test]
    async fn test_base64_roundtrip_preserves_shape() {
        for builder in [
            seeded_builder(MockRpc::default()),
            ephemeral_builder(MockRpc::default()),
        ] {
            let built = builder.build(STAKER, 1.0, &vote()).await.unwrap();
            let decoded = WireTransaction::from_base64(&built.to_base64().unwrap()).unwrap();
            assert_eq!(decoded.num_instructions(), 3);
            assert_eq!(decoded.fee_payer_string().as_deref(), Some(STAKER));
            assert_eq!(decoded, built.transaction);
        }
    }
}
