multiversx_sc::imports!();

use oracle_common::records::{ContentHash, RequestSlot};
use oracle_common::settings::ProtocolSettings;
use oracle_common::stake_history::StakeSnapshot;

#[multiversx_sc::module]
pub trait StorageModule {
    // ── Configuration ──

    #[storage_mapper("protocolSettings")]
    fn protocol_settings(&self) -> SingleValueMapper<ProtocolSettings<Self::Api>>;

    #[storage_mapper("stakeToken")]
    fn stake_token(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("minimumStake")]
    fn minimum_stake(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("vrfVerifier")]
    fn vrf_verifier(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Protocol balances ──

    #[storage_mapper("nativeFeeSink")]
    fn native_fee_sink(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("tokenFeeSink")]
    fn token_fee_sink(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("committeeRefillPool")]
    fn committee_refill_pool(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("totalStake")]
    fn total_stake(&self) -> SingleValueMapper<StakeSnapshot>;

    // ── Accounts ──

    #[storage_mapper("nativeBalance")]
    fn native_balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("tokenBalance")]
    fn token_balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("lockedTokens")]
    fn locked_tokens(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("accountStake")]
    fn account_stake(&self, account: &ManagedAddress) -> SingleValueMapper<StakeSnapshot>;

    #[storage_mapper("stakeUpdateRound")]
    fn stake_update_round(&self, account: &ManagedAddress) -> SingleValueMapper<u64>;

    #[storage_mapper("participationKey")]
    fn participation_key(&self, account: &ManagedAddress) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("participationKeyRound")]
    fn participation_key_round(&self, account: &ManagedAddress) -> SingleValueMapper<u64>;

    #[storage_mapper("latestRequest")]
    fn latest_request(&self, account: &ManagedAddress) -> SingleValueMapper<ContentHash<Self::Api>>;

    // ── Requests ──

    #[storage_mapper("requestSlot")]
    fn request_slot(
        &self,
        key_hash: &ContentHash<Self::Api>,
    ) -> SingleValueMapper<RequestSlot<Self::Api>>;

    // ── Voting contracts deployed by this ledger ──

    #[storage_mapper("votingContracts")]
    fn voting_contracts(&self) -> UnorderedSetMapper<ManagedAddress>;
}
