multiversx_sc::imports!();

use oracle_common::records::{ContentHash, ProposalsEntry, RequestInfo, VoterRecord};

#[multiversx_sc::module]
pub trait StorageModule {
    // ── Configuration ──

    #[storage_mapper("mainAddress")]
    fn main_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("vrfVerifier")]
    fn vrf_verifier(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Round state ──

    /// Incremented each time a new request is taken up.
    #[storage_mapper("votingRound")]
    fn voting_round(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("currentRequest")]
    fn current_request(&self) -> SingleValueMapper<RequestInfo<Self::Api>>;

    #[storage_mapper("roundSeed")]
    fn round_seed(&self) -> SingleValueMapper<ManagedBuffer>;

    // ── Committee ──

    #[storage_mapper("voterRecord")]
    fn voter_records(&self, primary_account: &ManagedAddress) -> SingleValueMapper<VoterRecord<Self::Api>>;

    #[storage_mapper("proposal")]
    fn proposals(&self, vote_hash: &ContentHash<Self::Api>) -> SingleValueMapper<ProposalsEntry<Self::Api>>;

    /// Rent paid at registration, returned as-is on deregistration.
    #[storage_mapper("voterDeposit")]
    fn voter_deposits(&self, primary_account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("rentRefund")]
    fn rent_refunds(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;
}
