multiversx_sc::imports!();

use oracle_common::records::ContentHash;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("roundStarted")]
    fn round_started_event(
        &self,
        #[indexed] voting_round: u64,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        request_id: &ContentHash<Self::Api>,
    );

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] primary_account: &ManagedAddress,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        #[indexed] vote_hash: &ContentHash<Self::Api>,
        vote_count: u64,
    );

    #[event("requestCompleted")]
    fn request_completed_event(
        &self,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        #[indexed] vote_hash: &ContentHash<Self::Api>,
        vote_count: u64,
    );

    #[event("requestExpired")]
    fn request_expired_event(
        &self,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        voting_round: u64,
    );

    #[event("voterRegistered")]
    fn voter_registered_event(
        &self,
        #[indexed] primary_account: &ManagedAddress,
        participation_key: &ManagedAddress,
    );

    #[event("voterDeregistered")]
    fn voter_deregistered_event(
        &self,
        #[indexed] primary_account: &ManagedAddress,
        refund: &BigUint,
    );

    #[event("proposalDeleted")]
    fn proposal_deleted_event(
        &self,
        #[indexed] vote_hash: &ContentHash<Self::Api>,
        vote_round: u64,
    );

    #[event("previousVoteCleared")]
    fn previous_vote_cleared_event(
        &self,
        #[indexed] primary_account: &ManagedAddress,
        key_hash: &ContentHash<Self::Api>,
    );
}
