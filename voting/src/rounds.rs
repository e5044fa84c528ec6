multiversx_sc::imports!();

use oracle_common::errors::*;
use oracle_common::records::{
    ContentHash, Destination, ProposalsEntry, RequestInfo, RequestStatus,
};

/// One request is voted on at a time. A round opens when a vote arrives
/// for a request nobody is working on, and closes on quorum or expiry.
#[multiversx_sc::module]
pub trait RoundsModule:
    crate::storage::StorageModule + crate::events::EventsModule + crate::ledger::LedgerModule
{
    // ========================================================
    // ENDPOINT: expireCurrentRequest
    // Closes a round that ran out of time without quorum and
    // lets the requester reclaim the full fee.
    // ========================================================

    #[endpoint(expireCurrentRequest)]
    fn expire_current_request(&self) {
        let current = self.current_request();
        require!(!current.is_empty(), ERR_NO_CURRENT_REQUEST);
        let request = current.get();

        let now = self.blockchain().get_block_round();
        let time_lock = self.main_settings().time_lock;
        require!(request.timed_out(now, time_lock), ERR_REQUEST_NOT_TIMED_OUT);

        self.update_main_request_status(
            &request.key_hash,
            RequestStatus::RefundAvailable,
            &request.requester,
            &ProposalsEntry::empty(),
        );
        current.clear();

        self.request_expired_event(&request.key_hash, self.voting_round().get());
    }

    // ========================================================
    // ENDPOINT: deleteProposal
    // Reaps a proposal left over from an earlier round.
    // ========================================================

    #[endpoint(deleteProposal)]
    fn delete_proposal(&self, vote_hash: ContentHash<Self::Api>) {
        let proposal = self.proposals(&vote_hash);
        require!(!proposal.is_empty(), ERR_PROPOSAL_NOT_FOUND);

        let vote_round = proposal.get().vote_round;
        require!(
            vote_round < self.voting_round().get(),
            ERR_VOTE_ROUND_ACTIVE
        );
        proposal.clear();

        self.proposal_deleted_event(&vote_hash, vote_round);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    /// Returns the request being voted on, opening a new round when the
    /// vote targets a request other than an expired current one.
    fn join_round(
        &self,
        request_id: &ContentHash<Self::Api>,
        key_hash: &ContentHash<Self::Api>,
        requester: &ManagedAddress,
        time_lock: u64,
    ) -> RequestInfo<Self::Api> {
        let current = self.current_request();
        if !current.is_empty() {
            let request = current.get();
            if request.request_id == *request_id {
                require!(request.key_hash == *key_hash, ERR_REQUEST_MISMATCH);
                return request;
            }
            let now = self.blockchain().get_block_round();
            require!(
                request.timed_out(now, time_lock),
                ERR_OTHER_REQUEST_IN_PROGRESS
            );
        }

        self.start_round(request_id, key_hash, requester)
    }

    fn start_round(
        &self,
        request_id: &ContentHash<Self::Api>,
        key_hash: &ContentHash<Self::Api>,
        requester: &ManagedAddress,
    ) -> RequestInfo<Self::Api> {
        let request = self.update_main_request_status(
            key_hash,
            RequestStatus::Processing,
            requester,
            &ProposalsEntry::empty(),
        );
        require!(request.request_id == *request_id, ERR_REQUEST_MISMATCH);

        let voting_round = self.voting_round().get() + 1;
        self.voting_round().set(voting_round);

        let seed = self.blockchain().get_block_random_seed();
        self.round_seed().set(seed.as_managed_buffer());
        self.current_request().set(&request);

        self.round_started_event(voting_round, key_hash, request_id);
        request
    }

    /// Deletes the proposal a voter backed in an earlier round.
    fn retire_proposal(&self, previous: &ProposalsEntry<Self::Api>, voting_round: u64) {
        if previous.is_empty() {
            return;
        }
        let proposal = self.proposals(&previous.vote_hash);
        if !proposal.is_empty() && proposal.get().vote_round < voting_round {
            proposal.clear();
            self.proposal_deleted_event(&previous.vote_hash, previous.vote_round);
        }
    }

    /// Delivers the winning response exactly once and closes the round.
    fn complete_request(
        &self,
        request: &RequestInfo<Self::Api>,
        destination: &Destination<Self::Api>,
        response_type: u64,
        response_body: &ManagedBuffer,
        winner: &ProposalsEntry<Self::Api>,
    ) {
        self.tx()
            .to(&destination.contract)
            .raw_call(destination.method.clone())
            .argument(&response_type)
            .argument(response_body)
            .sync_call();

        self.update_main_request_status(
            &request.key_hash,
            RequestStatus::Completed,
            &request.requester,
            winner,
        );
        self.current_request().clear();

        self.request_completed_event(&request.key_hash, &winner.vote_hash, winner.vote_count);
    }
}
