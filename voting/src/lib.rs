#![no_std]

multiversx_sc::imports!();

pub mod events;
pub mod ledger;
pub mod main_proxy;
pub mod registration;
pub mod rounds;
pub mod storage;
pub mod vrf_verifier_proxy;

use oracle_common::committee::{draw_from_vrf, expected_vote_count, quorum_reached, CommitteeError};
use oracle_common::errors::*;
use oracle_common::records::{
    ContentHash, Destination, ProposalsEntry, RequestInfo, ResponseBody, VoterRecord,
};

// ============================================================
// Contract
// ============================================================

/// Stake-weighted voting authority. Deployed and trusted by the main
/// ledger; tallies committee votes for one request at a time.
#[multiversx_sc::contract]
pub trait OracleVoting:
    storage::StorageModule
    + events::EventsModule
    + ledger::LedgerModule
    + rounds::RoundsModule
    + registration::RegistrationModule
{
    #[init]
    fn init(&self, main_address: ManagedAddress, vrf_verifier: ManagedAddress) {
        self.main_address().set(&main_address);
        self.vrf_verifier().set(&vrf_verifier);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: vote
    // Called by a participation key. The claimed vote count is
    // checked against the z-table and the VRF co-verifier before
    // anything is tallied.
    // ========================================================

    #[endpoint(vote)]
    fn vote(
        &self,
        vrf_result: ManagedBuffer,
        vrf_proof: ManagedBuffer,
        primary_account: ManagedAddress,
        destination: Destination<Self::Api>,
        request_key_hash: ContentHash<Self::Api>,
        requester: ManagedAddress,
        response_type: u64,
        response_body: ManagedBuffer,
        vote_count: u64,
        z_index: u64,
    ) {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_round();
        let settings = self.main_settings();

        let response = ResponseBody::<Self::Api>::top_decode(response_body.clone())
            .unwrap_or_else(|_| sc_panic!(ERR_MALFORMED_RESPONSE));
        require!(response.requester == requester, ERR_REQUEST_MISMATCH);

        // ── Round ──
        let request = self.join_round(
            &response.request_id,
            &request_key_hash,
            &requester,
            settings.time_lock,
        );
        require!(now > request.request_round, ERR_REQUEST_ROUND_NOT_STARTED);
        require!(
            now <= request.request_round + settings.time_lock,
            ERR_REQUEST_EXPIRED
        );
        require!(request.total_stake_snapshot > 0, ERR_ZERO_TOTAL_STAKE);

        // ── Identity ──
        let voter = self.voter_context(&primary_account, request.request_round);
        require!(voter.participation_key == caller, ERR_NOT_PARTICIPATION_KEY);
        require!(
            now >= voter.key_registered_round + settings.time_lock,
            ERR_KEY_TIME_LOCK
        );
        require!(voter.stake > 0, ERR_ZERO_STAKE);

        let previous = self.registered_voter(&primary_account);
        let voting_round = self.voting_round().get();
        require!(
            previous.proposal.vote_round < voting_round,
            ERR_ALREADY_VOTED
        );

        // ── Committee weight ──
        let draw = self.vrf_draw(&vrf_result);
        match expected_vote_count(voter.stake, draw, z_index as usize, &settings.committee) {
            Ok(expected) => require!(expected == vote_count, ERR_VOTE_COUNT_MISMATCH),
            Err(CommitteeError::NoSeat) => sc_panic!(ERR_NO_COMMITTEE_SEAT),
            Err(_) => sc_panic!(ERR_VOTE_COUNT_MISMATCH),
        }
        self.require_vrf_verified(&caller, &vrf_proof, &vrf_result);

        // ── Retire the previous vote ──
        self.claim_main_rewards_from_vote(&primary_account, &previous, &request_key_hash, vote_count);
        self.retire_proposal(&previous.proposal, voting_round);

        // ── Tally ──
        let vote_hash = self.vote_hash(&response_body, &destination, &requester);
        let proposal_mapper = self.proposals(&vote_hash);
        let mut proposal = if proposal_mapper.is_empty() {
            ProposalsEntry {
                vote_round: voting_round,
                vote_hash: vote_hash.clone(),
                requester: requester.clone(),
                ..ProposalsEntry::empty()
            }
        } else {
            proposal_mapper.get()
        };
        proposal.merge_vote(vote_count, voter.stake, voting_round);
        proposal_mapper.set(&proposal);

        let record = VoterRecord {
            key_hash: request_key_hash.clone(),
            proposal: ProposalsEntry {
                vote_hash: vote_hash.clone(),
                vote_count,
                stake_count: voter.stake,
                vote_round: voting_round,
                rewards_paid_out: 0,
                requester: requester.clone(),
            },
        };
        self.voter_records(&primary_account).set(&record);
        self.vote_event(&primary_account, &request_key_hash, &vote_hash, vote_count);

        // ── Quorum ──
        if quorum_reached(
            proposal.vote_count,
            request.total_stake_snapshot,
            settings.voting_threshold,
            &settings.committee,
        ) {
            self.complete_request(&request, &destination, response_type, &response_body, &proposal);
        }
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn vrf_draw(&self, vrf_result: &ManagedBuffer) -> u64 {
        let mut head = [0u8; 8];
        require!(
            vrf_result.load_slice(0, &mut head).is_ok(),
            ERR_VRF_RESULT_TOO_SHORT
        );
        draw_from_vrf(head)
    }

    fn require_vrf_verified(
        &self,
        participation_key: &ManagedAddress,
        vrf_proof: &ManagedBuffer,
        vrf_result: &ManagedBuffer,
    ) {
        let verified: bool = self
            .tx()
            .to(&self.vrf_verifier().get())
            .typed(vrf_verifier_proxy::VrfVerifierProxy)
            .verify_vrf(
                participation_key.clone(),
                self.round_seed().get(),
                vrf_proof.clone(),
                vrf_result.clone(),
            )
            .returns(ReturnsResult)
            .sync_call();
        require!(verified, ERR_VRF_REJECTED);
    }

    /// Proposals are keyed by the answer, where it goes and who asked.
    fn vote_hash(
        &self,
        response_body: &ManagedBuffer,
        destination: &Destination<Self::Api>,
        requester: &ManagedAddress,
    ) -> ContentHash<Self::Api> {
        let mut preimage = response_body.clone();
        preimage.append(destination.contract.as_managed_buffer());
        preimage.append(&destination.method);
        preimage.append(requester.as_managed_buffer());
        self.crypto().sha256(&preimage)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getMainAddress)]
    fn get_main_address(&self) -> ManagedAddress {
        self.main_address().get()
    }

    #[view(getVotingRound)]
    fn get_voting_round(&self) -> u64 {
        self.voting_round().get()
    }

    #[view(getRoundSeed)]
    fn get_round_seed(&self) -> ManagedBuffer {
        self.round_seed().get()
    }

    #[view(getCurrentRequest)]
    fn get_current_request(&self) -> OptionalValue<RequestInfo<Self::Api>> {
        let current = self.current_request();
        if current.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(current.get())
        }
    }

    #[view(getVoterRecord)]
    fn get_voter_record(&self, primary_account: ManagedAddress) -> OptionalValue<VoterRecord<Self::Api>> {
        let record = self.voter_records(&primary_account);
        if record.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(record.get())
        }
    }

    #[view(getProposal)]
    fn get_proposal(&self, vote_hash: ContentHash<Self::Api>) -> OptionalValue<ProposalsEntry<Self::Api>> {
        let proposal = self.proposals(&vote_hash);
        if proposal.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(proposal.get())
        }
    }

    #[view(getRentRefund)]
    fn get_rent_refund(&self, account: ManagedAddress) -> BigUint {
        self.rent_refunds(&account).get()
    }

    #[view(getVoterDeposit)]
    fn get_voter_deposit(&self, primary_account: ManagedAddress) -> BigUint {
        self.voter_deposits(&primary_account).get()
    }
}
