multiversx_sc::imports!();

use oracle_common::errors::*;
use oracle_common::records::{
    ContentHash, RequestCharges, RequestSlot, RequestStatus, VoterRecord,
};
use oracle_common::settlement::{percentage_of, reward_share, timeout_compensation};

#[multiversx_sc::module]
pub trait RewardsModule:
    crate::storage::StorageModule
    + crate::events::EventsModule
    + crate::accounts::AccountsModule
    + crate::staking::StakingModule
    + crate::voting_registry::VotingRegistryModule
    + crate::requests::RequestsModule
{
    // ========================================================
    // ENDPOINT: claimRewards
    // Replays a voter's previous vote against the request it
    // targeted. The voting contract resets the record afterwards.
    // ========================================================

    #[endpoint(claimRewards)]
    fn claim_rewards(
        &self,
        rewards_account: ManagedAddress,
        previous_vote: VoterRecord<Self::Api>,
        previous_requester: ManagedAddress,
    ) {
        self.require_deployed_voting();
        self.settle_previous_vote(&rewards_account, &previous_vote, &previous_requester);
    }

    // ========================================================
    // ENDPOINT: claimRewardsFromVote
    // Runs ahead of every tallied vote: settles the voter's
    // previous vote, tops up their fees from the refill pool and
    // counts the new vote on the current request.
    // ========================================================

    #[endpoint(claimRewardsFromVote)]
    fn claim_rewards_from_vote(
        &self,
        voter: ManagedAddress,
        previous_vote: VoterRecord<Self::Api>,
        key_hash: ContentHash<Self::Api>,
        vote_count: u64,
    ) {
        self.require_deployed_voting();

        let previous_requester = previous_vote.proposal.requester.clone();
        self.settle_previous_vote(&voter, &previous_vote, &previous_requester);
        self.refill_voter(&voter);

        let mut info = self.active_request(&key_hash);
        info.total_votes += vote_count;
        self.request_slot(&key_hash).set(RequestSlot::Active(info));
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn settle_previous_vote(
        &self,
        account: &ManagedAddress,
        previous_vote: &VoterRecord<Self::Api>,
        previous_requester: &ManagedAddress,
    ) {
        if !previous_vote.has_vote() {
            return;
        }
        let key_hash = &previous_vote.key_hash;
        let slot = self.request_slot(key_hash);
        if slot.is_empty() {
            return;
        }

        let settings = self.settings();
        let voted = &previous_vote.proposal;
        let mut share = 0u64;
        let mut charges = RequestCharges::default();

        match slot.get() {
            RequestSlot::Settled(mut settlement) => {
                let winner = &mut settlement.winner;
                if voted.is_empty() || winner.vote_hash != voted.vote_hash {
                    return;
                }
                share = reward_share(voted.vote_count, winner.vote_count);
                charges = settlement.charges;

                let paid_out = winner.rewards_paid_out + voted.stake_count;
                require!(paid_out <= winner.stake_count, ERR_DOUBLE_SETTLEMENT);
                winner.rewards_paid_out = paid_out;

                if paid_out == winner.stake_count {
                    slot.clear();
                    let refund = BigUint::from(charges.settled_rent::<Self::Api>());
                    self.credit_native(&winner.requester, &refund);
                    self.request_settled_event(key_hash, &winner.requester, &refund);
                } else {
                    slot.set(RequestSlot::Settled(settlement));
                }
            },
            RequestSlot::Active(mut info) => {
                let now = self.blockchain().get_block_round();
                let stalled = matches!(
                    info.status,
                    RequestStatus::Refunded | RequestStatus::Processing
                );
                if !stalled || !info.timed_out(now, settings.time_lock) {
                    return;
                }

                let compensation =
                    timeout_compensation(settings.base_tx_fee, info.requester_fee_remaining);
                info.requester_fee_remaining -= compensation;
                info.total_votes_refunded += voted.vote_count;
                let paid = self.take_native_fees(compensation);
                self.credit_native(account, &paid);

                let fully_refunded = info.total_votes_refunded >= info.total_votes
                    || info.requester_fee_remaining == 0;
                if info.status == RequestStatus::Refunded && fully_refunded {
                    require!(info.requester == *previous_requester, ERR_REQUEST_MISMATCH);
                    let remaining = self.take_native_fees(info.requester_fee_remaining);
                    require!(
                        remaining == info.requester_fee_remaining,
                        ERR_FEE_SINK_EXHAUSTED
                    );
                    self.release_request(key_hash, &info, &remaining);
                } else {
                    slot.set(RequestSlot::Active(info));
                }
            },
        }

        if share == 0 {
            return;
        }
        let token_reward = self.take_token_fees(percentage_of(share, charges.token_fee));
        let native_reward = self.take_native_fees(percentage_of(share, charges.native_fee));
        self.credit_token(account, &token_reward);
        self.credit_native(account, &native_reward);

        self.rewards_claimed_event(account, key_hash, &native_reward, &token_reward);
    }

    fn refill_voter(&self, voter: &ManagedAddress) {
        let fee = BigUint::from(self.settings().base_tx_fee);
        let pool = self.committee_refill_pool().get();
        if fee == 0u64 || pool < fee {
            return;
        }
        self.committee_refill_pool().set(pool - &fee);
        self.credit_native(voter, &fee);
    }
}
