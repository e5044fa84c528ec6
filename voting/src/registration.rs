multiversx_sc::imports!();

use oracle_common::errors::*;
use oracle_common::records::VoterRecord;

#[multiversx_sc::module]
pub trait RegistrationModule:
    crate::storage::StorageModule
    + crate::events::EventsModule
    + crate::ledger::LedgerModule
    + crate::rounds::RoundsModule
{
    // ========================================================
    // ENDPOINT: registerVoter
    // The participation key of a staking account joins the
    // committee, prepaying rent for its record and one proposal.
    // ========================================================

    #[endpoint(registerVoter)]
    #[payable("EGLD")]
    fn register_voter(&self, primary_account: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        self.require_participation_key(&caller, &primary_account);
        require!(
            self.voter_records(&primary_account).is_empty(),
            ERR_VOTER_ALREADY_REGISTERED
        );

        let payment = self.call_value().egld_value().clone_value();
        let rent = self.main_settings().rent;
        require!(
            payment == rent.voter_registration_cost::<Self::Api>(),
            ERR_WRONG_RENT_PAYMENT
        );

        self.voter_records(&primary_account).set(VoterRecord::empty());
        self.voter_deposits(&primary_account).set(&payment);
        self.voter_registered_event(&primary_account, &caller);
    }

    // ========================================================
    // ENDPOINT: deregisterVoter
    // Settles the last vote, deletes the record and credits the
    // rent paid at registration back to the caller.
    // ========================================================

    #[endpoint(deregisterVoter)]
    fn deregister_voter(&self, primary_account: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        self.require_participation_key(&caller, &primary_account);

        let record = self.registered_voter(&primary_account);
        let voting_round = self.voting_round().get();
        if record.has_vote() {
            require!(
                record.proposal.vote_round < voting_round,
                ERR_VOTE_ROUND_ACTIVE
            );
            self.claim_main_rewards(&primary_account, &record);
            self.retire_proposal(&record.proposal, voting_round);
        }
        self.voter_records(&primary_account).clear();

        let refund = self.voter_deposits(&primary_account).take();
        self.rent_refunds(&caller).update(|r| *r += &refund);
        self.voter_deregistered_event(&primary_account, &refund);
    }

    // ========================================================
    // ENDPOINT: claimRewards
    // Anyone may settle a voter's previous vote once its round
    // has closed. Rewards always go to the staking account.
    // ========================================================

    #[endpoint(claimRewards)]
    fn claim_rewards(&self, primary_account: ManagedAddress) {
        let record = self.registered_voter(&primary_account);
        require!(record.has_vote(), ERR_NOTHING_TO_WITHDRAW);
        require!(
            record.proposal.vote_round < self.voting_round().get(),
            ERR_VOTE_ROUND_ACTIVE
        );

        self.claim_main_rewards(&primary_account, &record);

        self.voter_records(&primary_account).set(VoterRecord::empty());
        self.previous_vote_cleared_event(&primary_account, &record.key_hash);
    }

    #[endpoint(withdrawRentRefund)]
    fn withdraw_rent_refund(&self) {
        let caller = self.blockchain().get_caller();
        let amount = self.rent_refunds(&caller).take();
        require!(amount > 0u64, ERR_NOTHING_TO_WITHDRAW);

        self.send().direct_egld(&caller, &amount);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_participation_key(&self, caller: &ManagedAddress, primary_account: &ManagedAddress) {
        // one round ahead so the stake snapshot is always readable
        let round = self.blockchain().get_block_round() + 1;
        let context = self.voter_context(primary_account, round);
        require!(
            context.participation_key == *caller,
            ERR_NOT_PARTICIPATION_KEY
        );
    }

    fn registered_voter(&self, primary_account: &ManagedAddress) -> VoterRecord<Self::Api> {
        let record = self.voter_records(primary_account);
        require!(!record.is_empty(), ERR_VOTER_NOT_REGISTERED);
        record.get()
    }
}
