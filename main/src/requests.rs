multiversx_sc::imports!();

use oracle_common::errors::*;
use oracle_common::records::{
    ContentHash, Destination, OracleRequest, ProposalsEntry, RequestCharges, RequestInfo,
    RequestSlot, RequestStatus, SettledRequest,
};
use oracle_common::rent::MAX_KEY_LEN;
use oracle_common::settlement::percentage_of;

#[multiversx_sc::module]
pub trait RequestsModule:
    crate::storage::StorageModule
    + crate::events::EventsModule
    + crate::accounts::AccountsModule
    + crate::staking::StakingModule
    + crate::voting_registry::VotingRegistryModule
{
    // ========================================================
    // ENDPOINT: request
    // Charges fee and rent from prepaid balances and records the
    // stake committed before this round as the quorum base.
    // ========================================================

    #[endpoint(request)]
    fn request(
        &self,
        request_args: ManagedBuffer,
        destination: Destination<Self::Api>,
        request_type: u64,
        key: ManagedBuffer,
    ) -> ContentHash<Self::Api> {
        require!(key.len() <= MAX_KEY_LEN, ERR_KEY_TOO_LONG);

        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_round();
        let settings = self.settings();

        let key_hash = self.request_key_hash(&caller, &key);
        require!(self.request_slot(&key_hash).is_empty(), ERR_REQUEST_EXISTS);

        let total_stake_snapshot = self.total_stake_before_round(now);

        // ── Charge the requester ──
        let rent = settings.rent.active_request_cost::<Self::Api>();
        self.debit_native(
            &caller,
            &(BigUint::from(settings.native_request_fee) + BigUint::from(rent)),
        );
        self.debit_token(&caller, &BigUint::from(settings.token_request_fee));

        // ── Split the native fee between sink and refill pool ──
        let charges = RequestCharges {
            native_fee: settings.native_reward_base(),
            token_fee: settings.token_request_fee,
            rent: settings.rent,
        };
        self.native_fee_sink()
            .update(|s| *s += BigUint::from(charges.native_fee));
        let reserve = settings.native_request_fee - charges.native_fee;
        self.committee_refill_pool()
            .update(|p| *p += BigUint::from(reserve));
        self.token_fee_sink()
            .update(|s| *s += BigUint::from(charges.token_fee));

        let request_id = self.blockchain().get_tx_hash();
        let info = RequestInfo {
            request_id: request_id.clone(),
            voting_ref: ManagedAddress::zero(),
            request_round: now,
            status: RequestStatus::Made,
            total_stake_snapshot,
            key_hash: key_hash.clone(),
            requester: caller.clone(),
            requester_fee_remaining: charges.native_fee,
            total_votes: 0,
            total_votes_refunded: 0,
            charges,
        };
        self.request_slot(&key_hash).set(RequestSlot::Active(info));
        self.latest_request(&caller).set(&key_hash);

        let request = OracleRequest {
            request_args,
            destination,
            request_type,
            key,
        };
        self.request_event(&caller, &key_hash, &request_id, &request);

        key_hash
    }

    // ========================================================
    // ENDPOINT: refundRequest
    // Requester reclaims fees once a request stalls. How much
    // comes back depends on how far the request got.
    // ========================================================

    #[endpoint(refundRequest)]
    fn refund_request(&self, key_hash: ContentHash<Self::Api>) {
        let caller = self.blockchain().get_caller();
        let mut info = self.active_request(&key_hash);
        require!(info.requester == caller, ERR_NOT_REQUESTER);

        let settings = self.settings();
        let now = self.blockchain().get_block_round();
        let timed_out = info.timed_out(now, settings.time_lock);

        match info.status {
            RequestStatus::Made | RequestStatus::RefundAvailable => {
                if info.status == RequestStatus::Made {
                    require!(timed_out, ERR_REQUEST_NOT_TIMED_OUT);
                }
                let percentage = settings.refund_request_made_percentage;
                let token_refund = percentage_of(percentage, info.charges.token_fee);
                self.refund_token_fee(&caller, token_refund);

                let native_refund = percentage_of(percentage, info.requester_fee_remaining);
                let taken = self.take_native_fees(native_refund);
                require!(taken == native_refund, ERR_FEE_SINK_EXHAUSTED);

                self.request_refunded_event(&caller, &key_hash, info.status, &taken);
                self.release_request(&key_hash, &info, &taken);
            },
            RequestStatus::Processing => {
                require!(timed_out, ERR_REQUEST_NOT_TIMED_OUT);
                let token_refund = percentage_of(
                    settings.refund_processing_percentage,
                    info.charges.token_fee,
                );
                self.refund_token_fee(&caller, token_refund);

                info.status = RequestStatus::Refunded;
                self.request_slot(&key_hash).set(RequestSlot::Active(info));
                self.request_refunded_event(
                    &caller,
                    &key_hash,
                    RequestStatus::Processing,
                    &BigUint::zero(),
                );
            },
            _ => sc_panic!(ERR_NOT_REFUNDABLE),
        }
    }

    // ========================================================
    // ENDPOINT: updateRequestStatus
    // Callback for voting contracts this ledger deployed.
    // ========================================================

    #[endpoint(updateRequestStatus)]
    fn update_request_status(
        &self,
        key_hash: ContentHash<Self::Api>,
        new_status: RequestStatus,
        requester: ManagedAddress,
        proposal: ProposalsEntry<Self::Api>,
    ) -> RequestInfo<Self::Api> {
        self.require_deployed_voting();
        let caller = self.blockchain().get_caller();

        let mut info = self.active_request(&key_hash);
        require!(info.requester == requester, ERR_REQUEST_MISMATCH);
        require!(
            info.status.can_transition_to(new_status),
            ERR_INVALID_STATUS_TRANSITION
        );

        match new_status {
            RequestStatus::Processing => {
                info.voting_ref = caller.clone();
                info.status = RequestStatus::Processing;
                self.request_slot(&key_hash)
                    .set(RequestSlot::Active(info.clone()));
            },
            RequestStatus::Completed => {
                require!(info.voting_ref == caller, ERR_REQUEST_MISMATCH);
                require!(!proposal.is_empty(), ERR_REQUEST_MISMATCH);
                info.status = RequestStatus::Completed;

                let settlement = SettledRequest {
                    winner: ProposalsEntry {
                        rewards_paid_out: 0,
                        requester: info.requester.clone(),
                        ..proposal.clone()
                    },
                    charges: info.charges,
                };
                self.request_slot(&key_hash)
                    .set(RequestSlot::Settled(settlement));

                // the settlement record is smaller; return the difference now
                let freed = info.charges.active_rent::<Self::Api>()
                    - info.charges.settled_rent::<Self::Api>();
                self.credit_native(&info.requester, &BigUint::from(freed));
            },
            RequestStatus::RefundAvailable => {
                require!(info.voting_ref == caller, ERR_REQUEST_MISMATCH);
                info.status = RequestStatus::RefundAvailable;
                self.request_slot(&key_hash)
                    .set(RequestSlot::Active(info.clone()));
            },
            _ => sc_panic!(ERR_INVALID_STATUS_TRANSITION),
        }

        self.request_status_event(&key_hash, &caller, new_status, &proposal);
        info
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn request_key_hash(
        &self,
        requester: &ManagedAddress,
        key: &ManagedBuffer,
    ) -> ContentHash<Self::Api> {
        let mut preimage = requester.as_managed_buffer().clone();
        preimage.append(key);
        self.crypto().sha256(&preimage)
    }

    fn active_request(&self, key_hash: &ContentHash<Self::Api>) -> RequestInfo<Self::Api> {
        let slot = self.request_slot(key_hash);
        require!(!slot.is_empty(), ERR_REQUEST_NOT_FOUND);
        match slot.get() {
            RequestSlot::Active(info) => info,
            RequestSlot::Settled(_) => sc_panic!(ERR_REQUEST_ALREADY_COMPLETED),
        }
    }

    fn refund_token_fee(&self, requester: &ManagedAddress, amount: u64) {
        let taken = self.take_token_fees(amount);
        require!(taken == amount, ERR_FEE_SINK_EXHAUSTED);
        self.credit_token(requester, &taken);
    }

    /// Deletes an active request and returns its rent plus `fee_refund`
    /// to the requester.
    fn release_request(
        &self,
        key_hash: &ContentHash<Self::Api>,
        info: &RequestInfo<Self::Api>,
        fee_refund: &BigUint,
    ) {
        self.request_slot(key_hash).clear();

        let rent = info.charges.active_rent::<Self::Api>();
        let refund = fee_refund + &BigUint::from(rent);
        self.credit_native(&info.requester, &refund);
        self.request_settled_event(key_hash, &info.requester, &refund);
    }
}
