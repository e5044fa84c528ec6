#![no_std]

multiversx_sc::imports!();

pub mod accounts;
pub mod events;
pub mod requests;
pub mod rewards;
pub mod staking;
pub mod storage;
pub mod voting_proxy;
pub mod voting_registry;

use oracle_common::errors::*;
use oracle_common::records::{empty_hash, ContentHash, RequestSlot};
use oracle_common::settings::{ProtocolSettings, VoterContext};
use oracle_common::stake_history::StakeSnapshot;

// ============================================================
// Contract
// ============================================================

/// Main ledger of the oracle: prepaid balances, stake, requests and
/// their settlement. Voting contracts it deployed drive requests through
/// `updateRequestStatus` and the reward callbacks.
#[multiversx_sc::contract]
pub trait OracleMain:
    storage::StorageModule
    + events::EventsModule
    + accounts::AccountsModule
    + staking::StakingModule
    + voting_registry::VotingRegistryModule
    + requests::RequestsModule
    + rewards::RewardsModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        stake_token: TokenIdentifier,
        minimum_stake: u64,
        manager: ManagedAddress,
        vrf_verifier: ManagedAddress,
    ) {
        require!(stake_token.is_valid_esdt_identifier(), ERR_WRONG_TOKEN);

        self.stake_token().set(&stake_token);
        self.minimum_stake().set(minimum_stake);
        self.vrf_verifier().set(&vrf_verifier);
        self.total_stake().set_if_empty(StakeSnapshot::default());
        self.protocol_settings()
            .set(ProtocolSettings::with_defaults(manager));
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: updateProtocolSettings (manager only)
    // ========================================================

    #[endpoint(updateProtocolSettings)]
    fn update_protocol_settings(&self, settings: ProtocolSettings<Self::Api>) {
        self.require_manager();
        require!(settings.is_valid(), ERR_INVALID_SETTINGS);

        let caller = self.blockchain().get_caller();
        self.protocol_settings().set(&settings);
        self.protocol_settings_event(&caller, &settings);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getProtocolSettings)]
    fn get_protocol_settings(&self) -> ProtocolSettings<Self::Api> {
        self.settings()
    }

    /// Identity and stake of a committee member as of a voting round.
    #[view(getVoterContext)]
    fn get_voter_context(&self, account: ManagedAddress, round: u64) -> VoterContext<Self::Api> {
        let participation_key = if self.participation_key(&account).is_empty() {
            ManagedAddress::zero()
        } else {
            self.participation_key(&account).get()
        };
        VoterContext {
            participation_key,
            key_registered_round: self.participation_key_round(&account).get(),
            stake: self.stake_before_round(&account, round),
        }
    }

    #[view(getRequestSlot)]
    fn get_request_slot(&self, key_hash: ContentHash<Self::Api>) -> OptionalValue<RequestSlot<Self::Api>> {
        let slot = self.request_slot(&key_hash);
        if slot.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(slot.get())
        }
    }

    #[view(getRequestKeyHash)]
    fn get_request_key_hash(&self, requester: ManagedAddress, key: ManagedBuffer) -> ContentHash<Self::Api> {
        self.request_key_hash(&requester, &key)
    }

    #[view(getLatestRequest)]
    fn get_latest_request(&self, account: ManagedAddress) -> ContentHash<Self::Api> {
        let latest = self.latest_request(&account);
        if latest.is_empty() {
            empty_hash()
        } else {
            latest.get()
        }
    }

    #[view(getStakeSnapshot)]
    fn get_stake_snapshot(&self, account: ManagedAddress) -> StakeSnapshot {
        self.account_stake_snapshot(&account)
    }

    #[view(getTotalStakeSnapshot)]
    fn get_total_stake_snapshot(&self) -> StakeSnapshot {
        self.total_stake_snapshot()
    }

    /// (native balance, token balance, locked tokens)
    #[view(getAccountBalances)]
    fn get_account_balances(&self, account: ManagedAddress) -> MultiValue3<BigUint, BigUint, BigUint> {
        (
            self.native_balance(&account).get(),
            self.token_balance(&account).get(),
            self.locked_tokens(&account).get(),
        )
            .into()
    }

    /// (native fee sink, token fee sink, committee refill pool)
    #[view(getFeeSinks)]
    fn get_fee_sinks(&self) -> MultiValue3<BigUint, BigUint, BigUint> {
        (
            self.native_fee_sink().get(),
            self.token_fee_sink().get(),
            self.committee_refill_pool().get(),
        )
            .into()
    }
}
