multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::committee::CommitteeParams;
use crate::rent::RentSettings;
use crate::settlement::{vote_refill_reserve, PERCENT};

pub const DEFAULT_REFUND_REQUEST_MADE_PERCENTAGE: u64 = 100;
pub const DEFAULT_REFUND_PROCESSING_PERCENTAGE: u64 = 10;
pub const DEFAULT_NATIVE_REQUEST_FEE: u64 = 10_000;
pub const DEFAULT_TOKEN_REQUEST_FEE: u64 = 1_000_000;
pub const DEFAULT_VOTING_THRESHOLD_PERMILLE: u64 = 660;
pub const DEFAULT_TIME_LOCK: u64 = 10;
pub const DEFAULT_VOTE_REFILL_THRESHOLD: u64 = 10;
pub const DEFAULT_VOTE_REFILL_AMOUNT: u64 = 10_000;
pub const DEFAULT_BASE_TX_FEE: u64 = 1_000;
pub const DEFAULT_SUBSCRIPTION_TOKEN_LOCK: u64 = 10;

/// Protocol-wide configuration owned by the main ledger. Only the manager
/// replaces it.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct ProtocolSettings<M: ManagedTypeApi> {
    pub manager: ManagedAddress<M>,
    pub refund_request_made_percentage: u64,
    pub refund_processing_percentage: u64,
    pub native_request_fee: u64,
    pub token_request_fee: u64,
    /// Parts per thousand of the expected committee.
    pub voting_threshold: u64,
    /// Rounds before a request, stake change or key registration may be revisited.
    pub time_lock: u64,
    pub vote_refill_threshold: u64,
    pub vote_refill_amount: u64,
    pub base_tx_fee: u64,
    pub subscription_token_lock: u64,
    pub rent: RentSettings,
    pub committee: CommitteeParams,
}

impl<M: ManagedTypeApi> ProtocolSettings<M> {
    pub fn with_defaults(manager: ManagedAddress<M>) -> Self {
        ProtocolSettings {
            manager,
            refund_request_made_percentage: DEFAULT_REFUND_REQUEST_MADE_PERCENTAGE,
            refund_processing_percentage: DEFAULT_REFUND_PROCESSING_PERCENTAGE,
            native_request_fee: DEFAULT_NATIVE_REQUEST_FEE,
            token_request_fee: DEFAULT_TOKEN_REQUEST_FEE,
            voting_threshold: DEFAULT_VOTING_THRESHOLD_PERMILLE,
            time_lock: DEFAULT_TIME_LOCK,
            vote_refill_threshold: DEFAULT_VOTE_REFILL_THRESHOLD,
            vote_refill_amount: DEFAULT_VOTE_REFILL_AMOUNT,
            base_tx_fee: DEFAULT_BASE_TX_FEE,
            subscription_token_lock: DEFAULT_SUBSCRIPTION_TOKEN_LOCK,
            rent: RentSettings::default(),
            committee: CommitteeParams::default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.time_lock > 0
            && self.committee.is_valid()
            && self.refund_request_made_percentage <= PERCENT
            && self.refund_processing_percentage <= PERCENT
            && self.voting_threshold <= 1_000
    }

    pub fn vote_refill_reserve(&self) -> u64 {
        vote_refill_reserve(
            self.vote_refill_amount,
            self.vote_refill_threshold,
            self.base_tx_fee,
        )
    }

    /// Native fee left for rewards after the refill reserve is held back.
    pub fn native_reward_base(&self) -> u64 {
        self.native_request_fee
            .saturating_sub(self.vote_refill_reserve())
    }
}

/// What a voting contract needs to know about a committee member.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct VoterContext<M: ManagedTypeApi> {
    pub participation_key: ManagedAddress<M>,
    pub key_registered_round: u64,
    /// Stake committed before the queried round.
    pub stake: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiversx_sc_scenario::api::StaticApi;

    #[test]
    fn defaults_are_valid() {
        let settings = ProtocolSettings::<StaticApi>::with_defaults(ManagedAddress::zero());
        assert!(settings.is_valid());
        assert_eq!(settings.vote_refill_reserve(), 1_001);
        assert_eq!(settings.native_reward_base(), 10_000 - 1_001);
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        let mut settings = ProtocolSettings::<StaticApi>::with_defaults(ManagedAddress::zero());
        settings.time_lock = 0;
        assert!(!settings.is_valid());

        let mut settings = ProtocolSettings::<StaticApi>::with_defaults(ManagedAddress::zero());
        settings.refund_processing_percentage = 101;
        assert!(!settings.is_valid());

        let mut settings = ProtocolSettings::<StaticApi>::with_defaults(ManagedAddress::zero());
        settings.committee.selection_probability_den = 0;
        assert!(!settings.is_valid());

        let mut settings = ProtocolSettings::<StaticApi>::with_defaults(ManagedAddress::zero());
        settings.committee.selection_probability_den =
            crate::committee::MAX_SELECTION_DENOMINATOR + 1;
        assert!(!settings.is_valid());
    }
}
