multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::records::{ProposalsEntry, RequestSlot, VoterRecord, HASH_LEN};

pub const MAX_KEY_LEN: usize = 64;

/// Deterministic storage rent: `flat_fee + per_byte_fee * (key + value)`.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub struct RentSettings {
    pub flat_fee: u64,
    pub per_byte_fee: u64,
}

impl Default for RentSettings {
    fn default() -> Self {
        RentSettings {
            flat_fee: 2_500,
            per_byte_fee: 400,
        }
    }
}

impl RentSettings {
    pub fn record_cost(&self, key_len: usize, value_len: usize) -> u64 {
        self.flat_fee + self.per_byte_fee * (key_len + value_len) as u64
    }

    pub fn active_request_cost<M: ManagedTypeApi>(&self) -> u64 {
        self.record_cost(HASH_LEN, RequestSlot::<M>::ACTIVE_LEN)
    }

    pub fn settled_request_cost<M: ManagedTypeApi>(&self) -> u64 {
        self.record_cost(HASH_LEN, RequestSlot::<M>::SETTLED_LEN)
    }

    /// Deposit a committee member locks when registering: their own record
    /// plus room for the one live proposal they can contribute to.
    pub fn voter_registration_cost<M: ManagedTypeApi>(&self) -> u64 {
        self.record_cost(HASH_LEN, VoterRecord::<M>::ENCODED_LEN)
            + self.record_cost(HASH_LEN, ProposalsEntry::<M>::ENCODED_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiversx_sc_scenario::api::StaticApi;

    #[test]
    fn cost_is_flat_plus_per_byte() {
        let rent = RentSettings::default();
        assert_eq!(rent.record_cost(0, 0), 2_500);
        assert_eq!(rent.record_cost(32, 8), 2_500 + 400 * 40);
    }

    #[test]
    fn request_costs_cover_tagged_records() {
        let rent = RentSettings::default();
        assert_eq!(rent.active_request_cost::<StaticApi>(), 2_500 + 400 * (32 + 202));
        assert_eq!(rent.settled_request_cost::<StaticApi>(), 2_500 + 400 * (32 + 129));
        assert!(rent.settled_request_cost::<StaticApi>() < rent.active_request_cost::<StaticApi>());
    }

    #[test]
    fn voter_deposit_covers_record_and_proposal() {
        let rent = RentSettings::default();
        assert_eq!(
            rent.voter_registration_cost::<StaticApi>(),
            (2_500 + 400 * (32 + 128)) + (2_500 + 400 * (32 + 96))
        );
    }
}
