multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::rent::RentSettings;

/// 32-byte content hash used as a storage key for requests and proposals.
pub type ContentHash<M> = ManagedByteArray<M, 32>;

pub const HASH_LEN: usize = 32;
pub const ZERO_HASH: [u8; HASH_LEN] = [0u8; HASH_LEN];

pub fn empty_hash<M: ManagedTypeApi>() -> ContentHash<M> {
    ManagedByteArray::new_from_bytes(&ZERO_HASH)
}

pub fn is_empty_hash<M: ManagedTypeApi>(hash: &ContentHash<M>) -> bool {
    hash.to_byte_array() == ZERO_HASH
}

// ============================================================
// Request Status
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum RequestStatus {
    /// Placeholder so that the wire codes start at 1.
    None,
    /// Paid for, waiting for a voting round.
    Made,
    /// Requester withdrew the fee after the time lock.
    Refunded,
    /// Claimed by a voting round.
    Processing,
    /// Quorum reached and the destination was called.
    Completed,
    /// Round expired without quorum; requester may reclaim the full fee.
    RefundAvailable,
}

impl RequestStatus {
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Made, RequestStatus::Processing)
                | (RequestStatus::Processing, RequestStatus::Processing)
                | (RequestStatus::Processing, RequestStatus::Completed)
                | (RequestStatus::Processing, RequestStatus::RefundAvailable)
        )
    }
}

// ============================================================
// RequestCharges: what a request paid when it was made
// ============================================================

/// Amounts fixed at request time. Refunds, rent returns and rewards for the
/// request are paid out of these, whatever the settings say later.
#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug, Default,
)]
pub struct RequestCharges {
    /// Native fee credited to the native sink, net of the refill reserve.
    pub native_fee: u64,
    pub token_fee: u64,
    /// Rent terms the request's storage was paid under.
    pub rent: RentSettings,
}

impl RequestCharges {
    pub const ENCODED_LEN: usize = 8 + 8 + 8 + 8;

    pub fn active_rent<M: ManagedTypeApi>(&self) -> u64 {
        self.rent.active_request_cost::<M>()
    }

    pub fn settled_rent<M: ManagedTypeApi>(&self) -> u64 {
        self.rent.settled_request_cost::<M>()
    }
}

// ============================================================
// RequestInfo: one per outstanding request
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct RequestInfo<M: ManagedTypeApi> {
    pub request_id: ContentHash<M>,
    pub voting_ref: ManagedAddress<M>,
    pub request_round: u64,
    pub status: RequestStatus,
    pub total_stake_snapshot: u64,
    pub key_hash: ContentHash<M>,
    pub requester: ManagedAddress<M>,
    pub requester_fee_remaining: u64,
    pub total_votes: u64,
    pub total_votes_refunded: u64,
    pub charges: RequestCharges,
}

impl<M: ManagedTypeApi> RequestInfo<M> {
    pub const ENCODED_LEN: usize =
        32 + 32 + 8 + 1 + 8 + 32 + 32 + 8 + 8 + 8 + RequestCharges::ENCODED_LEN;

    pub fn timed_out(&self, now: u64, time_lock: u64) -> bool {
        self.request_round + time_lock < now
    }
}

// ============================================================
// ProposalsEntry: one per distinct answer per voting round
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct ProposalsEntry<M: ManagedTypeApi> {
    pub vote_hash: ContentHash<M>,
    pub vote_count: u64,
    pub stake_count: u64,
    pub vote_round: u64,
    pub rewards_paid_out: u64,
    pub requester: ManagedAddress<M>,
}

impl<M: ManagedTypeApi> ProposalsEntry<M> {
    pub const ENCODED_LEN: usize = 32 + 8 + 8 + 8 + 8 + 32;

    pub fn empty() -> Self {
        ProposalsEntry {
            vote_hash: empty_hash(),
            vote_count: 0,
            stake_count: 0,
            vote_round: 0,
            rewards_paid_out: 0,
            requester: ManagedAddress::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        is_empty_hash(&self.vote_hash)
    }

    /// Adds one voter's weight. An entry left over from an older round is
    /// restarted instead of merged.
    pub fn merge_vote(&mut self, vote_count: u64, stake: u64, round: u64) {
        if self.vote_round != round {
            self.vote_count = 0;
            self.stake_count = 0;
            self.rewards_paid_out = 0;
            self.vote_round = round;
        }
        self.vote_count += vote_count;
        self.stake_count += stake;
    }
}

// ============================================================
// VoterRecord: a committee member's most recent vote
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct VoterRecord<M: ManagedTypeApi> {
    pub key_hash: ContentHash<M>,
    pub proposal: ProposalsEntry<M>,
}

impl<M: ManagedTypeApi> VoterRecord<M> {
    pub const ENCODED_LEN: usize = 32 + ProposalsEntry::<M>::ENCODED_LEN;

    pub fn empty() -> Self {
        VoterRecord {
            key_hash: empty_hash(),
            proposal: ProposalsEntry::empty(),
        }
    }

    pub fn has_vote(&self) -> bool {
        !is_empty_hash(&self.key_hash)
    }
}

// ============================================================
// RequestSlot: the storage cell under a request key hash
// ============================================================

/// Winning proposal of a completed request, kept until every voter on it
/// has claimed.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct SettledRequest<M: ManagedTypeApi> {
    pub winner: ProposalsEntry<M>,
    pub charges: RequestCharges,
}

impl<M: ManagedTypeApi> SettledRequest<M> {
    pub const ENCODED_LEN: usize = ProposalsEntry::<M>::ENCODED_LEN + RequestCharges::ENCODED_LEN;
}

/// A request key hash holds either the live request or, after quorum,
/// the reward-settlement record of the winning proposal.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum RequestSlot<M: ManagedTypeApi> {
    Active(RequestInfo<M>),
    Settled(SettledRequest<M>),
}

impl<M: ManagedTypeApi> RequestSlot<M> {
    pub const TAG_LEN: usize = 1;
    pub const ACTIVE_LEN: usize = Self::TAG_LEN + RequestInfo::<M>::ENCODED_LEN;
    pub const SETTLED_LEN: usize = Self::TAG_LEN + SettledRequest::<M>::ENCODED_LEN;
}

// ============================================================
// Oracle payloads
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Destination<M: ManagedTypeApi> {
    pub contract: ManagedAddress<M>,
    pub method: ManagedBuffer<M>,
}

/// What the committee agrees on and what the destination receives.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct ResponseBody<M: ManagedTypeApi> {
    pub request_id: ContentHash<M>,
    pub requester: ManagedAddress<M>,
    pub oracle_return_value: ManagedBuffer<M>,
    pub user_data: ManagedBuffer<M>,
    pub error_code: u32,
    pub source_failures: u64,
}

/// Event payload describing a request for off-chain nodes.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct OracleRequest<M: ManagedTypeApi> {
    pub request_args: ManagedBuffer<M>,
    pub destination: Destination<M>,
    pub request_type: u64,
    pub key: ManagedBuffer<M>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiversx_sc::codec::{top_encode_to_vec_u8, TopDecode};
    use multiversx_sc_scenario::api::StaticApi;

    fn hash(byte: u8) -> ContentHash<StaticApi> {
        ManagedByteArray::new_from_bytes(&[byte; 32])
    }

    fn address(byte: u8) -> ManagedAddress<StaticApi> {
        ManagedAddress::new_from_bytes(&[byte; 32])
    }

    fn sample_charges() -> RequestCharges {
        RequestCharges {
            native_fee: 8_999,
            token_fee: 1_000_000,
            rent: RentSettings::default(),
        }
    }

    fn sample_proposal() -> ProposalsEntry<StaticApi> {
        ProposalsEntry {
            vote_hash: hash(7),
            vote_count: 300,
            stake_count: 300_000,
            vote_round: 4,
            rewards_paid_out: 0,
            requester: address(9),
        }
    }

    #[test]
    fn request_info_has_fixed_layout() {
        let info = RequestInfo::<StaticApi> {
            request_id: hash(1),
            voting_ref: address(2),
            request_round: 10,
            status: RequestStatus::Processing,
            total_stake_snapshot: 1_000_000,
            key_hash: hash(3),
            requester: address(4),
            requester_fee_remaining: 10_000,
            total_votes: 5,
            total_votes_refunded: 1,
            charges: sample_charges(),
        };
        let bytes = top_encode_to_vec_u8(&info).unwrap();
        assert_eq!(bytes.len(), RequestInfo::<StaticApi>::ENCODED_LEN);
        assert_eq!(bytes.len(), 201);
        // status sits right after request_id, voting_ref and request_round
        assert_eq!(bytes[72], 3);
        // charges close the record; flat rent fee is its third field
        assert_eq!(&bytes[185..193], &2_500u64.to_be_bytes());

        let decoded = RequestInfo::<StaticApi>::top_decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn voter_record_embeds_proposal() {
        let record = VoterRecord::<StaticApi> {
            key_hash: hash(5),
            proposal: sample_proposal(),
        };
        let bytes = top_encode_to_vec_u8(&record).unwrap();
        assert_eq!(bytes.len(), VoterRecord::<StaticApi>::ENCODED_LEN);
        assert_eq!(bytes.len(), 128);

        let decoded = VoterRecord::<StaticApi>::top_decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, record);
        assert!(decoded.has_vote());
        assert!(!VoterRecord::<StaticApi>::empty().has_vote());
    }

    #[test]
    fn request_slot_tags_variants() {
        let settled = RequestSlot::<StaticApi>::Settled(SettledRequest {
            winner: sample_proposal(),
            charges: sample_charges(),
        });
        let bytes = top_encode_to_vec_u8(&settled).unwrap();
        assert_eq!(bytes.len(), RequestSlot::<StaticApi>::SETTLED_LEN);
        assert_eq!(bytes.len(), 129);
        assert_eq!(bytes[0], 1);

        let decoded = RequestSlot::<StaticApi>::top_decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, settled);
    }

    #[test]
    fn response_body_decodes_from_encoded_bytes() {
        let body = ResponseBody::<StaticApi> {
            request_id: hash(1),
            requester: address(2),
            oracle_return_value: ManagedBuffer::from(&b"42.17"[..]),
            user_data: ManagedBuffer::new(),
            error_code: 0,
            source_failures: 0,
        };
        let bytes = top_encode_to_vec_u8(&body).unwrap();
        let decoded = ResponseBody::<StaticApi>::top_decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(top_encode_to_vec_u8(&RequestStatus::Made).unwrap(), [1]);
        assert_eq!(top_encode_to_vec_u8(&RequestStatus::Refunded).unwrap(), [2]);
        assert_eq!(top_encode_to_vec_u8(&RequestStatus::Processing).unwrap(), [3]);
        assert_eq!(top_encode_to_vec_u8(&RequestStatus::Completed).unwrap(), [4]);
        assert_eq!(
            top_encode_to_vec_u8(&RequestStatus::RefundAvailable).unwrap(),
            [5]
        );
    }

    #[test]
    fn only_forward_transitions_are_allowed() {
        use RequestStatus::*;
        assert!(Made.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(RefundAvailable));
        assert!(!Made.can_transition_to(Completed));
        assert!(!Refunded.can_transition_to(Processing));
        assert!(!Completed.can_transition_to(Processing));
        assert!(!RefundAvailable.can_transition_to(Completed));
    }

    #[test]
    fn merge_restarts_stale_proposal() {
        let mut entry = sample_proposal();
        entry.merge_vote(400, 400_000, 4);
        assert_eq!(entry.vote_count, 700);
        assert_eq!(entry.stake_count, 700_000);

        entry.merge_vote(10, 10_000, 5);
        assert_eq!(entry.vote_count, 10);
        assert_eq!(entry.stake_count, 10_000);
        assert_eq!(entry.vote_round, 5);
    }
}
