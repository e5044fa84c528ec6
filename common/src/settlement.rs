//! Integer settlement arithmetic. Every percentage multiplies before it
//! divides and truncates.

pub const PERCENT: u64 = 100;

/// Share (in percent) of a settled proposal's reward owed to one voter.
pub fn reward_share(voter_vote_count: u64, proposal_vote_count: u64) -> u64 {
    if proposal_vote_count == 0 {
        return 0;
    }
    ((voter_vote_count as u128 * PERCENT as u128) / proposal_vote_count as u128) as u64
}

pub fn percentage_of(percentage: u64, amount: u64) -> u64 {
    ((percentage as u128 * amount as u128) / PERCENT as u128) as u64
}

/// Portion of each native request fee held back to keep committee members
/// supplied with transaction fees.
pub fn vote_refill_reserve(refill_amount: u64, refill_threshold: u64, base_tx_fee: u64) -> u64 {
    if refill_amount <= refill_threshold {
        return 0;
    }
    ((refill_amount as u128 * base_tx_fee as u128) / (refill_amount - refill_threshold) as u128)
        as u64
}

/// Paid to a voter from the remaining fee of a request that timed out
/// while they were voting on it.
pub fn timeout_compensation(base_tx_fee: u64, requester_fee_remaining: u64) -> u64 {
    core::cmp::min(base_tx_fee.saturating_mul(2), requester_fee_remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_of_a_proposal_never_exceed_whole() {
        let votes = [300u64, 400, 17, 1];
        let proposal_total: u64 = votes.iter().sum();
        let shares: u64 = votes
            .iter()
            .map(|&voter| reward_share(voter, proposal_total))
            .sum();
        assert!(shares <= PERCENT);

        let fee = 1_000_000;
        let paid: u64 = votes
            .iter()
            .map(|&voter| percentage_of(reward_share(voter, proposal_total), fee))
            .sum();
        assert!(paid <= fee);
    }

    #[test]
    fn truncation_follows_multiply_then_divide() {
        assert_eq!(reward_share(1, 3), 33);
        assert_eq!(reward_share(2, 3), 66);
        assert_eq!(reward_share(5, 0), 0);
        assert_eq!(percentage_of(33, 10_000), 3_300);
        assert_eq!(percentage_of(10, 1_000_001), 100_000);
    }

    #[test]
    fn refunds_never_exceed_fee() {
        for fee in [0u64, 1, 999, 10_000, 1_000_000] {
            assert!(percentage_of(100, fee) <= fee);
            assert!(percentage_of(10, fee) <= fee);
        }
    }

    #[test]
    fn refill_reserve() {
        assert_eq!(vote_refill_reserve(10_000, 10, 1_000), 1_001);
        assert_eq!(vote_refill_reserve(10, 10, 1_000), 0);
        assert_eq!(vote_refill_reserve(5, 10, 1_000), 0);
    }

    #[test]
    fn compensation_is_capped_by_remaining_fee() {
        assert_eq!(timeout_compensation(1_000, 10_000), 2_000);
        assert_eq!(timeout_compensation(1_000, 1_500), 1_500);
        assert_eq!(timeout_compensation(1_000, 0), 0);
    }
}
