multiversx_sc::derive_imports!();

#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug, Default,
)]
pub struct StakeSlot {
    pub round: u64,
    pub total: u64,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum StakeDirection {
    Stake,
    Unstake,
}

#[derive(Debug, PartialEq)]
pub enum StakeHistoryError {
    /// The update is older than the stored current slot.
    RetroactiveUpdate,
    /// The current slot was written at or after the queried round and the
    /// historical slot cannot answer for rounds before it.
    RoundInFuture,
    Underflow,
    Overflow,
}

/// Two-slot rolling stake history.
///
/// `current` holds the stake as of the latest update round, `historical`
/// the stake as it stood before that round. Requests created in round `r`
/// read the stake committed strictly before `r`, so a stake change landing
/// in the same round as a request never alters that request's snapshot.
#[type_abi]
#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug, Default,
)]
pub struct StakeSnapshot {
    pub historical: StakeSlot,
    pub current: StakeSlot,
}

impl StakeSnapshot {
    pub const ENCODED_LEN: usize = 32;

    pub fn update(
        &mut self,
        round: u64,
        delta: u64,
        direction: StakeDirection,
    ) -> Result<(), StakeHistoryError> {
        if round < self.current.round {
            return Err(StakeHistoryError::RetroactiveUpdate);
        }

        let total = match direction {
            StakeDirection::Stake => self
                .current
                .total
                .checked_add(delta)
                .ok_or(StakeHistoryError::Overflow)?,
            StakeDirection::Unstake => self
                .current
                .total
                .checked_sub(delta)
                .ok_or(StakeHistoryError::Underflow)?,
        };

        if round != self.current.round {
            self.historical = self.current;
            self.current.round = round;
        }
        self.current.total = total;
        Ok(())
    }

    /// Stake committed strictly before `round`.
    pub fn stake_before(&self, round: u64) -> Result<u64, StakeHistoryError> {
        if self.current.round < round {
            Ok(self.current.total)
        } else if self.current.round == round {
            Ok(self.historical.total)
        } else {
            Err(StakeHistoryError::RoundInFuture)
        }
    }

    pub fn latest(&self) -> u64 {
        self.current.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_round_shifts_current_into_history() {
        let mut snapshot = StakeSnapshot::default();
        snapshot.update(5, 100, StakeDirection::Stake).unwrap();
        snapshot.update(8, 50, StakeDirection::Stake).unwrap();

        assert_eq!(snapshot.historical, StakeSlot { round: 5, total: 100 });
        assert_eq!(snapshot.current, StakeSlot { round: 8, total: 150 });
    }

    #[test]
    fn same_round_updates_keep_history() {
        let mut snapshot = StakeSnapshot::default();
        snapshot.update(5, 100, StakeDirection::Stake).unwrap();
        snapshot.update(8, 50, StakeDirection::Stake).unwrap();
        snapshot.update(8, 30, StakeDirection::Unstake).unwrap();

        assert_eq!(snapshot.historical, StakeSlot { round: 5, total: 100 });
        assert_eq!(snapshot.current, StakeSlot { round: 8, total: 120 });
    }

    #[test]
    fn retroactive_update_is_rejected() {
        let mut snapshot = StakeSnapshot::default();
        snapshot.update(8, 100, StakeDirection::Stake).unwrap();

        assert_eq!(
            snapshot.update(7, 1, StakeDirection::Stake),
            Err(StakeHistoryError::RetroactiveUpdate)
        );
        assert_eq!(snapshot.latest(), 100);
    }

    #[test]
    fn unstake_below_zero_leaves_snapshot_untouched() {
        let mut snapshot = StakeSnapshot::default();
        snapshot.update(3, 10, StakeDirection::Stake).unwrap();

        assert_eq!(
            snapshot.update(4, 11, StakeDirection::Unstake),
            Err(StakeHistoryError::Underflow)
        );
        assert_eq!(snapshot.current, StakeSlot { round: 3, total: 10 });
    }

    #[test]
    fn same_round_stake_does_not_reach_snapshot() {
        let mut snapshot = StakeSnapshot::default();
        snapshot.update(5, 1_000, StakeDirection::Stake).unwrap();

        // a request created in round 9 reads 1_000
        assert_eq!(snapshot.stake_before(9), Ok(1_000));

        // stake landing in round 9 itself is invisible to that request
        snapshot.update(9, 5_000, StakeDirection::Stake).unwrap();
        assert_eq!(snapshot.stake_before(9), Ok(1_000));
        assert_eq!(snapshot.stake_before(10), Ok(6_000));
        assert_eq!(
            snapshot.stake_before(8),
            Err(StakeHistoryError::RoundInFuture)
        );
    }

    #[test]
    fn account_ledgers_sum_to_protocol_ledger() {
        // (round, account, amount, direction)
        let updates = [
            (2u64, 0usize, 400u64, StakeDirection::Stake),
            (3, 1, 300, StakeDirection::Stake),
            (3, 2, 300, StakeDirection::Stake),
            (6, 0, 100, StakeDirection::Unstake),
            (6, 1, 250, StakeDirection::Stake),
            (9, 2, 300, StakeDirection::Unstake),
            (9, 0, 50, StakeDirection::Stake),
        ];

        let mut accounts = [StakeSnapshot::default(); 3];
        let mut total = StakeSnapshot::default();

        for (round, account, amount, direction) in updates {
            accounts[account].update(round, amount, direction).unwrap();
            total.update(round, amount, direction).unwrap();

            for observed in [round, round + 1] {
                let sum: u64 = accounts
                    .iter()
                    .map(|snapshot| snapshot.stake_before(observed).unwrap())
                    .sum();
                assert_eq!(sum, total.stake_before(observed).unwrap());
            }
        }
        assert_eq!(total.latest(), 400 - 100 + 50 + 300 + 250);
    }
}
