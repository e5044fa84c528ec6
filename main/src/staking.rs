multiversx_sc::imports!();

use oracle_common::errors::*;
use oracle_common::stake_history::{StakeDirection, StakeHistoryError, StakeSnapshot};

#[multiversx_sc::module]
pub trait StakingModule:
    crate::storage::StorageModule + crate::events::EventsModule + crate::accounts::AccountsModule
{
    // ========================================================
    // ENDPOINT: stake
    // Stake tokens are paid in directly and recorded in both the
    // account and the protocol-wide snapshot.
    // ========================================================

    #[endpoint(stake)]
    #[payable("*")]
    fn stake(&self) {
        let payment = self.call_value().single_esdt();
        require!(
            payment.token_identifier == self.stake_token().get(),
            ERR_WRONG_TOKEN
        );
        let amount = payment
            .amount
            .to_u64()
            .unwrap_or_else(|| sc_panic!(ERR_AMOUNT_OVERFLOW));
        require!(amount > 0, ERR_ZERO_AMOUNT);

        let caller = self.blockchain().get_caller();
        let new_stake = self.account_stake_snapshot(&caller).latest() + amount;
        require!(
            new_stake >= self.minimum_stake().get(),
            ERR_BELOW_MINIMUM_STAKE
        );

        let now = self.apply_stake_change(&caller, amount, StakeDirection::Stake);
        self.stake_event(&caller, now, new_stake);
    }

    // ========================================================
    // ENDPOINT: unstake
    // Remaining stake must stay at or above the minimum, or be
    // withdrawn entirely.
    // ========================================================

    #[endpoint(unstake)]
    fn unstake(&self, amount: u64) {
        require!(amount > 0, ERR_ZERO_AMOUNT);

        let caller = self.blockchain().get_caller();
        let current = self.account_stake_snapshot(&caller).latest();
        require!(amount <= current, ERR_UNSTAKE_EXCEEDS_STAKE);

        let remaining = current - amount;
        require!(
            remaining == 0 || remaining >= self.minimum_stake().get(),
            ERR_BELOW_MINIMUM_STAKE
        );

        let now = self.apply_stake_change(&caller, amount, StakeDirection::Unstake);

        self.send().direct_esdt(
            &caller,
            &self.stake_token().get(),
            0,
            &BigUint::from(amount),
        );
        self.unstake_event(&caller, now, remaining);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn apply_stake_change(
        &self,
        account: &ManagedAddress,
        amount: u64,
        direction: StakeDirection,
    ) -> u64 {
        let now = self.blockchain().get_block_round();
        require!(
            self.stake_update_round(account).get() < now,
            ERR_STAKE_COOLDOWN
        );

        let mut account_snapshot = self.account_stake_snapshot(account);
        let mut total_snapshot = self.total_stake_snapshot();
        self.require_stake_update(account_snapshot.update(now, amount, direction));
        self.require_stake_update(total_snapshot.update(now, amount, direction));

        self.account_stake(account).set(account_snapshot);
        self.total_stake().set(total_snapshot);
        self.stake_update_round(account)
            .set(now + self.settings().time_lock);
        now
    }

    /// Accounts that never staked have no stored snapshot.
    fn account_stake_snapshot(&self, account: &ManagedAddress) -> StakeSnapshot {
        let mapper = self.account_stake(account);
        if mapper.is_empty() {
            StakeSnapshot::default()
        } else {
            mapper.get()
        }
    }

    fn total_stake_snapshot(&self) -> StakeSnapshot {
        let mapper = self.total_stake();
        if mapper.is_empty() {
            StakeSnapshot::default()
        } else {
            mapper.get()
        }
    }

    fn require_stake_update(&self, result: Result<(), StakeHistoryError>) {
        match result {
            Ok(()) => {},
            Err(StakeHistoryError::RetroactiveUpdate) => sc_panic!(ERR_RETROACTIVE_STAKE_UPDATE),
            Err(StakeHistoryError::RoundInFuture) => sc_panic!(ERR_STAKE_ROUND_IN_FUTURE),
            Err(StakeHistoryError::Underflow) => sc_panic!(ERR_UNSTAKE_EXCEEDS_STAKE),
            Err(StakeHistoryError::Overflow) => sc_panic!(ERR_AMOUNT_OVERFLOW),
        }
    }

    /// Stake committed before `round`, panicking when the snapshot has
    /// already moved past it.
    fn stake_before_round(&self, account: &ManagedAddress, round: u64) -> u64 {
        match self.account_stake_snapshot(account).stake_before(round) {
            Ok(stake) => stake,
            Err(_) => sc_panic!(ERR_STAKE_ROUND_IN_FUTURE),
        }
    }

    fn total_stake_before_round(&self, round: u64) -> u64 {
        match self.total_stake_snapshot().stake_before(round) {
            Ok(stake) => stake,
            Err(_) => sc_panic!(ERR_STAKE_ROUND_IN_FUTURE),
        }
    }
}
