multiversx_sc::imports!();

use oracle_common::errors::*;
use oracle_common::records::{Destination, OracleRequest};
use oracle_common::settings::ProtocolSettings;

#[multiversx_sc::module]
pub trait AccountsModule: crate::storage::StorageModule + crate::events::EventsModule {
    // ========================================================
    // ENDPOINT: depositNative / depositToken
    // Prepaid balances fund requests and storage rent.
    // ========================================================

    #[endpoint(depositNative)]
    #[payable("EGLD")]
    fn deposit_native(&self, account: OptionalValue<ManagedAddress>) {
        let amount = self.call_value().egld_value().clone_value();
        require!(amount > 0u64, ERR_ZERO_AMOUNT);

        let account = account
            .into_option()
            .unwrap_or_else(|| self.blockchain().get_caller());
        self.native_balance(&account).update(|b| *b += &amount);

        self.deposit_event(&account, false, &amount);
    }

    #[endpoint(depositToken)]
    #[payable("*")]
    fn deposit_token(&self, account: OptionalValue<ManagedAddress>) {
        let payment = self.call_value().single_esdt();
        require!(
            payment.token_identifier == self.stake_token().get(),
            ERR_WRONG_TOKEN
        );
        let amount = payment.amount.clone();
        require!(amount > 0u64, ERR_ZERO_AMOUNT);

        let account = account
            .into_option()
            .unwrap_or_else(|| self.blockchain().get_caller());
        self.token_balance(&account).update(|b| *b += &amount);

        self.deposit_event(&account, true, &amount);
    }

    // ========================================================
    // ENDPOINT: withdrawNative / withdrawToken
    // ========================================================

    #[endpoint(withdrawNative)]
    fn withdraw_native(&self, amount: BigUint) {
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        let caller = self.blockchain().get_caller();
        self.debit_native(&caller, &amount);

        self.send().direct_egld(&caller, &amount);
        self.withdraw_event(&caller, false, &amount);
    }

    #[endpoint(withdrawToken)]
    fn withdraw_token(&self, amount: BigUint) {
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        let caller = self.blockchain().get_caller();
        self.debit_token(&caller, &amount);

        self.send()
            .direct_esdt(&caller, &self.stake_token().get(), 0, &amount);
        self.withdraw_event(&caller, true, &amount);
    }

    // ========================================================
    // ENDPOINT: registerParticipationAccount
    // Binds the key that signs votes on behalf of a staking
    // account. Re-binding waits out the time lock.
    // ========================================================

    #[endpoint(registerParticipationAccount)]
    fn register_participation_account(&self, key: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        self.require_key_unlocked(&caller);

        let now = self.blockchain().get_block_round();
        self.participation_key(&caller).set(&key);
        self.participation_key_round(&caller).set(now);

        self.participation_key_event(&caller, now, &key);
    }

    #[endpoint(unregisterParticipationAccount)]
    fn unregister_participation_account(&self) {
        let caller = self.blockchain().get_caller();
        self.require_key_unlocked(&caller);

        let now = self.blockchain().get_block_round();
        self.participation_key(&caller).clear();
        self.participation_key_round(&caller).set(now);

        self.participation_key_event(&caller, now, &ManagedAddress::zero());
    }

    // ========================================================
    // ENDPOINT: subscribe
    // Locks tokens against a recurring request. Off-chain nodes
    // pick the subscription up from the event.
    // ========================================================

    #[endpoint(subscribe)]
    fn subscribe(
        &self,
        request_args: ManagedBuffer,
        destination: Destination<Self::Api>,
        subscription: ManagedBuffer,
        request_type: u64,
    ) {
        let caller = self.blockchain().get_caller();
        let lock = BigUint::from(self.settings().subscription_token_lock);

        self.debit_token(&caller, &lock);
        self.locked_tokens(&caller).update(|l| *l += &lock);

        let request = OracleRequest {
            request_args,
            destination,
            request_type,
            key: ManagedBuffer::new(),
        };
        self.subscribe_event(&caller, &subscription, &request);
    }

    // ========================================================
    // INTERNAL: balances and config access
    // ========================================================

    fn settings(&self) -> ProtocolSettings<Self::Api> {
        self.protocol_settings().get()
    }

    fn require_manager(&self) {
        require!(
            self.blockchain().get_caller() == self.settings().manager,
            ERR_NOT_MANAGER
        );
    }

    fn require_key_unlocked(&self, account: &ManagedAddress) {
        let registered_at = self.participation_key_round(account).get();
        let now = self.blockchain().get_block_round();
        require!(
            registered_at == 0 || now >= registered_at + self.settings().time_lock,
            ERR_KEY_TIME_LOCK
        );
    }

    fn credit_native(&self, account: &ManagedAddress, amount: &BigUint) {
        if *amount > 0u64 {
            self.native_balance(account).update(|b| *b += amount);
        }
    }

    fn debit_native(&self, account: &ManagedAddress, amount: &BigUint) {
        let balance = self.native_balance(account).get();
        require!(balance >= *amount, ERR_INSUFFICIENT_NATIVE_BALANCE);
        self.native_balance(account).set(balance - amount);
    }

    fn credit_token(&self, account: &ManagedAddress, amount: &BigUint) {
        if *amount > 0u64 {
            self.token_balance(account).update(|b| *b += amount);
        }
    }

    fn debit_token(&self, account: &ManagedAddress, amount: &BigUint) {
        let balance = self.token_balance(account).get();
        require!(balance >= *amount, ERR_INSUFFICIENT_TOKEN_BALANCE);
        self.token_balance(account).set(balance - amount);
    }

    /// Takes up to `amount` from the native fee sink, then from the
    /// committee refill pool. Returns what was actually taken.
    fn take_native_fees(&self, amount: u64) -> BigUint {
        let mut remaining = BigUint::from(amount);
        let mut taken = BigUint::zero();
        for pool in [self.native_fee_sink(), self.committee_refill_pool()] {
            if remaining == 0u64 {
                break;
            }
            let available = pool.get();
            let part = if available < remaining {
                available.clone()
            } else {
                remaining.clone()
            };
            pool.set(available - &part);
            remaining -= &part;
            taken += part;
        }
        taken
    }

    fn take_token_fees(&self, amount: u64) -> BigUint {
        let available = self.token_fee_sink().get();
        let wanted = BigUint::from(amount);
        let part = if available < wanted { available.clone() } else { wanted };
        self.token_fee_sink().set(available - &part);
        part
    }
}
