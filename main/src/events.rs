multiversx_sc::imports!();

use oracle_common::records::{ContentHash, OracleRequest, ProposalsEntry, RequestStatus};
use oracle_common::settings::ProtocolSettings;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("deposit")]
    fn deposit_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] is_token: bool,
        amount: &BigUint,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] is_token: bool,
        amount: &BigUint,
    );

    #[event("stake")]
    fn stake_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] round: u64,
        new_stake: u64,
    );

    #[event("unstake")]
    fn unstake_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] round: u64,
        new_stake: u64,
    );

    #[event("participationKeyRegistered")]
    fn participation_key_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] round: u64,
        key: &ManagedAddress,
    );

    #[event("subscribe")]
    fn subscribe_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] subscription: &ManagedBuffer,
        request: &OracleRequest<Self::Api>,
    );

    #[event("request")]
    fn request_event(
        &self,
        #[indexed] requester: &ManagedAddress,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        #[indexed] request_id: &ContentHash<Self::Api>,
        request: &OracleRequest<Self::Api>,
    );

    #[event("requestRefunded")]
    fn request_refunded_event(
        &self,
        #[indexed] requester: &ManagedAddress,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        #[indexed] status: RequestStatus,
        native_refund: &BigUint,
    );

    #[event("requestStatusUpdated")]
    fn request_status_event(
        &self,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        #[indexed] voting_contract: &ManagedAddress,
        #[indexed] status: RequestStatus,
        proposal: &ProposalsEntry<Self::Api>,
    );

    #[event("rewardsClaimed")]
    fn rewards_claimed_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        #[indexed] native_reward: &BigUint,
        token_reward: &BigUint,
    );

    #[event("requestSettled")]
    fn request_settled_event(
        &self,
        #[indexed] key_hash: &ContentHash<Self::Api>,
        #[indexed] requester: &ManagedAddress,
        native_refund: &BigUint,
    );

    #[event("votingContractDeployed")]
    fn voting_contract_deployed_event(
        &self,
        #[indexed] voting_contract: &ManagedAddress,
        #[indexed] template: &ManagedAddress,
    );

    #[event("protocolSettingsUpdated")]
    fn protocol_settings_event(
        &self,
        #[indexed] manager: &ManagedAddress,
        settings: &ProtocolSettings<Self::Api>,
    );
}
