use multiversx_sc::proxy_imports::*;

use oracle_common::records::{ContentHash, ProposalsEntry, RequestInfo, RequestStatus, VoterRecord};
use oracle_common::settings::{ProtocolSettings, VoterContext};

pub struct OracleMainProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for OracleMainProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = OracleMainProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        OracleMainProxyMethods { wrapped_tx: tx }
    }
}

pub struct OracleMainProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> OracleMainProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn get_protocol_settings(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ProtocolSettings<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getProtocolSettings")
            .original_result()
    }

    pub fn get_voter_context<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<u64>,
    >(
        self,
        account: Arg0,
        round: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, VoterContext<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getVoterContext")
            .argument(&account)
            .argument(&round)
            .original_result()
    }

    pub fn update_request_status<
        Arg0: ProxyArg<ContentHash<Env::Api>>,
        Arg1: ProxyArg<RequestStatus>,
        Arg2: ProxyArg<ManagedAddress<Env::Api>>,
        Arg3: ProxyArg<ProposalsEntry<Env::Api>>,
    >(
        self,
        key_hash: Arg0,
        new_status: Arg1,
        requester: Arg2,
        proposal: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, RequestInfo<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("updateRequestStatus")
            .argument(&key_hash)
            .argument(&new_status)
            .argument(&requester)
            .argument(&proposal)
            .original_result()
    }

    pub fn claim_rewards<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<VoterRecord<Env::Api>>,
        Arg2: ProxyArg<ManagedAddress<Env::Api>>,
    >(
        self,
        rewards_account: Arg0,
        previous_vote: Arg1,
        previous_requester: Arg2,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("claimRewards")
            .argument(&rewards_account)
            .argument(&previous_vote)
            .argument(&previous_requester)
            .original_result()
    }

    pub fn claim_rewards_from_vote<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<VoterRecord<Env::Api>>,
        Arg2: ProxyArg<ContentHash<Env::Api>>,
        Arg3: ProxyArg<u64>,
    >(
        self,
        voter: Arg0,
        previous_vote: Arg1,
        key_hash: Arg2,
        vote_count: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("claimRewardsFromVote")
            .argument(&voter)
            .argument(&previous_vote)
            .argument(&key_hash)
            .argument(&vote_count)
            .original_result()
    }
}
