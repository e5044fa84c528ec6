multiversx_sc::imports!();

use oracle_common::records::{ContentHash, ProposalsEntry, RequestInfo, RequestStatus, VoterRecord};
use oracle_common::settings::{ProtocolSettings, VoterContext};

use crate::main_proxy;

/// Calls into the main ledger that deployed this contract.
#[multiversx_sc::module]
pub trait LedgerModule: crate::storage::StorageModule {
    fn main_settings(&self) -> ProtocolSettings<Self::Api> {
        self.tx()
            .to(&self.main_address().get())
            .typed(main_proxy::OracleMainProxy)
            .get_protocol_settings()
            .returns(ReturnsResult)
            .sync_call()
    }

    fn voter_context(&self, primary_account: &ManagedAddress, round: u64) -> VoterContext<Self::Api> {
        self.tx()
            .to(&self.main_address().get())
            .typed(main_proxy::OracleMainProxy)
            .get_voter_context(primary_account.clone(), round)
            .returns(ReturnsResult)
            .sync_call()
    }

    fn update_main_request_status(
        &self,
        key_hash: &ContentHash<Self::Api>,
        new_status: RequestStatus,
        requester: &ManagedAddress,
        proposal: &ProposalsEntry<Self::Api>,
    ) -> RequestInfo<Self::Api> {
        self.tx()
            .to(&self.main_address().get())
            .typed(main_proxy::OracleMainProxy)
            .update_request_status(
                key_hash.clone(),
                new_status,
                requester.clone(),
                proposal.clone(),
            )
            .returns(ReturnsResult)
            .sync_call()
    }

    fn claim_main_rewards(&self, primary_account: &ManagedAddress, previous_vote: &VoterRecord<Self::Api>) {
        self.tx()
            .to(&self.main_address().get())
            .typed(main_proxy::OracleMainProxy)
            .claim_rewards(
                primary_account.clone(),
                previous_vote.clone(),
                previous_vote.proposal.requester.clone(),
            )
            .sync_call();
    }

    fn claim_main_rewards_from_vote(
        &self,
        primary_account: &ManagedAddress,
        previous_vote: &VoterRecord<Self::Api>,
        key_hash: &ContentHash<Self::Api>,
        vote_count: u64,
    ) {
        self.tx()
            .to(&self.main_address().get())
            .typed(main_proxy::OracleMainProxy)
            .claim_rewards_from_vote(
                primary_account.clone(),
                previous_vote.clone(),
                key_hash.clone(),
                vote_count,
            )
            .sync_call();
    }
}
