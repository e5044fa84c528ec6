multiversx_sc::imports!();

use oracle_common::errors::ERR_NOT_DEPLOYED_VOTING;

use crate::voting_proxy;

/// Voting contracts are trusted only if this ledger deployed them.
#[multiversx_sc::module]
pub trait VotingRegistryModule:
    crate::storage::StorageModule + crate::events::EventsModule + crate::accounts::AccountsModule
{
    // ========================================================
    // ENDPOINT: deployVotingContract
    // Manager only. Clones the voting code from `template` and
    // registers the new instance.
    // ========================================================

    #[endpoint(deployVotingContract)]
    fn deploy_voting_contract(&self, template: ManagedAddress) -> ManagedAddress {
        self.require_manager();

        let main_address = self.blockchain().get_sc_address();
        let vrf_verifier = self.vrf_verifier().get();
        let voting_contract = self
            .tx()
            .typed(voting_proxy::OracleVotingProxy)
            .init(main_address, vrf_verifier)
            .from_source(template.clone())
            .code_metadata(CodeMetadata::UPGRADEABLE)
            .returns(ReturnsNewManagedAddress)
            .sync_call();

        self.voting_contracts().insert(voting_contract.clone());
        self.voting_contract_deployed_event(&voting_contract, &template);

        voting_contract
    }

    fn require_deployed_voting(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            self.voting_contracts().contains(&caller),
            ERR_NOT_DEPLOYED_VOTING
        );
    }

    #[view(isDeployedVotingContract)]
    fn is_deployed_voting_contract(&self, address: ManagedAddress) -> bool {
        self.voting_contracts().contains(&address)
    }

    #[view(getVotingContracts)]
    fn get_voting_contracts(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for address in self.voting_contracts().iter() {
            result.push(address);
        }
        result
    }
}
