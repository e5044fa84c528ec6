#![no_std]

multiversx_sc::imports!();

/// Stands in for the two external parties of a voting round in tests: the
/// VRF co-verifier and the destination contract receiving the answer.
#[multiversx_sc::contract]
pub trait OracleTestPeer {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // VRF co-verifier
    // Accepts every proof except the ones marked as rejected.
    // ========================================================

    #[endpoint(verifyVrf)]
    fn verify_vrf(
        &self,
        _participation_key: ManagedAddress,
        _seed: ManagedBuffer,
        vrf_proof: ManagedBuffer,
        _vrf_result: ManagedBuffer,
    ) -> bool {
        !self.rejected_proofs().contains(&vrf_proof)
    }

    #[endpoint(rejectProof)]
    fn reject_proof(&self, vrf_proof: ManagedBuffer) {
        self.rejected_proofs().insert(vrf_proof);
    }

    // ========================================================
    // Destination
    // ========================================================

    #[endpoint(receivePrice)]
    fn receive_price(&self, response_type: u64, response_body: ManagedBuffer) {
        self.last_response_type().set(response_type);
        self.deliveries().push(&response_body);
    }

    #[storage_mapper("rejectedProofs")]
    fn rejected_proofs(&self) -> UnorderedSetMapper<ManagedBuffer>;

    #[storage_mapper("lastResponseType")]
    fn last_response_type(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("deliveries")]
    fn deliveries(&self) -> VecMapper<ManagedBuffer>;
}
