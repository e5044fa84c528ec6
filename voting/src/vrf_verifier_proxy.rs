use multiversx_sc::proxy_imports::*;

/// External co-verifier that checks a VRF proof against a round seed and
/// the prover's participation key.
pub struct VrfVerifierProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for VrfVerifierProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = VrfVerifierProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        VrfVerifierProxyMethods { wrapped_tx: tx }
    }
}

pub struct VrfVerifierProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> VrfVerifierProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn verify_vrf<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg2: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg3: ProxyArg<ManagedBuffer<Env::Api>>,
    >(
        self,
        participation_key: Arg0,
        seed: Arg1,
        vrf_proof: Arg2,
        vrf_result: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("verifyVrf")
            .argument(&participation_key)
            .argument(&seed)
            .argument(&vrf_proof)
            .argument(&vrf_result)
            .original_result()
    }
}
