// Tests for the state the voting authority owns by itself.
//
// The whitebox_legacy harness does not run cross-contract calls, so the
// main ledger is a plain account here. Votes, registration and expiry
// against a deployed ledger are covered in oracle_round_test.rs.

#![allow(deprecated)]

use multiversx_sc::types::{Address, ManagedByteArray};
use multiversx_sc_scenario::{
    api::DebugApi, managed_address, managed_biguint, managed_buffer, rust_biguint,
    whitebox_legacy::*,
};

use oracle_common::errors::*;
use oracle_common::records::{Destination, ProposalsEntry};
use oracle_voting::registration::RegistrationModule;
use oracle_voting::rounds::RoundsModule;
use oracle_voting::storage::StorageModule;
use oracle_voting::OracleVoting;

const WASM_PATH: &str = "output/oracle-voting.wasm";
const CONTRACT_BALANCE: u64 = 1_000_000;

type VotingContract = oracle_voting::ContractObj<DebugApi>;

struct VotingSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> VotingContract,
{
    b_mock: BlockchainStateWrapper,
    main_ledger: Address,
    verifier: Address,
    voter: Address,
    voting: ContractObjWrapper<VotingContract, Builder>,
}

impl<Builder> VotingSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> VotingContract,
{
    fn new(builder: Builder) -> Self {
        let mut b_mock = BlockchainStateWrapper::new();
        let main_ledger = b_mock.create_user_account(&rust_biguint!(0));
        let verifier = b_mock.create_user_account(&rust_biguint!(0));
        let voter = b_mock.create_user_account(&rust_biguint!(0));
        let voting = b_mock.create_sc_account(
            &rust_biguint!(CONTRACT_BALANCE),
            Some(&main_ledger),
            builder,
            WASM_PATH,
        );

        b_mock
            .execute_tx(&main_ledger, &voting, &rust_biguint!(0), |sc| {
                sc.init(managed_address!(&main_ledger), managed_address!(&verifier));
            })
            .assert_ok();

        VotingSetup {
            b_mock,
            main_ledger,
            verifier,
            voter,
            voting,
        }
    }

    fn store_proposal(&mut self, hash_byte: u8, vote_round: u64, voting_round: u64) {
        let voter = self.voter.clone();
        self.b_mock
            .execute_tx(&self.main_ledger, &self.voting, &rust_biguint!(0), |sc| {
                let vote_hash = ManagedByteArray::new_from_bytes(&[hash_byte; 32]);
                sc.proposals(&vote_hash).set(ProposalsEntry {
                    vote_hash: vote_hash.clone(),
                    vote_count: 42,
                    stake_count: 1_000,
                    vote_round,
                    rewards_paid_out: 0,
                    requester: managed_address!(&voter),
                });
                sc.voting_round().set(voting_round);
            })
            .assert_ok();
    }
}

#[test]
fn test_contract_builds() {
    let _: fn() -> VotingContract = oracle_voting::contract_obj;
}

#[test]
fn test_init_records_ledger_and_verifier() {
    let mut setup = VotingSetup::new(oracle_voting::contract_obj);
    let main_ledger = setup.main_ledger.clone();
    let verifier = setup.verifier.clone();

    setup
        .b_mock
        .execute_query(&setup.voting, |sc| {
            assert_eq!(sc.get_main_address(), managed_address!(&main_ledger));
            assert_eq!(sc.vrf_verifier().get(), managed_address!(&verifier));
            assert_eq!(sc.get_voting_round(), 0);
            assert!(sc.get_current_request().into_option().is_none());
        })
        .assert_ok();
}

#[test]
fn test_delete_proposal_from_closed_round() {
    let mut setup = VotingSetup::new(oracle_voting::contract_obj);
    let voter = setup.voter.clone();
    setup.store_proposal(1, 1, 2);

    setup
        .b_mock
        .execute_tx(&voter, &setup.voting, &rust_biguint!(0), |sc| {
            sc.delete_proposal(ManagedByteArray::new_from_bytes(&[1u8; 32]));
        })
        .assert_ok();

    setup
        .b_mock
        .execute_query(&setup.voting, |sc| {
            let vote_hash = ManagedByteArray::new_from_bytes(&[1u8; 32]);
            assert!(sc.proposals(&vote_hash).is_empty());
            assert!(sc.get_proposal(vote_hash).into_option().is_none());
        })
        .assert_ok();

    setup
        .b_mock
        .execute_tx(&voter, &setup.voting, &rust_biguint!(0), |sc| {
            sc.delete_proposal(ManagedByteArray::new_from_bytes(&[1u8; 32]));
        })
        .assert_user_error(ERR_PROPOSAL_NOT_FOUND);
}

#[test]
fn test_delete_proposal_in_active_round_fails() {
    let mut setup = VotingSetup::new(oracle_voting::contract_obj);
    let voter = setup.voter.clone();
    setup.store_proposal(2, 3, 3);

    setup
        .b_mock
        .execute_tx(&voter, &setup.voting, &rust_biguint!(0), |sc| {
            sc.delete_proposal(ManagedByteArray::new_from_bytes(&[2u8; 32]));
        })
        .assert_user_error(ERR_VOTE_ROUND_ACTIVE);
}

#[test]
fn test_expire_without_current_request_fails() {
    let mut setup = VotingSetup::new(oracle_voting::contract_obj);
    let voter = setup.voter.clone();

    setup
        .b_mock
        .execute_tx(&voter, &setup.voting, &rust_biguint!(0), |sc| {
            sc.expire_current_request();
        })
        .assert_user_error(ERR_NO_CURRENT_REQUEST);
}

#[test]
fn test_rent_refund_withdrawal() {
    let mut setup = VotingSetup::new(oracle_voting::contract_obj);
    let voter = setup.voter.clone();

    setup
        .b_mock
        .execute_tx(&voter, &setup.voting, &rust_biguint!(0), |sc| {
            sc.withdraw_rent_refund();
        })
        .assert_user_error(ERR_NOTHING_TO_WITHDRAW);

    setup
        .b_mock
        .execute_tx(&voter, &setup.voting, &rust_biguint!(0), |sc| {
            sc.rent_refunds(&managed_address!(&voter))
                .set(managed_biguint!(117_300));
            sc.withdraw_rent_refund();
        })
        .assert_ok();

    setup.b_mock.check_egld_balance(&voter, &rust_biguint!(117_300));
    setup
        .b_mock
        .execute_query(&setup.voting, |sc| {
            assert_eq!(sc.get_rent_refund(managed_address!(&voter)), managed_biguint!(0));
        })
        .assert_ok();
}

#[test]
fn test_vrf_draw_reads_big_endian_head() {
    let mut setup = VotingSetup::new(oracle_voting::contract_obj);

    setup
        .b_mock
        .execute_query(&setup.voting, |sc| {
            let draw = sc.vrf_draw(&managed_buffer!(&[0x80u8, 0, 0, 0, 0, 0, 0, 1, 0xff, 0xff]));
            assert_eq!(draw, (1u64 << 63) + 1);
        })
        .assert_ok();

    setup
        .b_mock
        .execute_query(&setup.voting, |sc| {
            sc.vrf_draw(&managed_buffer!(b"short"));
        })
        .assert_user_error(ERR_VRF_RESULT_TOO_SHORT);
}

#[test]
fn test_vote_hash_binds_destination_and_requester() {
    let mut setup = VotingSetup::new(oracle_voting::contract_obj);
    let voter = setup.voter.clone();
    let main_ledger = setup.main_ledger.clone();

    setup
        .b_mock
        .execute_query(&setup.voting, |sc| {
            let body = managed_buffer!(b"42000");
            let destination = Destination {
                contract: managed_address!(&main_ledger),
                method: managed_buffer!(b"receivePrice"),
            };
            let other_method = Destination {
                contract: managed_address!(&main_ledger),
                method: managed_buffer!(b"receiveOther"),
            };

            let hash = sc.vote_hash(&body, &destination, &managed_address!(&voter));
            assert_eq!(hash, sc.vote_hash(&body, &destination, &managed_address!(&voter)));
            assert_ne!(hash, sc.vote_hash(&body, &other_method, &managed_address!(&voter)));
            assert_ne!(hash, sc.vote_hash(&body, &destination, &managed_address!(&main_ledger)));
        })
        .assert_ok();
}
