use crate::init_tracing;
use alloy_primitives::{Address, I256, U256};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::{SolCall, SolConstructor};
use fund_me_chain::{Chain, ChainError, ContractArtifact, Devnet, DevnetConfig};
use fund_me_common::{
    RevertReason,
    abi::{FundMe, MockV3Aggregator, names},
    units::ether,
};

async fn setup() -> (Devnet, Address) {
    init_tracing();
    let devnet = Devnet::new(DevnetConfig::dev().unwrap());
    let deployer = devnet.account(0).unwrap();
    let args = MockV3Aggregator::constructorCall {
        _decimals: 8,
        _initialAnswer: "200000000000".parse::<I256>().unwrap(),
    }
    .abi_encode();
    let feed = devnet
        .deploy(deployer, &ContractArtifact::native(names::MOCK_V3_AGGREGATOR), args.into(), 1)
        .await
        .unwrap()
        .contract_address
        .unwrap();
    let args = FundMe::constructorCall { priceFeed: feed }.abi_encode();
    let fund_me = devnet
        .deploy(deployer, &ContractArtifact::native(names::FUND_ME), args.into(), 1)
        .await
        .unwrap()
        .contract_address
        .unwrap();
    (devnet, fund_me)
}

fn fund(from: Address, fund_me: Address, value: U256) -> TransactionRequest {
    TransactionRequest::default()
        .from(from)
        .to(fund_me)
        .value(value)
        .input(FundMe::fundCall {}.abi_encode().into())
}

async fn amount_funded(devnet: &Devnet, fund_me: Address, funder: Address) -> U256 {
    let call = FundMe::getAddressToAmountFundedCall { fundingAddress: funder };
    let data =
        devnet.call(TransactionRequest::default().to(fund_me).input(call.abi_encode().into())).await.unwrap();
    FundMe::getAddressToAmountFundedCall::abi_decode_returns(&data).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn many_funders_withdraw() {
    let (devnet, fund_me) = setup().await;
    let owner = devnet.account(0).unwrap();
    let value = ether("1").unwrap();
    for funder in &devnet.accounts()[1..6] {
        devnet.send(fund(*funder, fund_me, value), 1).await.unwrap();
    }
    assert_eq!(devnet.balance(fund_me).await.unwrap(), ether("5").unwrap());

    let owner_before = devnet.balance(owner).await.unwrap();
    let withdraw = TransactionRequest::default()
        .from(owner)
        .to(fund_me)
        .input(FundMe::cheaperWithdrawCall {}.abi_encode().into());
    let receipt = devnet.send(withdraw, 1).await.unwrap();

    assert_eq!(devnet.balance(fund_me).await.unwrap(), U256::ZERO);
    assert_eq!(
        devnet.balance(owner).await.unwrap() + receipt.gas_cost(),
        owner_before + ether("5").unwrap()
    );
    for funder in &devnet.accounts()[1..6] {
        assert_eq!(amount_funded(&devnet, fund_me, *funder).await, U256::ZERO);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn only_owner_withdraws() {
    let (devnet, fund_me) = setup().await;
    let attacker = devnet.account(1).unwrap();
    devnet.send(fund(attacker, fund_me, ether("1").unwrap()), 1).await.unwrap();
    let withdraw = TransactionRequest::default()
        .from(attacker)
        .to(fund_me)
        .input(FundMe::withdrawCall {}.abi_encode().into());
    let err = devnet.send(withdraw, 1).await.unwrap_err();
    assert_eq!(err.revert_reason().unwrap().custom_error(), Some("FundMe__NotOwner"));
    assert_eq!(devnet.balance(fund_me).await.unwrap(), ether("1").unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_small_contributions() {
    let (devnet, fund_me) = setup().await;
    let funder = devnet.account(1).unwrap();
    let before = devnet.block_number().await.unwrap();
    let err = devnet.send(fund(funder, fund_me, U256::ZERO), 1).await.unwrap_err();
    let ChainError::Revert(_) = &err else { panic!("expected revert, got {err}") };
    assert_eq!(
        err.revert_reason(),
        Some(RevertReason::Message("You need to spend more ETH!".to_string()))
    );
    // rejected transactions are not mined
    assert_eq!(devnet.block_number().await.unwrap(), before);
}

#[tokio::test(flavor = "multi_thread")]
async fn snapshots_isolate_scenarios() {
    let (devnet, fund_me) = setup().await;
    let funder = devnet.account(1).unwrap();
    let id = devnet.snapshot().await.unwrap();

    devnet.send(fund(funder, fund_me, ether("1").unwrap()), 1).await.unwrap();
    assert_eq!(amount_funded(&devnet, fund_me, funder).await, ether("1").unwrap());

    assert!(devnet.revert_to(id).await.unwrap());
    assert_eq!(amount_funded(&devnet, fund_me, funder).await, U256::ZERO);
    assert_eq!(devnet.balance(funder).await.unwrap(), ether("10000").unwrap());
    // a snapshot can only be reverted to once
    assert!(!devnet.revert_to(id).await.unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_account() {
    init_tracing();
    let devnet = Devnet::new(DevnetConfig::dev().unwrap());
    assert!(matches!(devnet.account(10), Err(ChainError::MissingAccount(10))));
}
