use crate::scenarios::{Setup, setup};
use alloy_primitives::{I256, U256};
use fund_me_chain::Chain;
use fund_me_common::units::ether;
use fund_me_deploy::steps::{DECIMALS, INITIAL_PRICE};
use fund_me_harness::{FundMeHandle, GasMeter, MockV3AggregatorHandle, expect::expect_custom_error};

#[tokio::test(flavor = "multi_thread")]
async fn reads_deployed_contracts() {
    let Setup { chain, deployments, .. } = setup("hardhat", &["all"]).await;
    let deployer = chain.account(0).unwrap();
    let fund_me = FundMeHandle::resolve(chain.clone(), &deployments, deployer).unwrap();
    let mock = MockV3AggregatorHandle::resolve(chain.clone(), &deployments, deployer).unwrap();

    assert_eq!(fund_me.get_owner().await.unwrap(), deployer);
    assert_eq!(fund_me.get_price_feed().await.unwrap(), mock.address());
    assert_eq!(fund_me.get_version().await.unwrap(), U256::from(4));
    assert_eq!(fund_me.minimum_usd().await.unwrap(), ether("5").unwrap());
    assert_eq!(mock.decimals().await.unwrap(), DECIMALS);
    assert_eq!(mock.latest_answer().await.unwrap(), INITIAL_PRICE);
}

#[tokio::test(flavor = "multi_thread")]
async fn price_updates_and_cheaper_withdraw() {
    let Setup { chain, deployments, .. } = setup("hardhat", &["all"]).await;
    let deployer = chain.account(0).unwrap();
    let gas = GasMeter::default();
    let fund_me =
        FundMeHandle::resolve(chain.clone(), &deployments, deployer).unwrap().with_gas_meter(gas.clone());
    let mock = MockV3AggregatorHandle::resolve(chain.clone(), &deployments, deployer).unwrap();

    // 0.0025 ETH is 5 USD at the initial 2000 USD/ETH, but not at 1000 USD/ETH
    let value = ether("0.0025").unwrap();
    let alice = chain.account(1).unwrap();
    let funder = fund_me.connect(alice);
    funder.fund(value).await.unwrap();
    let half = I256::from_raw(U256::from(100_000_000_000u64));
    mock.connect(chain.account(2).unwrap()).update_answer(half).await.unwrap();
    assert_eq!(mock.latest_answer().await.unwrap(), half);
    assert!(funder.fund(value).await.is_err());

    expect_custom_error(funder.cheaper_withdraw().await, "FundMe__NotOwner").unwrap();
    fund_me.cheaper_withdraw().await.unwrap();
    assert_eq!(fund_me.balance().await.unwrap(), U256::ZERO);
    assert_eq!(fund_me.get_address_to_amount_funded(alice).await.unwrap(), U256::ZERO);
    // connected handles share the meter, the mock's isn't metered
    assert!(gas.total() > 0);
}
