use crate::init_tracing;
use alloy_primitives::{Address, address};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use fund_me_chain::{Chain, Devnet, DevnetConfig};
use fund_me_common::abi::{FundMe, MockV3Aggregator, names};
use fund_me_config::{Config, NetworkConfig, NetworkDescriptor};
use fund_me_deploy::{
    DeployContext, DeployStep, DeploymentError, Deployments, run_steps,
    steps::{DECIMALS, INITIAL_PRICE},
};
use similar_asserts::assert_eq;

const SEPOLIA_FEED: Address = address!("694AA1769357215DE4FAC081bf1f309aDC325306");

fn config(root: &std::path::Path) -> Config {
    let mut config = Config::with_root(root);
    config.networks.insert(
        "sepolia".to_string(),
        NetworkConfig {
            chain_id: Some(11155111),
            eth_usd_price_feed: Some(SEPOLIA_FEED),
            block_confirmations: 6,
            ..NetworkConfig::hardhat()
        },
    );
    config
}

async fn view<C: SolCall>(chain: &dyn Chain, to: Address, call: C) -> C::Return {
    let data = chain.call(TransactionRequest::default().to(to).input(call.abi_encode().into())).await.unwrap();
    C::abi_decode_returns(&data).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn deploys_mocks_and_fund_me_locally() {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let devnet = Devnet::new(DevnetConfig::dev().unwrap());
    let mut ctx = DeployContext::new(&config, "hardhat", &devnet).unwrap();
    ctx.deployments = Deployments::in_memory(ctx.descriptor().clone()).quiet(true);

    let ran = run_steps(&mut ctx, &["all"]).await.unwrap();
    assert_eq!(ran, DeployStep::ALL.to_vec());

    let mock = ctx.deployments.get_or_err(names::MOCK_V3_AGGREGATOR).unwrap().address;
    let fund_me = ctx.deployments.get_or_err(names::FUND_ME).unwrap();
    assert_eq!(fund_me.deployer, devnet.accounts()[0]);
    assert_eq!(view(&devnet, fund_me.address, FundMe::getPriceFeedCall {}).await, mock);
    assert_eq!(view(&devnet, mock, MockV3Aggregator::decimalsCall {}).await, DECIMALS);
    assert_eq!(view(&devnet, mock, MockV3Aggregator::latestAnswerCall {}).await, INITIAL_PRICE);

    let logs = ctx.deployments.logs();
    assert_eq!(logs[0].as_str(), "Local network detected! Deploying mocks...");
    assert!(logs[1].starts_with("deploying \"MockV3Aggregator\" (tx: 0x"), "{}", logs[1]);
    assert!(logs[1].ends_with(" gas"), "{}", logs[1]);
    assert_eq!(logs[2].as_str(), "Mocks Deployed!");
    assert_eq!(logs[3], "-".repeat(48));
}

#[tokio::test(flavor = "multi_thread")]
async fn mocks_are_skipped_off_the_local_chain() {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let devnet = Devnet::new(DevnetConfig::dev().unwrap().with_chain_id(11155111));
    let mut ctx = DeployContext::new(&config, "sepolia", &devnet).unwrap();
    ctx.deployments = Deployments::in_memory(ctx.descriptor().clone()).quiet(true);

    run_steps(&mut ctx, &["mocks"]).await.unwrap();
    assert!(ctx.deployments.all().is_empty());
    assert!(ctx.deployments.logs().is_empty());
    assert_eq!(devnet.best_number(), 0);

    // FundMe uses the configured feed
    run_steps(&mut ctx, &["fundme"]).await.unwrap();
    let fund_me = ctx.deployments.get_or_err(names::FUND_ME).unwrap().address;
    assert_eq!(view(&devnet, fund_me, FundMe::getPriceFeedCall {}).await, SEPOLIA_FEED);
    // waited for the configured confirmations
    assert_eq!(devnet.best_number(), 6);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_price_feed() {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let mut config = config(root.path());
    config.networks.get_mut("sepolia").unwrap().eth_usd_price_feed = None;
    let devnet = Devnet::new(DevnetConfig::dev().unwrap().with_chain_id(11155111));
    let mut ctx = DeployContext::new(&config, "sepolia", &devnet).unwrap();
    ctx.deployments = Deployments::in_memory(ctx.descriptor().clone()).quiet(true);

    let err = run_steps(&mut ctx, &["all"]).await.unwrap_err();
    assert!(matches!(err, DeploymentError::MissingPriceFeed(name) if name == "sepolia"));
}

#[tokio::test(flavor = "multi_thread")]
async fn fund_me_needs_the_mock_locally() {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let devnet = Devnet::new(DevnetConfig::dev().unwrap());
    let mut ctx = DeployContext::new(&config, "hardhat", &devnet).unwrap();
    ctx.deployments = Deployments::in_memory(ctx.descriptor().clone()).quiet(true);

    let err = run_steps(&mut ctx, &["fundme"]).await.unwrap_err();
    assert!(matches!(err, DeploymentError::NotFound(name) if name == names::MOCK_V3_AGGREGATOR));
}

#[tokio::test(flavor = "multi_thread")]
async fn reuses_stored_deployments() {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let devnet = Devnet::new(DevnetConfig::dev().unwrap());
    let descriptor = NetworkDescriptor::new("localhost", devnet.chain_id());

    let mut ctx = DeployContext::new(&config, "localhost", &devnet).unwrap();
    ctx.deployments = Deployments::open(config.deployments_dir(), descriptor.clone()).unwrap().quiet(true);
    run_steps(&mut ctx, &[] as &[&str]).await.unwrap();
    let first = ctx.deployments.all().clone();
    let block = devnet.best_number();

    let mut ctx = DeployContext::new(&config, "localhost", &devnet).unwrap();
    ctx.deployments = Deployments::open(config.deployments_dir(), descriptor).unwrap().quiet(true);
    assert_eq!(ctx.deployments.all(), &first);
    run_steps(&mut ctx, &["all"]).await.unwrap();
    assert_eq!(ctx.deployments.all(), &first);
    assert_eq!(devnet.best_number(), block);
    assert!(ctx.deployments.logs().iter().any(|log| log.starts_with("reusing \"FundMe\" at 0x")));

    // a fresh chain has no code at the stored address, so the contracts are deployed again
    let fresh = Devnet::new(DevnetConfig::dev().unwrap());
    fresh.mine(3);
    let mut ctx = DeployContext::new(&config, "localhost", &fresh).unwrap();
    ctx.deployments =
        Deployments::open(config.deployments_dir(), NetworkDescriptor::new("localhost", 31337)).unwrap().quiet(true);
    run_steps(&mut ctx, &["mocks"]).await.unwrap();
    assert_eq!(fresh.best_number(), 4);
    assert_ne!(
        ctx.deployments.get(names::MOCK_V3_AGGREGATOR).unwrap().block_number,
        first[names::MOCK_V3_AGGREGATOR].block_number
    );
}
