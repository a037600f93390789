use crate::init_tracing;
use alloy_primitives::U256;
use fund_me::{
    cmd::{deploy::DeployArgs, fund::FundArgs, test::TestArgs, withdraw::WithdrawArgs},
    opts::NetworkArgs,
};
use fund_me_config::Config;
use regex::Regex;
use std::{fs, path::Path};

/// A project at a fresh temp dir, with a `fork` network that runs in-process but isn't a
/// development chain.
fn project() -> tempfile::TempDir {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    fs::write(
        root.path().join(Config::FILE_NAME),
        r#"
[profile.default.networks.fork]
chain_id = 31337
"#,
    )
    .unwrap();
    root
}

fn network(root: &Path, name: Option<&str>) -> NetworkArgs {
    NetworkArgs { network: name.map(str::to_string), root: Some(root.to_path_buf()) }
}

fn test_args(root: &Path, name: Option<&str>) -> TestArgs {
    TestArgs {
        match_test: None,
        allow_failure: false,
        json: true,
        summary: false,
        network: network(root, name),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn deploys_on_the_default_network() {
    let root = project();
    let args = DeployArgs { tags: vec![], network: network(root.path(), None) };
    let deployments = args.run().await.unwrap();

    assert_eq!(deployments.network().name, "hardhat");
    assert!(deployments.get("MockV3Aggregator").is_some());
    assert!(deployments.get("FundMe").is_some());
    // in-process deployments are not persisted
    assert!(deployments.dir().is_none());
    assert!(!root.path().join("deployments").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn deploys_tagged_steps() {
    let root = project();
    let args = DeployArgs { tags: vec!["mocks".to_string()], network: network(root.path(), None) };
    let deployments = args.run().await.unwrap();

    assert!(deployments.get("MockV3Aggregator").is_some());
    assert!(deployments.get("FundMe").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn tests_local_network() {
    let root = project();
    let run = test_args(root.path(), None).run().await.unwrap();

    assert!(run.outcome.is_ok());
    assert_eq!(run.outcome.successes().count(), 7);
    assert_eq!(run.outcome.skips().count(), 1);
    run.ensure_ok().unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn tests_staging_network() {
    let root = project();
    let run = test_args(root.path(), Some("fork")).run().await.unwrap();

    assert!(run.outcome.is_ok());
    assert_eq!(run.outcome.successes().count(), 1);
    assert_eq!(run.outcome.results["FundMe Staging Tests"].successes().count(), 1);
    assert_eq!(run.outcome.skips().count(), 7);
}

#[tokio::test(flavor = "multi_thread")]
async fn filters_tests() {
    let root = project();
    let mut args = test_args(root.path(), None);
    args.match_test = Some(Regex::new("Adds funder").unwrap());
    let run = args.run().await.unwrap();
    assert_eq!(run.outcome.tests().count(), 1);

    let mut args = test_args(root.path(), None);
    args.match_test = Some(Regex::new("no such case").unwrap());
    let err = args.run().await.unwrap_err();
    assert!(err.to_string().contains("no tests match"), "{err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn funds_and_withdraws() {
    let root = project();
    let value = U256::from(100_000_000_000_000_000u64);
    let receipt = FundArgs { value, network: network(root.path(), None) }.run().await.unwrap();
    assert!(receipt.status);
    assert!(receipt.gas_used > 0);

    let receipt = WithdrawArgs { network: network(root.path(), None) }.run().await.unwrap();
    assert!(receipt.status);
}

#[tokio::test(flavor = "multi_thread")]
async fn funding_below_minimum_fails() {
    let root = project();
    let args = FundArgs { value: U256::from(1), network: network(root.path(), None) };
    let err = args.run().await.unwrap_err();
    assert!(err.to_string().contains("You need to spend more ETH!"), "{err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_network() {
    let root = project();
    let err = test_args(root.path(), Some("mainnet")).run().await.unwrap_err();
    assert!(err.to_string().contains("mainnet"), "{err}");
}
