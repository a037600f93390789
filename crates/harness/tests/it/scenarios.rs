use crate::init_tracing;
use alloy_primitives::U256;
use fund_me_chain::{Chain, Devnet, DevnetConfig, SharedChain};
use fund_me_common::abi::names;
use fund_me_config::{Config, ExecutionMode, NetworkConfig};
use fund_me_deploy::{DeployContext, Deployments, run_steps};
use fund_me_harness::{ScenarioRunner, TestStatus, suites};
use regex::Regex;
use std::sync::Arc;

pub(crate) struct Setup {
    pub devnet: Devnet,
    pub chain: SharedChain,
    pub config: Config,
    pub deployments: Deployments,
    _root: tempfile::TempDir,
}

/// Runs the deploy steps selected by `tags` on a fresh devnet, as network `network`.
pub(crate) async fn setup(network: &str, tags: &[&str]) -> Setup {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let mut config = Config::with_root(root.path());
    config.networks.insert("fork".to_string(), NetworkConfig::hardhat());

    let devnet = Devnet::new(DevnetConfig::dev().unwrap());
    let chain: SharedChain = Arc::new(devnet.clone());
    let deployments = {
        let mut ctx = DeployContext::new(&config, network, chain.as_ref()).unwrap();
        ctx.deployments = Deployments::in_memory(ctx.descriptor().clone()).quiet(true);
        run_steps(&mut ctx, tags).await.unwrap();
        ctx.deployments
    };
    Setup { devnet, chain, config, deployments, _root: root }
}

#[tokio::test(flavor = "multi_thread")]
async fn runs_local_tree() {
    let Setup { devnet, chain, config, deployments, .. } = setup("hardhat", &["all"]).await;
    let fund_me = deployments.get_or_err(names::FUND_ME).unwrap().address;
    let deployed_at = devnet.best_number();

    let runner = ScenarioRunner::new(chain.clone(), &config, &deployments);
    assert_eq!(runner.mode(), ExecutionMode::Local);
    let outcome = runner.run(suites::ALL).await.unwrap();

    for (name, result) in outcome.failures() {
        panic!("{name} failed: {:?}", result.reason);
    }
    assert!(outcome.is_ok());
    assert_eq!(outcome.successes().count(), 7);
    assert_eq!(outcome.skips().count(), 1);
    assert!(outcome.results["FundMe Staging Tests"].skips().count() == 1);

    let withdraw = &outcome.results["FundMe withdraw"].test_results;
    assert_eq!(
        withdraw.keys().map(String::as_str).collect::<Vec<_>>(),
        [
            "Only allows the owner to withdraw",
            "is allows us to withdraw with multiple funders",
            "withdraws ETH from a single funder",
        ]
    );

    let fund = &outcome.results["FundMe fund"].test_results;
    // rejected transactions are not charged
    assert_eq!(fund["Fails if you don't send enough ETH"].gas_used, 0);
    assert!(fund["Updates the amount funded data structure"].gas_used > 0);

    // every case ran against the freshly deployed contracts, and the chain is back there
    assert_eq!(devnet.best_number(), deployed_at);
    assert_eq!(chain.balance(fund_me).await.unwrap(), U256::ZERO);
}

#[tokio::test(flavor = "multi_thread")]
async fn filters_cases() {
    let Setup { chain, config, deployments, .. } = setup("hardhat", &[]).await;
    let runner = ScenarioRunner::new(chain, &config, &deployments)
        .with_filter(Some(Regex::new("withdraw").unwrap()));
    let outcome = runner.run(suites::ALL).await.unwrap();

    assert_eq!(
        outcome.results.keys().map(String::as_str).collect::<Vec<_>>(),
        ["FundMe Staging Tests", "FundMe withdraw"]
    );
    assert_eq!(outcome.results["FundMe withdraw"].successes().count(), 3);
    assert_eq!(outcome.results["FundMe Staging Tests"].skips().count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn runs_staging_scenario_off_local_networks() {
    let Setup { chain, config, deployments, .. } = setup("fork", &["all"]).await;
    let runner = ScenarioRunner::new(chain, &config, &deployments);
    assert_eq!(runner.mode(), ExecutionMode::Staging);
    let outcome = runner.run(suites::ALL).await.unwrap();

    assert_eq!(outcome.skips().count(), 7);
    let staging = &outcome.results["FundMe Staging Tests"].test_results["allows people to fund and withdraw"];
    assert_eq!(staging.status, TestStatus::Success, "{:?}", staging.reason);
    assert_eq!(staging.logs, ["0 should equal 0, running assert equal...".to_string()]);
    assert!(staging.gas_used > 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_deployment_fails_cases() {
    let Setup { chain, config, deployments, .. } = setup("hardhat", &["mocks"]).await;
    let outcome = ScenarioRunner::new(chain, &config, &deployments).run(suites::ALL).await.unwrap();

    assert!(!outcome.is_ok());
    assert_eq!(outcome.failures().count(), 7);
    for (_, result) in outcome.failures() {
        let reason = result.reason.as_deref().unwrap();
        assert!(reason.starts_with("setup failed: no deployment named `FundMe`"), "{reason}");
    }
}
