//! Runs the scenario suites against a deployed network.

use crate::{
    ScenarioContext,
    result::{SuiteResult, TestOutcome, TestResult},
    suites::{Case, Suite},
};
use alloy_primitives::U256;
use eyre::Result;
use fund_me_chain::SharedChain;
use fund_me_common::errors::display_chain;
use fund_me_config::{Config, ExecutionMode};
use fund_me_deploy::Deployments;
use regex::Regex;
use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

/// Runs suites one case at a time.
///
/// In local mode the chain is reverted to its state after deployment between cases, so every case
/// starts from the freshly deployed contracts. Suites of the other mode are reported as skipped.
#[derive(Debug)]
pub struct ScenarioRunner<'a> {
    chain: SharedChain,
    config: &'a Config,
    deployments: &'a Deployments,
    mode: ExecutionMode,
    filter: Option<Regex>,
}

impl<'a> ScenarioRunner<'a> {
    /// Creates a runner for the network of `deployments`, resolving the execution mode from the
    /// configured local networks.
    pub fn new(chain: SharedChain, config: &'a Config, deployments: &'a Deployments) -> Self {
        let mode = config.local_networks().mode(deployments.network());
        Self { chain, config, deployments, mode, filter: None }
    }

    /// Only runs the cases whose full name matches `filter`.
    pub fn with_filter(mut self, filter: Option<Regex>) -> Self {
        self.filter = filter;
        self
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    fn is_selected(&self, suite: &Suite, case: &Case) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter.is_match(&suite.full_name(case)))
    }

    /// Runs `suites` in order.
    pub async fn run(&self, suites: &[Suite]) -> Result<TestOutcome> {
        info!(target: "fund_me::harness", network = %self.deployments.network(), mode = %self.mode, "running scenarios");
        let mut snapshot = if self.mode.is_local() { Some(self.chain.snapshot().await?) } else { None };

        let mut results = BTreeMap::new();
        for suite in suites {
            let cases: Vec<_> = suite.cases.iter().filter(|case| self.is_selected(suite, case)).collect();
            if cases.is_empty() {
                continue;
            }

            let start = Instant::now();
            let mut test_results = BTreeMap::new();
            for case in cases {
                let result = if suite.mode == self.mode {
                    let result = self.run_case(suite, case).await;
                    if let Some(id) = snapshot {
                        snapshot = Some(self.restore(id).await?);
                    }
                    result
                } else {
                    TestResult::skipped()
                };
                test_results.insert(case.name.to_string(), result);
            }
            results.insert(suite.name.to_string(), SuiteResult::new(start.elapsed(), test_results));
        }

        Ok(TestOutcome::new(self.deployments.network().clone(), self.mode, results))
    }

    async fn run_case(&self, suite: &Suite, case: &Case) -> TestResult {
        let start = Instant::now();
        debug!(target: "fund_me::harness", suite = suite.name, case = case.name, "running case");

        let mut ctx =
            match ScenarioContext::new(self.chain.clone(), self.config, self.deployments, self.mode) {
                Ok(ctx) => ctx,
                Err(err) => return failed("setup failed", &err, start.elapsed()),
            };

        if let Some(setup) = suite.setup {
            if let Err(err) = setup(&mut ctx).await {
                return failed("setup failed", &err, start.elapsed()).with_logs(ctx.take_logs());
            }
            ctx.gas_meter().reset();
        }

        let outcome = (case.run)(&mut ctx).await;
        let duration = start.elapsed();
        let logs = ctx.take_logs();
        match outcome {
            Ok(()) => TestResult::success(ctx.gas_meter().total(), duration, logs),
            Err(err) => {
                debug!(target: "fund_me::harness", suite = suite.name, case = case.name, %err, "case failed");
                TestResult::fail(display_chain(&err)).with_duration(duration).with_logs(logs)
            }
        }
    }

    /// Reverts to snapshot `id` and takes a new one, snapshots can only be reverted to once.
    async fn restore(&self, id: U256) -> Result<U256> {
        if !self.chain.revert_to(id).await? {
            eyre::bail!("failed to revert to snapshot {id}");
        }
        Ok(self.chain.snapshot().await?)
    }
}

fn failed(context: &str, err: &eyre::Report, duration: Duration) -> TestResult {
    TestResult::fail(format!("{context}: {}", display_chain(err))).with_duration(duration)
}
