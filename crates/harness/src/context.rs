//! The state a scenario case runs with.

use crate::contract::{FundMeHandle, GasMeter, MockV3AggregatorHandle};
use alloy_primitives::{Address, U256};
use eyre::{OptionExt, Result};
use fund_me_chain::{Chain, SharedChain};
use fund_me_config::{Config, ExecutionMode, NetworkDescriptor};
use fund_me_deploy::Deployments;

/// Contract handles and accounts of one case, built fresh before every case.
#[derive(Debug)]
pub struct ScenarioContext {
    pub network: NetworkDescriptor,
    pub mode: ExecutionMode,
    pub chain: SharedChain,
    /// The `deployer` named account, owner of `FundMe`
    pub deployer: Address,
    /// `FundMe`, connected to the deployer
    pub fund_me: FundMeHandle,
    mock: Option<MockV3AggregatorHandle>,
    gas: GasMeter,
    logs: Vec<String>,
}

impl ScenarioContext {
    /// Resolves the deployed contracts: `FundMe`, and in local mode the mock price feed.
    pub fn new(
        chain: SharedChain,
        config: &Config,
        deployments: &Deployments,
        mode: ExecutionMode,
    ) -> Result<Self> {
        let deployer = chain.account(config.named_account(Config::DEPLOYER)?)?;
        let gas = GasMeter::default();
        let fund_me =
            FundMeHandle::resolve(chain.clone(), deployments, deployer)?.with_gas_meter(gas.clone());
        let mock = if mode.is_local() {
            Some(
                MockV3AggregatorHandle::resolve(chain.clone(), deployments, deployer)?
                    .with_gas_meter(gas.clone()),
            )
        } else {
            None
        };

        Ok(Self {
            network: deployments.network().clone(),
            mode,
            chain,
            deployer,
            fund_me,
            mock,
            gas,
            logs: Vec::new(),
        })
    }

    /// The mock price feed, only resolved in local mode.
    pub fn mock(&self) -> Result<&MockV3AggregatorHandle> {
        self.mock.as_ref().ok_or_eyre("MockV3Aggregator is only deployed on local networks")
    }

    /// The account at `index`.
    pub fn account(&self, index: usize) -> Result<Address> {
        Ok(self.chain.account(index)?)
    }

    pub async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.chain.balance(address).await?)
    }

    /// Prints `message` as part of the case's output.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "fund_me::harness", "{message}");
        self.logs.push(message);
    }

    pub fn gas_meter(&self) -> &GasMeter {
        &self.gas
    }

    pub(crate) fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}
