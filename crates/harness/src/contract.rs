//! Handles to deployed contracts.

use alloy_primitives::{Address, I256, U256};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use fund_me_chain::{ChainResult, SharedChain, TxReceipt};
use fund_me_common::abi::{FundMe, MockV3Aggregator, names};
use fund_me_deploy::{DeploymentError, Deployments};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Sums the gas used by the transactions sent through the handles sharing it.
#[derive(Clone, Debug, Default)]
pub struct GasMeter(Arc<AtomicU64>);

impl GasMeter {
    pub fn record(&self, gas: u64) {
        self.0.fetch_add(gas, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Returns the total and starts over from zero.
    pub fn reset(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

/// A deployed contract, bound to the account that signs its transactions.
#[derive(Clone, Debug)]
pub struct ContractHandle {
    chain: SharedChain,
    name: &'static str,
    address: Address,
    signer: Address,
    gas: GasMeter,
}

impl ContractHandle {
    pub fn new(chain: SharedChain, name: &'static str, address: Address, signer: Address) -> Self {
        Self { chain, name, address, signer, gas: GasMeter::default() }
    }

    /// Resolves the deployment `name` from `deployments`.
    pub fn resolve(
        chain: SharedChain,
        deployments: &Deployments,
        name: &'static str,
        signer: Address,
    ) -> Result<Self, DeploymentError> {
        let deployment = deployments.get_or_err(name)?;
        Ok(Self::new(chain, name, deployment.address, signer))
    }

    pub fn with_gas_meter(mut self, gas: GasMeter) -> Self {
        self.gas = gas;
        self
    }

    /// The same contract with transactions signed by `signer`.
    pub fn connect(&self, signer: Address) -> Self {
        Self { signer, ..self.clone() }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The contract's ether balance.
    pub async fn balance(&self) -> ChainResult<U256> {
        self.chain.balance(self.address).await
    }

    /// Calls `call` without sending a transaction.
    pub async fn call<C: SolCall>(&self, call: C) -> ChainResult<C::Return> {
        let tx = self.request(&call, U256::ZERO);
        let data = self.chain.call(tx).await?;
        Ok(C::abi_decode_returns(&data)?)
    }

    /// Sends `call` with `value` attached and waits for one confirmation.
    pub async fn send<C: SolCall>(&self, call: C, value: U256) -> ChainResult<TxReceipt> {
        let tx = self.request(&call, value);
        let receipt = self.chain.send(tx, 1).await?;
        self.gas.record(receipt.gas_used);
        trace!(target: "fund_me::harness", contract = self.name, function = C::SIGNATURE, gas_used = receipt.gas_used, "sent transaction");
        Ok(receipt)
    }

    fn request<C: SolCall>(&self, call: &C, value: U256) -> TransactionRequest {
        TransactionRequest::default()
            .from(self.signer)
            .to(self.address)
            .value(value)
            .input(call.abi_encode().into())
    }
}

/// Handle to a `FundMe` contract.
#[derive(Clone, Debug)]
pub struct FundMeHandle(ContractHandle);

impl FundMeHandle {
    pub fn new(handle: ContractHandle) -> Self {
        Self(handle)
    }

    /// Resolves the `FundMe` deployment.
    pub fn resolve(
        chain: SharedChain,
        deployments: &Deployments,
        signer: Address,
    ) -> Result<Self, DeploymentError> {
        ContractHandle::resolve(chain, deployments, names::FUND_ME, signer).map(Self)
    }

    pub fn connect(&self, signer: Address) -> Self {
        Self(self.0.connect(signer))
    }

    pub fn with_gas_meter(self, gas: GasMeter) -> Self {
        Self(self.0.with_gas_meter(gas))
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub async fn balance(&self) -> ChainResult<U256> {
        self.0.balance().await
    }

    pub async fn fund(&self, value: U256) -> ChainResult<TxReceipt> {
        self.0.send(FundMe::fundCall {}, value).await
    }

    pub async fn withdraw(&self) -> ChainResult<TxReceipt> {
        self.0.send(FundMe::withdrawCall {}, U256::ZERO).await
    }

    pub async fn cheaper_withdraw(&self) -> ChainResult<TxReceipt> {
        self.0.send(FundMe::cheaperWithdrawCall {}, U256::ZERO).await
    }

    pub async fn minimum_usd(&self) -> ChainResult<U256> {
        self.0.call(FundMe::MINIMUM_USDCall {}).await
    }

    pub async fn get_address_to_amount_funded(&self, funder: Address) -> ChainResult<U256> {
        self.0.call(FundMe::getAddressToAmountFundedCall { fundingAddress: funder }).await
    }

    pub async fn get_funder(&self, index: usize) -> ChainResult<Address> {
        self.0.call(FundMe::getFunderCall { index: U256::from(index) }).await
    }

    pub async fn get_owner(&self) -> ChainResult<Address> {
        self.0.call(FundMe::getOwnerCall {}).await
    }

    pub async fn get_price_feed(&self) -> ChainResult<Address> {
        self.0.call(FundMe::getPriceFeedCall {}).await
    }

    pub async fn get_version(&self) -> ChainResult<U256> {
        self.0.call(FundMe::getVersionCall {}).await
    }
}

/// Handle to a `MockV3Aggregator` price feed.
#[derive(Clone, Debug)]
pub struct MockV3AggregatorHandle(ContractHandle);

impl MockV3AggregatorHandle {
    pub fn new(handle: ContractHandle) -> Self {
        Self(handle)
    }

    /// Resolves the `MockV3Aggregator` deployment.
    pub fn resolve(
        chain: SharedChain,
        deployments: &Deployments,
        signer: Address,
    ) -> Result<Self, DeploymentError> {
        ContractHandle::resolve(chain, deployments, names::MOCK_V3_AGGREGATOR, signer).map(Self)
    }

    pub fn connect(&self, signer: Address) -> Self {
        Self(self.0.connect(signer))
    }

    pub fn with_gas_meter(self, gas: GasMeter) -> Self {
        Self(self.0.with_gas_meter(gas))
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub async fn decimals(&self) -> ChainResult<u8> {
        self.0.call(MockV3Aggregator::decimalsCall {}).await
    }

    pub async fn latest_answer(&self) -> ChainResult<I256> {
        self.0.call(MockV3Aggregator::latestAnswerCall {}).await
    }

    pub async fn update_answer(&self, answer: I256) -> ChainResult<TxReceipt> {
        self.0.send(MockV3Aggregator::updateAnswerCall { _answer: answer }, U256::ZERO).await
    }
}
