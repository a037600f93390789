//! An in-process development chain.
//!
//! Like anvil it derives funded dev accounts from a mnemonic, mines one block per transaction and
//! supports snapshots, but instead of running bytecode it hosts native implementations of the
//! harness' contracts (see [`contracts`]).

use crate::{Chain, ChainError, ChainResult, ContractArtifact, TxReceipt, signers::signers};
use alloy_primitives::{Address, B256, Bytes, TxKind, U256, keccak256, uint};
use alloy_rpc_types_eth::TransactionRequest;
use async_trait::async_trait;
use fund_me_config::{LOCAL_CHAIN_ID, NetworkAccounts, ResolvedAccounts};
use parking_lot::RwLock;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

pub mod contracts;
use contracts::NativeKind;

pub mod executor;
use executor::Outcome;

pub mod gas;

pub mod state;
use state::{ChainState, Snapshots};

/// Gas price of every devnet transaction: 1.875 gwei
pub const DEFAULT_GAS_PRICE: u128 = 1_875_000_000;

/// Balance of each dev account at genesis: 10000 ETH
pub const DEFAULT_GENESIS_BALANCE: U256 = uint!(10_000_000_000_000_000_000_000_U256);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevnetConfig {
    pub chain_id: u64,
    /// The unlocked accounts, funded at genesis
    pub accounts: Vec<Address>,
    pub genesis_balance: U256,
    pub gas_price: u128,
}

impl DevnetConfig {
    /// Config with the accounts of `accounts`.
    pub fn from_accounts(accounts: &ResolvedAccounts) -> ChainResult<Self> {
        let accounts = signers(accounts)?.iter().map(|signer| signer.address()).collect();
        Ok(Self {
            chain_id: LOCAL_CHAIN_ID,
            accounts,
            genesis_balance: DEFAULT_GENESIS_BALANCE,
            gas_price: DEFAULT_GAS_PRICE,
        })
    }

    /// Config with the 10 dev accounts of the default test mnemonic.
    pub fn dev() -> ChainResult<Self> {
        Self::from_accounts(&NetworkAccounts::default().resolve()?)
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: ChainState,
    snapshots: Snapshots,
}

/// Handle to an in-process chain. Clones share the same chain.
#[derive(Clone, Debug)]
pub struct Devnet {
    chain_id: u64,
    accounts: Arc<[Address]>,
    gas_price: u128,
    inner: Arc<RwLock<Inner>>,
}

impl Devnet {
    pub fn new(config: DevnetConfig) -> Self {
        let mut state = ChainState { timestamp: now(), ..Default::default() };
        for account in &config.accounts {
            state.account_mut(*account).balance = config.genesis_balance;
        }
        debug!(target: "devnet::backend", chain_id = config.chain_id, accounts = config.accounts.len(), "created devnet");
        Self {
            chain_id: config.chain_id,
            accounts: config.accounts.into(),
            gas_price: config.gas_price,
            inner: Arc::new(RwLock::new(Inner { state, ..Default::default() })),
        }
    }

    pub fn gas_price(&self) -> u128 {
        self.gas_price
    }

    /// Number of the head block.
    pub fn best_number(&self) -> u64 {
        self.inner.read().state.block_number
    }

    pub fn nonce(&self, address: Address) -> u64 {
        self.inner.read().state.nonce(address)
    }

    pub fn set_balance(&self, address: Address, balance: U256) {
        self.inner.write().state.account_mut(address).balance = balance;
    }

    /// Name of the contract deployed at `address`.
    pub fn contract_name(&self, address: Address) -> Option<&'static str> {
        self.inner.read().state.contracts.get(&address).map(|contract| contract.kind().name())
    }

    /// Mines `blocks` empty blocks.
    pub fn mine(&self, blocks: u64) {
        let mut inner = self.inner.write();
        for _ in 0..blocks {
            inner.state.mine(now());
        }
    }

    fn ensure_signer(&self, from: Address) -> ChainResult<()> {
        if self.accounts.contains(&from) { Ok(()) } else { Err(ChainError::UnknownSigner(from)) }
    }

    fn default_sender(&self) -> ChainResult<Address> {
        self.accounts.first().copied().ok_or(ChainError::NoSigners)
    }

    /// Runs `execute` on a copy of the state and commits it as a new block if it succeeds and the
    /// sender can pay for `value` and the gas.
    fn transact<T>(
        &self,
        from: Address,
        to: Option<Address>,
        value: U256,
        input: &[u8],
        confirmations: u64,
        execute: impl FnOnce(&mut ChainState) -> Outcome<T>,
    ) -> ChainResult<(T, TxReceipt)> {
        self.ensure_signer(from)?;
        let mut inner = self.inner.write();
        let have = inner.state.balance(from);
        if have < value {
            return Err(ChainError::InsufficientFunds { have, want: value });
        }

        let mut pending = inner.state.clone();
        let Outcome { result, gas_used } = execute(&mut pending);
        let output = result.map_err(|data| {
            trace!(target: "devnet::backend", %from, ?to, gas_used, "transaction reverted");
            ChainError::Revert(data)
        })?;

        let cost = U256::from(gas_used) * U256::from(self.gas_price);
        let want = value + cost;
        if have < want {
            return Err(ChainError::InsufficientFunds { have, want });
        }

        let nonce = pending.nonce(from);
        let account = pending.account_mut(from);
        account.balance -= cost;
        account.nonce += 1;
        pending.mine(now());
        let block_number = pending.block_number;
        for _ in 1..confirmations {
            pending.mine(now());
        }
        inner.state = pending;

        let receipt = TxReceipt {
            transaction_hash: tx_hash(self.chain_id, from, nonce, input),
            from,
            to,
            contract_address: None,
            block_number,
            gas_used,
            effective_gas_price: self.gas_price,
            status: true,
        };
        trace!(target: "devnet::backend", hash = %receipt.transaction_hash, block_number, gas_used, "mined transaction");
        Ok((output, receipt))
    }
}

#[async_trait]
impl Chain for Devnet {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    fn is_ephemeral(&self) -> bool {
        true
    }

    async fn block_number(&self) -> ChainResult<u64> {
        Ok(self.best_number())
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        Ok(self.inner.read().state.balance(address))
    }

    async fn has_code(&self, address: Address) -> ChainResult<bool> {
        Ok(self.inner.read().state.has_code(address))
    }

    async fn call(&self, tx: TransactionRequest) -> ChainResult<Bytes> {
        let Some(TxKind::Call(to)) = tx.to else { return Err(ChainError::UnsupportedCreate) };
        let from = tx.from.unwrap_or_default();
        let input = tx.input.input().cloned().unwrap_or_default();
        let mut state = self.inner.read().state.clone();
        let outcome = executor::transact(&mut state, from, to, tx.value.unwrap_or_default(), &input);
        outcome.result.map_err(ChainError::Revert)
    }

    async fn send(&self, tx: TransactionRequest, confirmations: u64) -> ChainResult<TxReceipt> {
        let Some(TxKind::Call(to)) = tx.to else { return Err(ChainError::UnsupportedCreate) };
        let from = match tx.from {
            Some(from) => from,
            None => self.default_sender()?,
        };
        let value = tx.value.unwrap_or_default();
        let input = tx.input.input().cloned().unwrap_or_default();
        let (_, receipt) = self.transact(from, Some(to), value, &input, confirmations, |state| {
            executor::transact(state, from, to, value, &input)
        })?;
        Ok(receipt)
    }

    async fn deploy(
        &self,
        from: Address,
        artifact: &ContractArtifact,
        args: Bytes,
        confirmations: u64,
    ) -> ChainResult<TxReceipt> {
        let kind = NativeKind::from_name(&artifact.name)
            .ok_or_else(|| ChainError::UnknownContract(artifact.name.clone()))?;
        let (address, mut receipt) = self.transact(from, None, U256::ZERO, &args, confirmations, |state| {
            executor::create(state, from, kind, &args)
        })?;
        debug!(target: "devnet::backend", contract = kind.name(), %address, "deployed native contract");
        receipt.contract_address = Some(address);
        Ok(receipt)
    }

    async fn snapshot(&self) -> ChainResult<U256> {
        let mut inner = self.inner.write();
        let state = inner.state.clone();
        let id = inner.snapshots.insert(state);
        trace!(target: "devnet::backend", %id, "created snapshot");
        Ok(id)
    }

    async fn revert_to(&self, id: U256) -> ChainResult<bool> {
        let mut inner = self.inner.write();
        match inner.snapshots.remove(id) {
            Some(state) => {
                inner.state = state;
                trace!(target: "devnet::backend", %id, "reverted to snapshot");
                Ok(true)
            }
            None => {
                warn!(target: "devnet::backend", %id, "no snapshot to revert to");
                Ok(false)
            }
        }
    }
}

fn now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

/// Devnet transactions aren't signed, their hash only has to be unique.
fn tx_hash(chain_id: u64, from: Address, nonce: u64, input: &[u8]) -> B256 {
    let mut preimage = Vec::with_capacity(8 + 20 + 8 + input.len());
    preimage.extend_from_slice(&chain_id.to_be_bytes());
    preimage.extend_from_slice(from.as_slice());
    preimage.extend_from_slice(&nonce.to_be_bytes());
    preimage.extend_from_slice(input);
    keccak256(preimage)
}
