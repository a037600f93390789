//! # fund-me-chain
//!
//! The chains the harness deploys to and tests against, behind the object safe [`Chain`] trait:
//! the in-process [`Devnet`] and JSON-RPC networks ([`RpcChain`]).

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, Bytes, U256};
use alloy_rpc_types_eth::TransactionRequest;
use async_trait::async_trait;
use fund_me_config::Config;
use std::{fmt, sync::Arc};

pub mod artifacts;
pub use artifacts::{Artifacts, ContractArtifact};

pub mod devnet;
pub use devnet::{Devnet, DevnetConfig};

mod error;
pub use error::{ChainError, ChainResult};

mod receipt;
pub use receipt::{TxReceipt, format_receipt};

pub mod rpc;
pub use rpc::RpcChain;

pub mod signers;

/// A chain the harness can read from and send transactions to.
#[async_trait]
pub trait Chain: Send + Sync + fmt::Debug {
    fn chain_id(&self) -> u64;

    /// The accounts transactions can be sent from, in configured order.
    fn accounts(&self) -> &[Address];

    /// Whether the chain's state only lives as long as this process.
    fn is_ephemeral(&self) -> bool;

    /// Returns the account at `index`.
    fn account(&self, index: usize) -> ChainResult<Address> {
        self.accounts().get(index).copied().ok_or(ChainError::MissingAccount(index))
    }

    async fn block_number(&self) -> ChainResult<u64>;

    async fn balance(&self, address: Address) -> ChainResult<U256>;

    async fn has_code(&self, address: Address) -> ChainResult<bool>;

    /// Executes `tx` without committing it, like `eth_call`.
    async fn call(&self, tx: TransactionRequest) -> ChainResult<Bytes>;

    /// Sends `tx` and waits until it has `confirmations` confirmations.
    ///
    /// A rejected transaction returns [`ChainError::Revert`].
    async fn send(&self, tx: TransactionRequest, confirmations: u64) -> ChainResult<TxReceipt>;

    /// Deploys `artifact` with the ABI encoded constructor `args`.
    async fn deploy(
        &self,
        from: Address,
        artifact: &ContractArtifact,
        args: Bytes,
        confirmations: u64,
    ) -> ChainResult<TxReceipt>;

    /// Saves the current state, like `evm_snapshot`.
    async fn snapshot(&self) -> ChainResult<U256>;

    /// Restores the state saved by [`snapshot`](Self::snapshot), like `evm_revert`.
    ///
    /// Returns `false` if there's no snapshot with this id.
    async fn revert_to(&self, id: U256) -> ChainResult<bool>;
}

/// Shared handle to a [`Chain`]
pub type SharedChain = Arc<dyn Chain>;

/// Connects to the network `name` of `config`.
///
/// Networks without a url run on a fresh in-process [`Devnet`], all others are reached over
/// JSON-RPC and must report the configured chain id.
pub async fn connect(config: &Config, name: &str) -> eyre::Result<SharedChain> {
    let network = config.network(name)?;
    let accounts = network.accounts.resolve()?;

    let Some(url) = &network.url else {
        let mut devnet = DevnetConfig::from_accounts(&accounts)?;
        if let Some(chain_id) = network.chain_id {
            devnet = devnet.with_chain_id(chain_id);
        }
        info!(target: "fund_me::chain", network = name, chain_id = devnet.chain_id, "starting in-process devnet");
        return Ok(Arc::new(Devnet::new(devnet)));
    };

    let url = url.resolve()?;
    let chain = RpcChain::connect(&url, signers::signers(&accounts)?).await?;
    let actual = chain.chain_id();
    if let Some(expected) = network.chain_id
        && expected != actual
    {
        return Err(ChainError::ChainIdMismatch { expected, actual }.into());
    }
    info!(target: "fund_me::chain", network = name, chain_id = actual, "connected");
    Ok(Arc::new(chain))
}
