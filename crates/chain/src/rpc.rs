//! Networks reached over JSON-RPC.

use crate::{Chain, ChainError, ChainResult, ContractArtifact, TxReceipt};
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use std::fmt;

/// A JSON-RPC node: a live network, or a local node like anvil or `hardhat node`.
///
/// Transactions are signed locally by the configured accounts.
#[derive(Clone)]
pub struct RpcChain {
    provider: DynProvider,
    url: String,
    chain_id: u64,
    accounts: Vec<Address>,
}

impl fmt::Debug for RpcChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcChain")
            .field("url", &self.url)
            .field("chain_id", &self.chain_id)
            .field("accounts", &self.accounts)
            .finish_non_exhaustive()
    }
}

impl RpcChain {
    /// Connects to `url` and fetches the chain id.
    pub async fn connect(url: &str, signers: Vec<PrivateKeySigner>) -> ChainResult<Self> {
        let parsed = url
            .parse::<url::Url>()
            .map_err(|source| ChainError::InvalidUrl { url: url.to_string(), source })?;
        let accounts: Vec<_> = signers.iter().map(|signer| signer.address()).collect();
        let mut signers = signers.into_iter();
        let mut wallet = EthereumWallet::new(signers.next().ok_or(ChainError::NoSigners)?);
        for signer in signers {
            wallet.register_signer(signer);
        }

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(parsed).erased();
        let chain_id = provider.get_chain_id().await?;
        debug!(target: "rpc", url, chain_id, accounts = accounts.len(), "connected");
        Ok(Self { provider, url: url.to_string(), chain_id, accounts })
    }

    async fn send_and_confirm(&self, tx: TransactionRequest, confirmations: u64) -> ChainResult<TxReceipt> {
        let pending = self.provider.send_transaction(tx).await?;
        let hash = *pending.tx_hash();
        debug!(target: "rpc", %hash, confirmations, "sent transaction");
        let receipt: TxReceipt =
            pending.with_required_confirmations(confirmations.max(1)).get_receipt().await?.into();
        if !receipt.status {
            return Err(ChainError::Failed(hash));
        }
        Ok(receipt)
    }
}

#[async_trait]
impl Chain for RpcChain {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    fn is_ephemeral(&self) -> bool {
        false
    }

    async fn block_number(&self) -> ChainResult<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        Ok(self.provider.get_balance(address).await?)
    }

    async fn has_code(&self, address: Address) -> ChainResult<bool> {
        Ok(!self.provider.get_code_at(address).await?.is_empty())
    }

    async fn call(&self, tx: TransactionRequest) -> ChainResult<Bytes> {
        Ok(self.provider.call(tx).await?)
    }

    async fn send(&self, tx: TransactionRequest, confirmations: u64) -> ChainResult<TxReceipt> {
        if let Some(from) = tx.from
            && !self.accounts.contains(&from)
        {
            return Err(ChainError::UnknownSigner(from));
        }
        self.send_and_confirm(tx, confirmations).await
    }

    async fn deploy(
        &self,
        from: Address,
        artifact: &ContractArtifact,
        args: Bytes,
        confirmations: u64,
    ) -> ChainResult<TxReceipt> {
        if artifact.is_native() {
            return Err(ChainError::MissingBytecode(artifact.name.clone()));
        }
        let mut code = artifact.bytecode.to_vec();
        code.extend_from_slice(&args);
        let tx = TransactionRequest::default().from(from).input(Bytes::from(code).into()).into_create();
        self.send(tx, confirmations).await
    }

    async fn snapshot(&self) -> ChainResult<U256> {
        Ok(self.provider.raw_request("evm_snapshot".into(), ()).await?)
    }

    async fn revert_to(&self, id: U256) -> ChainResult<bool> {
        Ok(self.provider.raw_request("evm_revert".into(), (id,)).await?)
    }
}
