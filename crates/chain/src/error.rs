//! Chain errors

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::PendingTransactionError;
use alloy_signer_local::LocalSignerError;
use alloy_transport::TransportError;
use fund_me_common::{RevertReason, decode_revert};
use fund_me_config::UnresolvedEnvVarError;

/// Result alias with [`ChainError`] as error
pub type ChainResult<T> = Result<T, ChainError>;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The call was rejected, holds the raw revert data
    #[error("execution reverted: {}", decode_revert(.0))]
    Revert(Bytes),
    #[error("insufficient funds for gas * price + value: have {have} want {want}")]
    InsufficientFunds { have: U256, want: U256 },
    #[error("no signer for account {0}")]
    UnknownSigner(Address),
    #[error("no native implementation of contract `{0}`")]
    UnknownContract(String),
    #[error("contract `{0}` has no bytecode, compile the contracts first")]
    MissingBytecode(String),
    #[error("transaction {0} was mined but failed")]
    Failed(TxHash),
    #[error("contract creation is only supported through `deploy`")]
    UnsupportedCreate,
    #[error("network has no accounts configured")]
    NoSigners,
    #[error("no account at index {0}")]
    MissingAccount(usize),
    #[error("connected to chain {actual} but the network is configured for chain {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },
    #[error("invalid rpc url `{url}`: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
    #[error("failed to decode return data: {0}")]
    AbiDecode(#[from] alloy_sol_types::Error),
    #[error(transparent)]
    Signer(#[from] LocalSignerError),
    #[error(transparent)]
    UnresolvedEnvVar(#[from] UnresolvedEnvVarError),
    #[error(transparent)]
    Transport(TransportError),
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
}

impl ChainError {
    /// Returns the decoded revert reason if the call was rejected.
    pub fn revert_reason(&self) -> Option<RevertReason> {
        match self {
            Self::Revert(data) => Some(decode_revert(data)),
            _ => None,
        }
    }
}

impl From<TransportError> for ChainError {
    fn from(err: TransportError) -> Self {
        // nodes report reverts during gas estimation and `eth_call` as error responses
        if let Some(data) = err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
            return Self::Revert(data);
        }
        Self::Transport(err)
    }
}
