//! Deployment errors

use fund_me_chain::ChainError;
use fund_me_config::ConfigError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("no deployment named `{0}`")]
    NotFound(String),
    #[error(
        "deployments of network `{network}` were made on chain {stored} but it is connected to chain {actual}"
    )]
    ChainIdMismatch { network: String, stored: u64, actual: u64 },
    #[error("no price feed configured for network `{0}`, set `eth_usd_price_feed`")]
    MissingPriceFeed(String),
    #[error("deployment of `{0}` returned no contract address")]
    MissingContractAddress(String),
    #[error("failed to access {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid deployment file {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl DeploymentError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
