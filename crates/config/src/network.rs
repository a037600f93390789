//! Network definitions and the local/staging classification.

use crate::{
    endpoints::{AccountKey, RpcEndpointUrl},
    resolve::{UnresolvedEnvVarError, interpolate},
};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// Chain id of the local development chain.
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Name of the built-in in-process network.
pub const HARDHAT_NETWORK: &str = "hardhat";

/// Name of the built-in network pointing at a local node on `127.0.0.1:8545`.
pub const LOCALHOST_NETWORK: &str = "localhost";

/// The mnemonic the local dev accounts are derived from.
pub const DEFAULT_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Number of dev accounts derived from a mnemonic when no count is configured.
pub const DEFAULT_ACCOUNT_COUNT: u32 = 10;

/// A network the contracts can be deployed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint. `None` runs the network on the in-process devnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<RpcEndpointUrl>,
    /// Expected chain id, checked against the connected chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub accounts: NetworkAccounts,
    /// Address of the ETH/USD price feed on this network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_usd_price_feed: Option<Address>,
    /// Number of confirmations deployments wait for.
    #[serde(default = "default_block_confirmations")]
    pub block_confirmations: u64,
}

fn default_block_confirmations() -> u64 {
    1
}

impl NetworkConfig {
    /// The built-in in-process network.
    pub fn hardhat() -> Self {
        Self {
            url: None,
            chain_id: Some(LOCAL_CHAIN_ID),
            accounts: NetworkAccounts::default(),
            eth_usd_price_feed: None,
            block_confirmations: 1,
        }
    }

    /// A local node, e.g. `anvil` or `npx hardhat node`.
    pub fn localhost() -> Self {
        Self { url: Some(RpcEndpointUrl::Url("http://127.0.0.1:8545".to_string())), ..Self::hardhat() }
    }

    /// Whether this network runs on the in-process devnet, whose state only lives as long as the
    /// process.
    pub fn is_in_process(&self) -> bool {
        self.url.is_none()
    }
}

/// The accounts that sign transactions on a network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkAccounts {
    /// A list of private keys
    Keys(Vec<AccountKey>),
    /// Accounts derived from a mnemonic at `m/44'/60'/0'/0/{0..count}`
    Mnemonic {
        mnemonic: String,
        #[serde(default = "default_account_count")]
        count: u32,
    },
}

fn default_account_count() -> u32 {
    DEFAULT_ACCOUNT_COUNT
}

impl Default for NetworkAccounts {
    fn default() -> Self {
        Self::Mnemonic { mnemonic: DEFAULT_MNEMONIC.to_string(), count: DEFAULT_ACCOUNT_COUNT }
    }
}

impl NetworkAccounts {
    /// Resolves all env var placeholders.
    pub fn resolve(&self) -> Result<ResolvedAccounts, UnresolvedEnvVarError> {
        Ok(match self {
            Self::Keys(keys) => {
                ResolvedAccounts::Keys(keys.iter().map(AccountKey::resolve).collect::<Result<_, _>>()?)
            }
            Self::Mnemonic { mnemonic, count } => {
                ResolvedAccounts::Mnemonic { phrase: interpolate(mnemonic)?, count: *count }
            }
        })
    }
}

/// [`NetworkAccounts`] with every placeholder replaced by its value.
#[derive(Clone, PartialEq, Eq)]
pub enum ResolvedAccounts {
    Keys(Vec<String>),
    Mnemonic { phrase: String, count: u32 },
}

impl fmt::Debug for ResolvedAccounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keys(keys) => write!(f, "Keys(<{} redacted>)", keys.len()),
            Self::Mnemonic { count, .. } => write!(f, "Mnemonic {{ count: {count} }}"),
        }
    }
}

/// Identifies the active network of a run. Immutable once resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    pub name: String,
    pub chain_id: u64,
}

impl NetworkDescriptor {
    pub fn new(name: impl Into<String>, chain_id: u64) -> Self {
        Self { name: name.into(), chain_id }
    }
}

impl fmt::Display for NetworkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.chain_id)
    }
}

/// The set of networks considered local/ephemeral.
///
/// Mock provisioning keys off the chain id, the scenario harness off the network name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalNetworks {
    names: BTreeSet<String>,
    chain_id: u64,
}

impl LocalNetworks {
    pub fn new<I, S>(names: I, chain_id: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect(), chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_local_chain(&self, chain_id: u64) -> bool {
        self.chain_id == chain_id
    }

    /// Resolves the execution mode of a run on `network`.
    pub fn mode(&self, network: &NetworkDescriptor) -> ExecutionMode {
        if self.contains_name(&network.name) { ExecutionMode::Local } else { ExecutionMode::Staging }
    }
}

impl Default for LocalNetworks {
    fn default() -> Self {
        Self::new([HARDHAT_NETWORK, LOCALHOST_NETWORK], LOCAL_CHAIN_ID)
    }
}

/// Whether the scenario harness runs the full local tree or the reduced staging scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Local,
    Staging,
}

impl ExecutionMode {
    pub fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Staging => f.write_str("staging"),
        }
    }
}
