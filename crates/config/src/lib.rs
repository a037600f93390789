//! # fund-me-config
//!
//! Configuration of the FundMe deploy and test harness.
//!
//! Values are layered, lowest priority first: built-in defaults, the `[profile.<name>]` sections
//! of `fund-me.toml`, then `FUND_ME_` prefixed environment variables. `FUND_ME_PROFILE` selects
//! the profile, every profile inherits from `default`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub mod endpoints;
pub use endpoints::{AccountKey, RpcEndpointUrl};

pub mod error;
pub use error::{ConfigError, ExtractConfigError};

pub mod network;
pub use network::{
    DEFAULT_MNEMONIC, ExecutionMode, HARDHAT_NETWORK, LOCAL_CHAIN_ID, LocalNetworks,
    NetworkAccounts, NetworkConfig, NetworkDescriptor, ResolvedAccounts,
};

mod providers;
use providers::ProfileSectionProvider;

pub mod resolve;
pub use resolve::UnresolvedEnvVarError;

pub mod utils;
pub use utils::find_project_root;

/// Harness configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The selected profile. **(default)** `default`
    ///
    /// **Note:** This field is never serialized nor deserialized. When a `Config` is merged into a
    /// `Figment` as a `Provider`, this profile is selected on the `Figment`. When a `Config` is
    /// extracted, this field is set to the extracting `Figment`'s selected `Profile`.
    #[serde(skip)]
    pub profile: Profile,
    /// The project root, all relative paths are resolved against it.
    pub root: PathBuf,
    /// Network used when none is given on the command line.
    pub default_network: String,
    /// Names of the networks the harness treats as local: mocks are deployed and the full test
    /// tree runs.
    pub development_chains: Vec<String>,
    /// Chain id on which the mock price feed is provisioned.
    pub local_chain_id: u64,
    /// Where deployment records are written, relative to the root.
    pub deployments: PathBuf,
    /// Where compiled contract artifacts are read from, relative to the root.
    pub artifacts: PathBuf,
    /// Account roles mapped to an index into the network's accounts.
    pub named_accounts: BTreeMap<String, usize>,
    /// Configured networks, keyed by name.
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Config {
    /// The default profile: "default"
    pub const DEFAULT_PROFILE: Profile = Profile::const_new("default");

    /// TOML section for profiles
    pub const PROFILE_SECTION: &'static str = "profile";

    /// File name of config toml file
    pub const FILE_NAME: &'static str = "fund-me.toml";

    /// Prefix of the environment variables that override config values.
    pub const ENV_PREFIX: &'static str = "FUND_ME_";

    /// Name of the account that deploys the contracts.
    pub const DEPLOYER: &'static str = "deployer";

    /// Loads the `Config` of the project at `root`.
    ///
    /// See [`figment_with_root`](Self::figment_with_root) for more details.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `Config` from `provider`, returning the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use figment::providers::Serialized;
    /// use fund_me_config::Config;
    ///
    /// // Use the default `Figment`, but run against sepolia unless told otherwise.
    /// let figment = Config::figment().merge(Serialized::default("default_network", "sepolia"));
    ///
    /// let config = Config::try_from(figment);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        let providers: Vec<_> = figment.metadata().map(|meta| &meta.name).collect();
        trace!(target: "config", ?providers, "extracting config");
        let mut config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.profile = figment.profile().clone();
        Ok(config)
    }

    /// Returns the default figment for the current dir.
    pub fn figment() -> Figment {
        Self::figment_with_root(".")
    }

    /// Returns the figment for the project at `root`: defaults, `fund-me.toml` (or the file named
    /// by `FUND_ME_CONFIG`) and `FUND_ME_` env vars, with the selected profile.
    ///
    /// Nested keys in env vars are separated by `__`, e.g.
    /// `FUND_ME_NETWORKS__SEPOLIA__BLOCK_CONFIRMATIONS=3`.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let root = root.as_ref();
        let toml = std::env::var_os("FUND_ME_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(Self::FILE_NAME));
        Figment::from(Self::with_root(root))
            .merge(ProfileSectionProvider::new(Toml::file(toml).nested()))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["PROFILE", "CONFIG"]).split("__").global())
            .select(Self::selected_profile())
    }

    /// Creates the default `Config` for the project at `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf(), ..Default::default() }
    }

    /// Returns the selected profile.
    ///
    /// If the `FUND_ME_PROFILE` env variable is not set, this returns the `DEFAULT_PROFILE`.
    pub fn selected_profile() -> Profile {
        Profile::from_env_or("FUND_ME_PROFILE", Self::DEFAULT_PROFILE)
    }

    /// Returns the network named `name`.
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks.get(name).ok_or_else(|| ConfigError::UnknownNetwork {
            name: name.to_string(),
            known: self.networks.keys().cloned().collect(),
        })
    }

    /// The set of networks treated as local.
    pub fn local_networks(&self) -> LocalNetworks {
        LocalNetworks::new(self.development_chains.iter().cloned(), self.local_chain_id)
    }

    /// Returns the account index of the named account `name`.
    pub fn named_account(&self, name: &str) -> Result<usize, ConfigError> {
        self.named_accounts
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownNamedAccount(name.to_string()))
    }

    /// Directory holding the deployment records of all networks.
    pub fn deployments_dir(&self) -> PathBuf {
        self.root.join(&self.deployments)
    }

    /// Directory holding the compiled contract artifacts.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join(&self.artifacts)
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("FundMe Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.profile.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Self::DEFAULT_PROFILE,
            root: PathBuf::from("."),
            default_network: HARDHAT_NETWORK.to_string(),
            development_chains: vec![HARDHAT_NETWORK.to_string(), network::LOCALHOST_NETWORK.to_string()],
            local_chain_id: LOCAL_CHAIN_ID,
            deployments: "deployments".into(),
            artifacts: "artifacts".into(),
            named_accounts: BTreeMap::from([(Self::DEPLOYER.to_string(), 0)]),
            networks: BTreeMap::from([
                (HARDHAT_NETWORK.to_string(), NetworkConfig::hardhat()),
                (network::LOCALHOST_NETWORK.to_string(), NetworkConfig::localhost()),
            ]),
        }
    }
}
