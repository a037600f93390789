//! The deployment registry: deployed contracts by name, per network.

use crate::DeploymentError;
use alloy_primitives::{Address, Bytes, TxHash};
use fund_me_chain::{Chain, ContractArtifact};
use fund_me_config::NetworkDescriptor;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
};

/// Marker file holding the chain id the deployments of a network were made on.
pub const CHAIN_ID_FILE: &str = ".chainId";

/// A deployed contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub address: Address,
    /// ABI encoded constructor arguments
    pub args: Bytes,
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
    pub deployer: Address,
}

/// How to deploy a contract with [`Deployments::deploy`].
#[derive(Clone, Debug)]
pub struct DeployOptions {
    pub contract: ContractArtifact,
    pub from: Address,
    /// ABI encoded constructor arguments
    pub args: Bytes,
    pub confirmations: u64,
    /// Whether to log the deployment
    pub log: bool,
}

impl DeployOptions {
    pub fn new(contract: ContractArtifact, from: Address, args: impl Into<Bytes>) -> Self {
        Self { contract, from, args: args.into(), confirmations: 1, log: false }
    }

    pub fn confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn log(mut self, yes: bool) -> Self {
        self.log = yes;
        self
    }
}

/// Deployed contracts of one network.
///
/// Deployments on ephemeral networks only live in memory, all others are stored as
/// `<dir>/<network>/<Name>.json` next to a [`CHAIN_ID_FILE`].
#[derive(Debug)]
pub struct Deployments {
    network: NetworkDescriptor,
    dir: Option<PathBuf>,
    records: BTreeMap<String, Deployment>,
    logs: Vec<String>,
    quiet: bool,
}

impl Deployments {
    /// An empty registry that is never written to disk.
    pub fn in_memory(network: NetworkDescriptor) -> Self {
        Self { network, dir: None, records: BTreeMap::new(), logs: Vec::new(), quiet: false }
    }

    /// Opens the registry of `network` under `root`, loading all stored deployments.
    ///
    /// Fails if the deployments were made on a different chain than `network.chain_id`.
    pub fn open(root: impl AsRef<Path>, network: NetworkDescriptor) -> Result<Self, DeploymentError> {
        let dir = root.as_ref().join(&network.name);
        let mut records = BTreeMap::new();

        if dir.is_dir() {
            let chain_id_file = dir.join(CHAIN_ID_FILE);
            match fs::read_to_string(&chain_id_file) {
                Ok(content) => {
                    let stored = content.trim().parse::<u64>().map_err(|err| DeploymentError::Io {
                        path: chain_id_file.clone(),
                        source: io::Error::new(io::ErrorKind::InvalidData, err),
                    })?;
                    if stored != network.chain_id {
                        return Err(DeploymentError::ChainIdMismatch {
                            network: network.name,
                            stored,
                            actual: network.chain_id,
                        });
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(DeploymentError::Io { path: chain_id_file, source }),
            }

            for entry in fs::read_dir(&dir).map_err(DeploymentError::io(&dir))? {
                let path = entry.map_err(DeploymentError::io(&dir))?.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else { continue };
                let content = fs::read_to_string(&path).map_err(DeploymentError::io(&path))?;
                let deployment = serde_json::from_str(&content)
                    .map_err(|source| DeploymentError::Json { path: path.clone(), source })?;
                records.insert(name.to_string(), deployment);
            }
        }

        debug!(target: "fund_me::deploy", network = %network, dir = %dir.display(), deployments = records.len(), "opened deployments");
        Ok(Self { network, dir: Some(dir), records, logs: Vec::new(), quiet: false })
    }

    /// Whether [`log`](Self::log) only goes to tracing and not to stdout.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    /// The directory deployments are stored in, `None` if they only live in memory.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Deployment> {
        self.records.get(name)
    }

    pub fn get_or_err(&self, name: &str) -> Result<&Deployment, DeploymentError> {
        self.get(name).ok_or_else(|| DeploymentError::NotFound(name.to_string()))
    }

    pub fn all(&self) -> &BTreeMap<String, Deployment> {
        &self.records
    }

    /// Records `deployment` under `name`, overwriting any previous deployment.
    pub fn save(&mut self, name: &str, deployment: Deployment) -> Result<(), DeploymentError> {
        if let Some(dir) = &self.dir {
            fs::create_dir_all(dir).map_err(DeploymentError::io(dir))?;
            let chain_id_file = dir.join(CHAIN_ID_FILE);
            fs::write(&chain_id_file, self.network.chain_id.to_string())
                .map_err(DeploymentError::io(&chain_id_file))?;

            let path = dir.join(format!("{name}.json"));
            let json = serde_json::to_string_pretty(&deployment)
                .map_err(|source| DeploymentError::Json { path: path.clone(), source })?;
            fs::write(&path, json).map_err(DeploymentError::io(&path))?;
            trace!(target: "fund_me::deploy", %name, path = %path.display(), "saved deployment");
        }
        self.records.insert(name.to_string(), deployment);
        Ok(())
    }

    /// Deploys `options.contract` as `name`.
    ///
    /// An existing deployment is reused if the chain still has code at its address and it was
    /// deployed with the same constructor arguments.
    pub async fn deploy(
        &mut self,
        chain: &dyn Chain,
        name: &str,
        options: DeployOptions,
    ) -> Result<Deployment, DeploymentError> {
        if let Some(existing) = self.get(name).cloned()
            && existing.args == options.args
            && chain.has_code(existing.address).await?
        {
            if options.log {
                self.log(format!("reusing \"{name}\" at {}", existing.address));
            }
            return Ok(existing);
        }

        let receipt =
            chain.deploy(options.from, &options.contract, options.args.clone(), options.confirmations).await?;
        let address =
            receipt.contract_address.ok_or_else(|| DeploymentError::MissingContractAddress(name.to_string()))?;
        let deployment = Deployment {
            address,
            args: options.args,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            deployer: options.from,
        };
        if options.log {
            self.log(format!(
                "deploying \"{name}\" (tx: {})...: deployed at {address} with {} gas",
                receipt.transaction_hash, receipt.gas_used
            ));
        }
        self.save(name, deployment.clone())?;
        Ok(deployment)
    }

    /// Logs `message` to stdout, unless quiet, and keeps it.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "fund_me::deploy", network = %self.network.name, "{message}");
        if !self.quiet {
            println!("{message}");
        }
        self.logs.push(message);
    }

    /// Everything logged so far.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}
