//! Deployment steps, run in order.

use crate::{DeploymentError, Deployments};
use alloy_primitives::Address;
use fund_me_chain::{Artifacts, Chain, ContractArtifact};
use fund_me_config::{Config, LocalNetworks, NetworkConfig, NetworkDescriptor};
use std::fmt;

mod fund_me;
mod mocks;

pub use mocks::{DECIMALS, INITIAL_PRICE};

/// Everything a deployment step needs: the network, its chain and the registry to record
/// deployments in.
pub struct DeployContext<'a> {
    pub config: &'a Config,
    pub network: &'a NetworkConfig,
    pub local: LocalNetworks,
    pub chain: &'a dyn Chain,
    pub artifacts: Artifacts,
    pub deployments: Deployments,
}

impl fmt::Debug for DeployContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployContext")
            .field("network", self.deployments.network())
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

impl<'a> DeployContext<'a> {
    /// Creates the context of the network `name`, connected through `chain`.
    ///
    /// Deployments are kept in memory on ephemeral chains and stored under the configured
    /// deployments dir otherwise.
    pub fn new(config: &'a Config, name: &str, chain: &'a dyn Chain) -> eyre::Result<Self> {
        let network = config.network(name)?;
        let descriptor = NetworkDescriptor::new(name, chain.chain_id());
        let deployments = if chain.is_ephemeral() {
            Deployments::in_memory(descriptor)
        } else {
            Deployments::open(config.deployments_dir(), descriptor)?
        };
        let artifacts = Artifacts::load(config.artifacts_dir())?;
        Ok(Self { config, network, local: config.local_networks(), chain, artifacts, deployments })
    }

    /// Don't print deployment logs.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.deployments = self.deployments.quiet(yes);
        self
    }

    pub fn descriptor(&self) -> &NetworkDescriptor {
        self.deployments.network()
    }

    /// Whether mocks are deployed on this chain.
    pub fn is_local_chain(&self) -> bool {
        self.local.is_local_chain(self.descriptor().chain_id)
    }

    /// Address of the named account `name`.
    pub fn named_account(&self, name: &str) -> Result<Address, DeploymentError> {
        let index = self.config.named_account(name)?;
        Ok(self.chain.account(index)?)
    }

    /// The artifact of contract `name`, native if it wasn't compiled.
    pub fn artifact(&self, name: &str) -> ContractArtifact {
        self.artifacts.get_or_native(name)
    }
}

/// A deployment step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployStep {
    /// `00-deploy-mocks`: the mock price feed, on the local chain only
    Mocks,
    /// `01-deploy-fund-me`
    FundMe,
}

impl DeployStep {
    /// All steps in the order they run.
    pub const ALL: [Self; 2] = [Self::Mocks, Self::FundMe];

    pub fn id(self) -> &'static str {
        match self {
            Self::Mocks => "00-deploy-mocks",
            Self::FundMe => "01-deploy-fund-me",
        }
    }

    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Mocks => &["all", "mocks"],
            Self::FundMe => &["all", "fundme"],
        }
    }

    /// Whether the step is selected by `tags`. No tags select every step.
    pub fn is_selected<S: AsRef<str>>(self, tags: &[S]) -> bool {
        tags.is_empty() || tags.iter().any(|tag| self.tags().contains(&tag.as_ref()))
    }

    pub async fn run(self, ctx: &mut DeployContext<'_>) -> Result<(), DeploymentError> {
        match self {
            Self::Mocks => mocks::deploy_mocks(ctx).await,
            Self::FundMe => fund_me::deploy_fund_me(ctx).await,
        }
    }
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Runs the steps selected by `tags` in order, returning the steps that ran.
pub async fn run_steps<S: AsRef<str>>(
    ctx: &mut DeployContext<'_>,
    tags: &[S],
) -> Result<Vec<DeployStep>, DeploymentError> {
    let mut ran = Vec::new();
    for step in DeployStep::ALL.into_iter().filter(|step| step.is_selected(tags)) {
        debug!(target: "fund_me::deploy", %step, network = %ctx.descriptor(), "running deploy step");
        step.run(ctx).await?;
        ran.push(step);
    }
    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_selection() {
        let none: &[&str] = &[];
        assert!(DeployStep::ALL.iter().all(|step| step.is_selected(none)));
        assert!(DeployStep::Mocks.is_selected(&["mocks"]));
        assert!(!DeployStep::FundMe.is_selected(&["mocks"]));
        assert!(DeployStep::FundMe.is_selected(&["fundme", "unknown"]));
        assert!(DeployStep::ALL.iter().all(|step| step.is_selected(&["all"])));
        assert!(!DeployStep::Mocks.is_selected(&["unknown"]));
    }
}
