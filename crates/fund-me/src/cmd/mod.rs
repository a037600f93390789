//! Subcommands of the `fund-me` CLI.

use crate::opts::NetworkArgs;
use eyre::{Result, WrapErr};
use fund_me_chain::SharedChain;
use fund_me_config::{Config, NetworkDescriptor};
use fund_me_deploy::{DeployContext, Deployments, run_steps};
use fund_me_harness::FundMeHandle;

pub mod deploy;
pub mod fund;
pub mod withdraw;

/// A connection to the selected network of a project.
#[derive(Debug)]
pub struct Network {
    pub config: Config,
    pub name: String,
    pub chain: SharedChain,
}

impl Network {
    /// Loads the project configuration and connects to the network selected by `args`.
    pub async fn connect(args: &NetworkArgs) -> Result<Self> {
        let config = args.load_config()?;
        let name = args.network(&config).to_string();
        let chain = fund_me_chain::connect(&config, &name)
            .await
            .wrap_err_with(|| format!("failed to connect to network {name}"))?;
        Ok(Self { config, name, chain })
    }

    pub fn descriptor(&self) -> NetworkDescriptor {
        NetworkDescriptor::new(&self.name, self.chain.chain_id())
    }

    /// Whether the network is one of the configured development chains.
    pub fn is_local(&self) -> bool {
        self.config.local_networks().contains_name(&self.name)
    }

    /// Runs the deploy steps selected by `tags` and returns the deployments of the network.
    pub async fn deploy<S: AsRef<str>>(&self, tags: &[S], quiet: bool) -> Result<Deployments> {
        let mut ctx = DeployContext::new(&self.config, &self.name, self.chain.as_ref())?.quiet(quiet);
        let steps = run_steps(&mut ctx, tags).await?;
        debug!(target: "fund_me::cli", network = %ctx.descriptor(), ?steps, "deploy steps done");
        Ok(ctx.deployments)
    }

    /// The deployments recorded on the network.
    ///
    /// Ephemeral chains start out empty, so all deploy steps run first.
    pub async fn deployments(&self, quiet: bool) -> Result<Deployments> {
        if self.chain.is_ephemeral() {
            return self.deploy::<&str>(&[], quiet).await;
        }
        Ok(Deployments::open(self.config.deployments_dir(), self.descriptor())?)
    }

    /// The deployed `FundMe`, signed for by the deployer.
    pub fn fund_me(&self, deployments: &Deployments) -> Result<FundMeHandle> {
        let deployer = self.chain.account(self.config.named_account(Config::DEPLOYER)?)?;
        Ok(FundMeHandle::resolve(self.chain.clone(), deployments, deployer)?)
    }
}
