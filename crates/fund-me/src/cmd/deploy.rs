use super::Network;
use crate::opts::NetworkArgs;
use clap::Parser;
use eyre::Result;
use fund_me_deploy::Deployments;

/// CLI arguments for `fund-me deploy`.
#[derive(Clone, Debug, Parser)]
pub struct DeployArgs {
    /// Only run the deploy steps with one of these tags: `all`, `mocks` or `fundme`.
    ///
    /// All steps run when no tag is given.
    #[arg(long, num_args = 1.., value_delimiter = ',', value_name = "TAG")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub network: NetworkArgs,
}

impl DeployArgs {
    pub async fn run(self) -> Result<Deployments> {
        let network = Network::connect(&self.network).await?;
        let deployments = network.deploy(&self.tags, false).await?;
        if let Some(dir) = deployments.dir() {
            println!("Deployments of {} saved to {}", deployments.network(), dir.display());
        }
        Ok(deployments)
    }
}
