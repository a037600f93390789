use crate::cmd::{
    deploy::DeployArgs, fund::FundArgs, test::TestArgs, withdraw::WithdrawArgs,
};
use clap::{Parser, Subcommand, ValueHint};
use eyre::Result;
use fund_me_config::{Config, find_project_root};
use std::path::PathBuf;

/// Deploy and test the FundMe contracts.
#[derive(Parser)]
#[command(name = "fund-me", version, next_display_order = None)]
pub struct FundMe {
    #[command(subcommand)]
    pub cmd: FundMeSubcommand,
}

#[derive(Subcommand)]
pub enum FundMeSubcommand {
    /// Run the deploy steps: the mock price feed on the local chain, then FundMe.
    #[command(visible_alias = "d")]
    Deploy(DeployArgs),

    /// Run the scenario tests against the deployed contracts.
    #[command(visible_alias = "t")]
    Test(TestArgs),

    /// Fund the deployed FundMe contract.
    Fund(FundArgs),

    /// Withdraw all funds of the deployed FundMe contract to its owner.
    Withdraw(WithdrawArgs),
}

/// The network to run against and the project it is configured in.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Network options")]
pub struct NetworkArgs {
    /// The network to use, as named in `fund-me.toml`.
    ///
    /// Defaults to the configured `default_network`.
    #[arg(long, short, env = "FUND_ME_NETWORK", value_name = "NAME")]
    pub network: Option<String>,

    /// The project's root path.
    ///
    /// By default, this is the closest directory containing `fund-me.toml`, or the current
    /// directory.
    #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
    pub root: Option<PathBuf>,
}

impl NetworkArgs {
    /// Loads the configuration of the project.
    pub fn load_config(&self) -> Result<Config> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => find_project_root(None)?,
        };
        Ok(Config::load_with_root(root)?)
    }

    /// The selected network name.
    pub fn network<'a>(&'a self, config: &'a Config) -> &'a str {
        self.network.as_deref().unwrap_or(&config.default_network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        FundMe::command().debug_assert();
    }

    #[test]
    fn parses_commands() {
        let args = FundMe::parse_from(["fund-me", "test", "--network", "sepolia", "--match-test", "fund"]);
        let FundMeSubcommand::Test(test) = args.cmd else { panic!("expected test") };
        assert_eq!(test.network.network.as_deref(), Some("sepolia"));
        assert_eq!(test.match_test.unwrap().as_str(), "fund");

        let args = FundMe::parse_from(["fund-me", "deploy", "--tags", "mocks", "--tags", "fundme"]);
        let FundMeSubcommand::Deploy(deploy) = args.cmd else { panic!("expected deploy") };
        assert_eq!(deploy.tags, ["mocks", "fundme"]);

        let args = FundMe::parse_from(["fund-me", "fund", "--value", "0.5"]);
        let FundMeSubcommand::Fund(fund) = args.cmd else { panic!("expected fund") };
        assert_eq!(fund.value.to_string(), "500000000000000000");
    }
}
