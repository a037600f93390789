//! # fund-me
//!
//! The `fund-me` command-line interface: deploys the FundMe contracts, runs the scenario tests
//! against them, and funds or drains a deployed contract.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod cmd;
pub mod handler;
pub mod opts;
pub mod utils;

use clap::Parser;
use eyre::Result;
use opts::{FundMe, FundMeSubcommand};

/// Run the `fund-me` command-line interface.
pub fn run() -> Result<()> {
    setup()?;

    let args = FundMe::parse();
    utils::tokio_runtime()?.block_on(run_command(args))
}

/// Setup the global logger and other utilities.
pub fn setup() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();
    utils::enable_paint();

    Ok(())
}

/// Run the subcommand.
pub async fn run_command(args: FundMe) -> Result<()> {
    match args.cmd {
        FundMeSubcommand::Deploy(cmd) => cmd.run().await.map(drop),
        FundMeSubcommand::Test(cmd) => cmd.run().await?.ensure_ok(),
        FundMeSubcommand::Fund(cmd) => cmd.run().await.map(drop),
        FundMeSubcommand::Withdraw(cmd) => cmd.run().await.map(drop),
    }
}
