use super::Network;
use crate::opts::NetworkArgs;
use alloy_primitives::U256;
use clap::Parser;
use eyre::Result;
use fund_me_chain::{TxReceipt, format_receipt};
use fund_me_common::units::parse_value;

/// CLI arguments for `fund-me fund`.
#[derive(Clone, Debug, Parser)]
pub struct FundArgs {
    /// The amount to send, in ether unless suffixed with a unit (`gwei`, `wei`).
    #[arg(long, value_parser = parse_value, default_value = "0.1", value_name = "VALUE")]
    pub value: U256,

    #[command(flatten)]
    pub network: NetworkArgs,
}

impl FundArgs {
    pub async fn run(self) -> Result<TxReceipt> {
        let network = Network::connect(&self.network).await?;
        let deployments = network.deployments(true).await?;
        let fund_me = network.fund_me(&deployments)?;
        println!("Got contract FundMe at {}", fund_me.address());

        println!("Funding contract...");
        let receipt = fund_me.fund(self.value).await?;
        print!("{}", format_receipt(network.chain.chain_id(), &receipt));
        println!("Funded!");
        Ok(receipt)
    }
}
