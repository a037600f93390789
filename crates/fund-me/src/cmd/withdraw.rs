use super::Network;
use crate::opts::NetworkArgs;
use clap::Parser;
use eyre::Result;
use fund_me_chain::{TxReceipt, format_receipt};

/// CLI arguments for `fund-me withdraw`.
#[derive(Clone, Debug, Parser)]
pub struct WithdrawArgs {
    #[command(flatten)]
    pub network: NetworkArgs,
}

impl WithdrawArgs {
    pub async fn run(self) -> Result<TxReceipt> {
        let network = Network::connect(&self.network).await?;
        let deployments = network.deployments(true).await?;
        let fund_me = network.fund_me(&deployments)?;
        println!("Got contract FundMe at {}", fund_me.address());

        println!("Withdrawing from contract...");
        let receipt = fund_me.withdraw().await?;
        print!("{}", format_receipt(network.chain.chain_id(), &receipt));
        println!("Got it back!");
        Ok(receipt)
    }
}
