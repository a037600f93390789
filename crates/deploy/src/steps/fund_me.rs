use super::DeployContext;
use crate::{DeployOptions, DeploymentError};
use alloy_sol_types::SolConstructor;
use fund_me_common::abi::{FundMe, names};
use fund_me_config::Config;

const BANNER: &str = "----------------------------------------------------";

/// Deploys `FundMe` against the mock price feed on the local chain, or the network's configured
/// feed elsewhere.
pub(super) async fn deploy_fund_me(ctx: &mut DeployContext<'_>) -> Result<(), DeploymentError> {
    let deployer = ctx.named_account(Config::DEPLOYER)?;
    let price_feed = if ctx.is_local_chain() {
        ctx.deployments.get_or_err(names::MOCK_V3_AGGREGATOR)?.address
    } else {
        ctx.network
            .eth_usd_price_feed
            .ok_or_else(|| DeploymentError::MissingPriceFeed(ctx.descriptor().name.clone()))?
    };
    let confirmations = if ctx.local.contains_name(&ctx.descriptor().name) {
        1
    } else {
        ctx.network.block_confirmations
    };

    ctx.deployments.log(BANNER);
    ctx.deployments.log("Deploying FundMe and waiting for confirmations...");
    let args = FundMe::constructorCall { priceFeed: price_feed }.abi_encode();
    let options = DeployOptions::new(ctx.artifact(names::FUND_ME), deployer, args)
        .confirmations(confirmations)
        .log(true);
    let deployment = ctx.deployments.deploy(ctx.chain, names::FUND_ME, options).await?;
    ctx.deployments.log(format!("FundMe deployed at {}", deployment.address));
    ctx.deployments.log(BANNER);
    Ok(())
}
