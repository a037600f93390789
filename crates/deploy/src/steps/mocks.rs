use super::DeployContext;
use crate::{DeployOptions, DeploymentError};
use alloy_primitives::{I256, U256};
use alloy_sol_types::SolConstructor;
use fund_me_common::abi::{MockV3Aggregator, names};
use fund_me_config::Config;

/// Decimals of the mock price feed.
pub const DECIMALS: u8 = 8;

/// Initial answer of the mock price feed: 2000 USD with 8 decimals.
pub const INITIAL_PRICE: I256 = I256::from_raw(U256::from_limbs([200_000_000_000, 0, 0, 0]));

/// Deploys the mock price feed if connected to the local chain, does nothing otherwise.
pub(super) async fn deploy_mocks(ctx: &mut DeployContext<'_>) -> Result<(), DeploymentError> {
    if !ctx.is_local_chain() {
        debug!(target: "fund_me::deploy", network = %ctx.descriptor(), "not a local chain, skipping mocks");
        return Ok(());
    }

    let deployer = ctx.named_account(Config::DEPLOYER)?;
    ctx.deployments.log("Local network detected! Deploying mocks...");
    let args = MockV3Aggregator::constructorCall { _decimals: DECIMALS, _initialAnswer: INITIAL_PRICE }
        .abi_encode();
    let options = DeployOptions::new(ctx.artifact(names::MOCK_V3_AGGREGATOR), deployer, args).log(true);
    ctx.deployments.deploy(ctx.chain, names::MOCK_V3_AGGREGATOR, options).await?;
    ctx.deployments.log("Mocks Deployed!");
    ctx.deployments.log("-".repeat(48));
    Ok(())
}
