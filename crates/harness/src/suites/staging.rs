//! The reduced scenario run on live networks.

use super::{Case, CaseFuture, Suite};
use crate::ScenarioContext;
use alloy_primitives::U256;
use fund_me_config::ExecutionMode;

/// Value funded on live networks: 0.01 ether
pub const STAGING_SEND_VALUE: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

pub const STAGING: Suite = Suite {
    name: "FundMe Staging Tests",
    mode: ExecutionMode::Staging,
    setup: None,
    cases: &[Case { name: "allows people to fund and withdraw", run: fund_and_withdraw }],
};

fn fund_and_withdraw(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        ctx.fund_me.fund(STAGING_SEND_VALUE).await?;
        ctx.fund_me.withdraw().await?;

        let ending = ctx.fund_me.balance().await?;
        ctx.log(format!("{ending} should equal 0, running assert equal..."));
        ensure_eq!(ending, U256::ZERO);
        Ok(())
    })
}
