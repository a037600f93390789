//! The full scenario tree, run on local networks against the mock price feed.

use super::{Case, CaseFuture, Suite};
use crate::{
    ScenarioContext,
    expect::{expect_custom_error, expect_revert, expect_reverted},
};
use alloy_primitives::U256;
use fund_me_config::ExecutionMode;

/// Value each funder sends: 0.1 ether
pub const LOCAL_SEND_VALUE: U256 = U256::from_limbs([100_000_000_000_000_000, 0, 0, 0]);

/// Number of accounts funding in the multiple funders case, the deployer included.
const FUNDERS: usize = 6;

pub const CONSTRUCTOR: Suite = Suite {
    name: "FundMe constructor",
    mode: ExecutionMode::Local,
    setup: None,
    cases: &[Case { name: "sets the aggregator addresses correctly", run: sets_aggregator }],
};

pub const FUND: Suite = Suite {
    name: "FundMe fund",
    mode: ExecutionMode::Local,
    setup: None,
    cases: &[
        Case { name: "Fails if you don't send enough ETH", run: fails_without_enough_eth },
        Case { name: "Updates the amount funded data structure", run: updates_amount_funded },
        Case { name: "Adds funder to array of funders", run: adds_funder },
    ],
};

pub const WITHDRAW: Suite = Suite {
    name: "FundMe withdraw",
    mode: ExecutionMode::Local,
    setup: Some(fund_from_deployer),
    cases: &[
        Case { name: "withdraws ETH from a single funder", run: withdraws_single_funder },
        Case {
            name: "is allows us to withdraw with multiple funders",
            run: withdraws_multiple_funders,
        },
        Case { name: "Only allows the owner to withdraw", run: only_owner_withdraws },
    ],
};

fn sets_aggregator(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.fund_me.get_price_feed().await?;
        let mock = ctx.mock()?.address();
        ensure_eq!(response, mock);
        Ok(())
    })
}

fn fails_without_enough_eth(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        expect_revert(ctx.fund_me.fund(U256::ZERO).await, "You need to spend more ETH!")
    })
}

fn updates_amount_funded(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let starting = ctx.fund_me.get_address_to_amount_funded(ctx.deployer).await?;
        ctx.fund_me.fund(LOCAL_SEND_VALUE).await?;
        let response = ctx.fund_me.get_address_to_amount_funded(ctx.deployer).await?;
        ensure_eq!(response - starting, LOCAL_SEND_VALUE);
        Ok(())
    })
}

fn adds_funder(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        ctx.fund_me.fund(LOCAL_SEND_VALUE).await?;
        let funder = ctx.fund_me.get_funder(0).await?;
        ensure_eq!(funder, ctx.deployer);
        Ok(())
    })
}

fn fund_from_deployer(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        ctx.fund_me.fund(LOCAL_SEND_VALUE).await?;
        Ok(())
    })
}

fn withdraws_single_funder(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let starting_fund_me = ctx.fund_me.balance().await?;
        let starting_deployer = ctx.balance(ctx.deployer).await?;

        let receipt = ctx.fund_me.withdraw().await?;
        let gas_cost = receipt.gas_cost();

        let ending_fund_me = ctx.fund_me.balance().await?;
        let ending_deployer = ctx.balance(ctx.deployer).await?;
        ensure_eq!(ending_fund_me, U256::ZERO);
        ensure_eq!(starting_fund_me + starting_deployer, ending_deployer + gas_cost);
        Ok(())
    })
}

fn withdraws_multiple_funders(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        for index in 1..FUNDERS {
            let funder = ctx.account(index)?;
            ctx.fund_me.connect(funder).fund(LOCAL_SEND_VALUE).await?;
        }
        let starting_fund_me = ctx.fund_me.balance().await?;
        let starting_deployer = ctx.balance(ctx.deployer).await?;

        let receipt = ctx.fund_me.withdraw().await?;
        let gas_cost = receipt.gas_cost();

        let ending_deployer = ctx.balance(ctx.deployer).await?;
        ensure_eq!(starting_fund_me + starting_deployer, ending_deployer + gas_cost);
        ensure_eq!(ctx.fund_me.balance().await?, U256::ZERO);

        expect_reverted(ctx.fund_me.get_funder(0).await)?;
        for index in 0..FUNDERS {
            let funder = ctx.account(index)?;
            let amount = ctx.fund_me.get_address_to_amount_funded(funder).await?;
            ensure_eq!(amount, U256::ZERO, "amount funded by account {index}");
        }
        Ok(())
    })
}

fn only_owner_withdraws(ctx: &mut ScenarioContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let attacker = ctx.account(1)?;
        let connected = ctx.fund_me.connect(attacker);
        expect_custom_error(connected.withdraw().await, "FundMe__NotOwner")
    })
}
