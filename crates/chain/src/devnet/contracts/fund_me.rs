use super::{non_payable, panic, revert};
use crate::devnet::executor::{CallResult, Frame};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{PanicKind, SolError, SolInterface, SolValue};
use fund_me_common::abi::{
    FundMe::{self, FundMeCalls},
    MockV3Aggregator,
};
use std::collections::HashMap;

/// Minimum contribution in USD with 18 decimals.
pub const MINIMUM_USD: U256 = U256::from_limbs([5_000_000_000_000_000_000, 0, 0, 0]);

/// 1e18
const PRECISION: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Storage of a `FundMe` contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FundMeContract {
    owner: Address,
    price_feed: Address,
    funders: Vec<Address>,
    amounts: HashMap<Address, U256>,
}

impl FundMeContract {
    /// `constructor(address priceFeed)`, the deployer becomes the owner.
    pub fn construct(frame: &mut Frame<'_>, args: &[u8]) -> Result<Self, Bytes> {
        let price_feed = Address::abi_decode(args).map_err(|_| Bytes::new())?;
        frame.sstore(true);
        Ok(Self { owner: frame.caller, price_feed, funders: Vec::new(), amounts: HashMap::new() })
    }

    pub fn call(&mut self, frame: &mut Frame<'_>, data: &[u8]) -> CallResult {
        let known =
            data.first_chunk::<4>().is_some_and(|selector| FundMeCalls::valid_selector(*selector));
        let call = match FundMeCalls::abi_decode(data) {
            Ok(call) => call,
            // `receive()` and `fallback()` both forward to `fund()`
            Err(_) if !known => return self.fund(frame),
            // known function with malformed arguments
            Err(_) => return Err(Bytes::new()),
        };
        if !matches!(call, FundMeCalls::fund(_)) {
            non_payable(frame)?;
        }

        match call {
            FundMeCalls::fund(_) => self.fund(frame),
            FundMeCalls::withdraw(_) | FundMeCalls::cheaperWithdraw(_) => self.withdraw(frame),
            FundMeCalls::MINIMUM_USD(_) => Ok(MINIMUM_USD.abi_encode().into()),
            FundMeCalls::getAddressToAmountFunded(call) => {
                frame.sload();
                Ok(self.amount_funded(call.fundingAddress).abi_encode().into())
            }
            FundMeCalls::getVersion(_) => {
                frame.sload();
                let version = frame.static_call(self.price_feed, &MockV3Aggregator::versionCall {})?;
                Ok(version.abi_encode().into())
            }
            FundMeCalls::getFunder(call) => {
                frame.sload();
                let funder = usize::try_from(call.index)
                    .ok()
                    .and_then(|index| self.funders.get(index))
                    .ok_or_else(|| panic(PanicKind::ArrayOutOfBounds))?;
                Ok(funder.abi_encode().into())
            }
            FundMeCalls::getOwner(_) => Ok(self.owner.abi_encode().into()),
            FundMeCalls::getPriceFeed(_) => {
                frame.sload();
                Ok(self.price_feed.abi_encode().into())
            }
        }
    }

    fn amount_funded(&self, funder: Address) -> U256 {
        self.amounts.get(&funder).copied().unwrap_or_default()
    }

    fn fund(&mut self, frame: &mut Frame<'_>) -> CallResult {
        let value = frame.value;
        if self.conversion_rate(frame, value)? < MINIMUM_USD {
            return Err(revert("You need to spend more ETH!"));
        }

        frame.sload();
        let funded = self.amount_funded(frame.caller);
        frame.sstore(funded.is_zero());
        let funded = funded.checked_add(value).ok_or_else(|| panic(PanicKind::UnderOverflow))?;
        self.amounts.insert(frame.caller, funded);

        // funders are only recorded once
        if !self.funders.contains(&frame.caller) {
            frame.sload();
            frame.sstore(self.funders.is_empty());
            frame.sstore(true);
            self.funders.push(frame.caller);
        }
        Ok(Bytes::new())
    }

    fn withdraw(&mut self, frame: &mut Frame<'_>) -> CallResult {
        if frame.caller != self.owner {
            return Err(FundMe::FundMe__NotOwner {}.abi_encode().into());
        }

        frame.sload();
        for funder in self.funders.drain(..) {
            frame.sload();
            frame.sstore(false);
            self.amounts.remove(&funder);
        }
        frame.sstore(false);

        let balance = frame.self_balance();
        frame.call(self.owner, &[], balance)?;
        Ok(Bytes::new())
    }

    /// The USD value of `eth_amount` wei, with 18 decimals.
    fn conversion_rate(&self, frame: &mut Frame<'_>, eth_amount: U256) -> Result<U256, Bytes> {
        frame.sload();
        let round = frame.static_call(self.price_feed, &MockV3Aggregator::latestRoundDataCall {})?;
        let decimals = frame.static_call(self.price_feed, &MockV3Aggregator::decimalsCall {})?;

        let overflow = || panic(PanicKind::UnderOverflow);
        let eth_price = to_wad(round.answer.into_raw(), decimals).ok_or_else(overflow)?;
        let usd = eth_price.checked_mul(eth_amount).ok_or_else(overflow)?;
        Ok(usd / PRECISION)
    }
}

/// Rescales a price with `decimals` decimals to 18, like `uint256(answer) * 1e10` for an 8
/// decimals feed.
fn to_wad(price: U256, decimals: u8) -> Option<U256> {
    if decimals <= 18 {
        price.checked_mul(U256::from(10).pow(U256::from(18 - decimals)))
    } else {
        Some(price / U256::from(10).pow(U256::from(decimals - 18)))
    }
}
