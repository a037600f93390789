//! Contracts the devnet implements natively.
//!
//! They speak the Solidity ABI of their on-chain counterparts so callers can't tell the
//! difference.

use super::executor::{CallResult, Frame};
use alloy_primitives::Bytes;
use alloy_sol_types::{Panic, PanicKind, Revert, SolError};
use fund_me_common::abi::names;

mod fund_me;
pub use fund_me::{FundMeContract, MINIMUM_USD};

mod mock_aggregator;
pub use mock_aggregator::MockV3AggregatorContract;

/// A deployed native contract and its storage.
#[derive(Clone, Debug)]
pub enum NativeContract {
    FundMe(FundMeContract),
    MockV3Aggregator(MockV3AggregatorContract),
}

impl NativeContract {
    pub fn call(&mut self, frame: &mut Frame<'_>, data: &[u8]) -> CallResult {
        match self {
            Self::FundMe(contract) => contract.call(frame, data),
            Self::MockV3Aggregator(contract) => contract.call(frame, data),
        }
    }

    pub fn kind(&self) -> NativeKind {
        match self {
            Self::FundMe(_) => NativeKind::FundMe,
            Self::MockV3Aggregator(_) => NativeKind::MockV3Aggregator,
        }
    }
}

/// The contracts that can be deployed on the devnet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeKind {
    FundMe,
    MockV3Aggregator,
}

impl NativeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            names::FUND_ME => Some(Self::FundMe),
            names::MOCK_V3_AGGREGATOR => Some(Self::MockV3Aggregator),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FundMe => names::FUND_ME,
            Self::MockV3Aggregator => names::MOCK_V3_AGGREGATOR,
        }
    }

    /// Size of the runtime code of the compiled contract, which the deployment pays for.
    pub fn code_size(self) -> usize {
        match self {
            Self::FundMe => 2_034,
            Self::MockV3Aggregator => 1_589,
        }
    }

    /// Runs the constructor.
    pub fn construct(self, frame: &mut Frame<'_>, args: &[u8]) -> Result<NativeContract, Bytes> {
        match self {
            Self::FundMe => FundMeContract::construct(frame, args).map(NativeContract::FundMe),
            Self::MockV3Aggregator => {
                MockV3AggregatorContract::construct(frame, args).map(NativeContract::MockV3Aggregator)
            }
        }
    }
}

/// `require(false, message)`
fn revert(message: &str) -> Bytes {
    Revert::from(message).abi_encode().into()
}

/// Compiler inserted checks, e.g. arithmetic overflow.
fn panic(kind: PanicKind) -> Bytes {
    Panic::from(kind).abi_encode().into()
}

/// The empty revert of the compiler's callvalue check on non payable functions.
fn non_payable(frame: &Frame<'_>) -> Result<(), Bytes> {
    if frame.value.is_zero() { Ok(()) } else { Err(Bytes::new()) }
}
