use super::non_payable;
use crate::devnet::executor::{CallResult, Frame};
use alloy_primitives::{Bytes, I256, U256, aliases::U80};
use alloy_sol_types::{SolCall, SolInterface, SolType, SolValue, sol_data};
use fund_me_common::abi::MockV3Aggregator::{self, MockV3AggregatorCalls};
use std::collections::HashMap;

/// `version` of chainlink's mock aggregator.
pub const VERSION: U256 = U256::from_limbs([4, 0, 0, 0]);

pub const DESCRIPTION: &str = "v0.8/tests/MockV3Aggregator.sol";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Round {
    answer: I256,
    timestamp: U256,
    started_at: U256,
}

/// Storage of a `MockV3Aggregator` price feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockV3AggregatorContract {
    decimals: u8,
    latest_answer: I256,
    latest_timestamp: U256,
    latest_round: U256,
    rounds: HashMap<U256, Round>,
}

impl MockV3AggregatorContract {
    /// `constructor(uint8 _decimals, int256 _initialAnswer)`
    pub fn construct(frame: &mut Frame<'_>, args: &[u8]) -> Result<Self, Bytes> {
        let (decimals, initial_answer) =
            <(sol_data::Uint<8>, sol_data::Int<256>) as SolType>::abi_decode_params(args)
                .map_err(|_| Bytes::new())?;
        frame.sstore(true);
        let mut feed = Self {
            decimals,
            latest_answer: I256::ZERO,
            latest_timestamp: U256::ZERO,
            latest_round: U256::ZERO,
            rounds: HashMap::new(),
        };
        feed.update_answer(frame, initial_answer);
        Ok(feed)
    }

    pub fn call(&mut self, frame: &mut Frame<'_>, data: &[u8]) -> CallResult {
        // no receive or fallback
        let call = MockV3AggregatorCalls::abi_decode(data).map_err(|_| Bytes::new())?;
        non_payable(frame)?;

        match call {
            MockV3AggregatorCalls::decimals(_) => {
                frame.sload();
                Ok(U256::from(self.decimals).abi_encode().into())
            }
            MockV3AggregatorCalls::description(_) => Ok(DESCRIPTION.to_string().abi_encode().into()),
            MockV3AggregatorCalls::version(_) => Ok(VERSION.abi_encode().into()),
            MockV3AggregatorCalls::latestAnswer(_) => {
                frame.sload();
                Ok(self.latest_answer.abi_encode().into())
            }
            MockV3AggregatorCalls::latestRound(_) => {
                frame.sload();
                Ok(self.latest_round.abi_encode().into())
            }
            MockV3AggregatorCalls::latestTimestamp(_) => {
                frame.sload();
                Ok(self.latest_timestamp.abi_encode().into())
            }
            MockV3AggregatorCalls::latestRoundData(_) => {
                frame.sload();
                frame.sload();
                frame.sload();
                frame.sload();
                let round = self.rounds.get(&self.latest_round).copied().unwrap_or_default();
                let id = U80::saturating_from(self.latest_round);
                let ret = MockV3Aggregator::latestRoundDataReturn {
                    roundId: id,
                    answer: round.answer,
                    startedAt: round.started_at,
                    updatedAt: round.timestamp,
                    answeredInRound: id,
                };
                Ok(MockV3Aggregator::latestRoundDataCall::abi_encode_returns(&ret).into())
            }
            MockV3AggregatorCalls::updateAnswer(call) => {
                self.update_answer(frame, call._answer);
                Ok(Bytes::new())
            }
        }
    }

    fn update_answer(&mut self, frame: &mut Frame<'_>, answer: I256) {
        let timestamp = U256::from(frame.timestamp());
        let is_first = self.latest_round.is_zero();
        self.latest_answer = answer;
        self.latest_timestamp = timestamp;
        self.latest_round += U256::from(1);
        self.rounds.insert(self.latest_round, Round { answer, timestamp, started_at: timestamp });
        // latestAnswer, latestTimestamp and latestRound, then the three round mappings
        for _ in 0..3 {
            frame.sstore(is_first);
        }
        for _ in 0..3 {
            frame.sstore(true);
        }
    }
}
