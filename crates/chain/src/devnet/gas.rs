//! Gas schedule of the devnet.
//!
//! Native contracts don't run bytecode, they charge the costs of the storage and call operations
//! their Solidity counterparts perform.

pub const TX_BASE: u64 = 21_000;
pub const TX_CREATE: u64 = 32_000;
pub const TX_DATA_ZERO: u64 = 4;
pub const TX_DATA_NON_ZERO: u64 = 16;
pub const CODE_DEPOSIT_PER_BYTE: u64 = 200;

pub const COLD_SLOAD: u64 = 2_100;
pub const SSTORE_SET: u64 = 20_000;
pub const SSTORE_RESET: u64 = 2_900;
pub const COLD_ACCOUNT_ACCESS: u64 = 2_600;
pub const CALL_VALUE: u64 = 9_000;

/// Gas charged before execution starts.
pub fn intrinsic_gas(input: &[u8], create: bool) -> u64 {
    let data: u64 =
        input.iter().map(|byte| if *byte == 0 { TX_DATA_ZERO } else { TX_DATA_NON_ZERO }).sum();
    TX_BASE + data + if create { TX_CREATE } else { 0 }
}

/// Tracks the gas used by a transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gas {
    used: u64,
}

impl Gas {
    pub fn new(intrinsic: u64) -> Self {
        Self { used: intrinsic }
    }

    pub fn record(&mut self, cost: u64) {
        self.used = self.used.saturating_add(cost);
    }

    pub fn used(&self) -> u64 {
        self.used
    }
}
