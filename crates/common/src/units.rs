//! Ether amounts.

use alloy_primitives::{
    U256,
    utils::{ParseUnits, UnitsError, parse_ether},
};

/// One ether in wei.
pub const WEI_PER_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Parses a decimal ether amount like `0.1` into wei.
pub fn ether(amount: &str) -> Result<U256, UnitsError> {
    parse_ether(amount)
}

/// Parses an amount with an optional unit suffix: `0.1`, `0.1ether`, `100gwei`, `42wei`.
///
/// Amounts without a unit are ether.
pub fn parse_value(value: &str) -> Result<U256, UnitsError> {
    let value = value.trim();
    for unit in ["ether", "gwei", "wei"] {
        if let Some(amount) = value.strip_suffix(unit) {
            return alloy_primitives::utils::parse_units(amount.trim(), unit).map(ParseUnits::get_absolute);
        }
    }
    ether(value)
}
