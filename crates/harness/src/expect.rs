//! Assertions on the outcome of contract calls.

use eyre::{Result, bail};
use fund_me_chain::ChainResult;
use fund_me_common::RevertReason;

/// Fails the current case unless both sides are equal.
macro_rules! ensure_eq {
    ($left:expr, $right:expr $(,)?) => {{
        let (left, right) = (&$left, &$right);
        if left != right {
            ::eyre::bail!("assertion failed: {left} != {right}");
        }
    }};
    ($left:expr, $right:expr, $($msg:tt)+) => {{
        let (left, right) = (&$left, &$right);
        if left != right {
            ::eyre::bail!("{}: {left} != {right}", format_args!($($msg)+));
        }
    }};
}

/// Expects `result` to be a revert with the reason string `expected`.
pub fn expect_revert<T>(result: ChainResult<T>, expected: &str) -> Result<()> {
    let reason = expect_reverted(result)?;
    if reason.message() != Some(expected) {
        bail!("Error != expected error: {reason} != {expected}");
    }
    Ok(())
}

/// Expects `result` to be a revert with the custom error `name`.
pub fn expect_custom_error<T>(result: ChainResult<T>, name: &str) -> Result<()> {
    let reason = expect_reverted(result)?;
    if reason.custom_error() != Some(name) {
        bail!("Error != expected error: {reason} != {name}()");
    }
    Ok(())
}

/// Expects `result` to be a revert for any reason, returning the reason.
///
/// Errors other than reverts are passed through.
pub fn expect_reverted<T>(result: ChainResult<T>) -> Result<RevertReason> {
    match result {
        Ok(_) => bail!("call did not revert as expected"),
        Err(err) => match err.revert_reason() {
            Some(reason) => Ok(reason),
            None => Err(err.into()),
        },
    }
}
