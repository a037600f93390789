//! Common utilities shared by the FundMe deploy and test harness.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod abi;
pub mod errors;
pub mod revert;
pub mod units;

pub use revert::{RevertReason, SELECTOR_LEN, decode_revert};
