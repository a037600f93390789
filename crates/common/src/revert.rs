//! Decoding of revert data returned by rejected calls.

use crate::abi::FundMe;
use alloy_primitives::{Bytes, Selector, U256, hex};
use alloy_sol_types::{Panic, Revert, SolError};
use std::fmt;

/// Length of a function or error selector.
pub const SELECTOR_LEN: usize = 4;

/// Custom errors the harness knows the name of.
const KNOWN_ERRORS: &[([u8; SELECTOR_LEN], &str)] =
    &[(FundMe::FundMe__NotOwner::SELECTOR, "FundMe__NotOwner")];

/// The decoded reason of a revert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevertReason {
    /// `Error(string)`, i.e. `require(cond, "message")`
    Message(String),
    /// `Panic(uint256)` raised by failed assertions, out of bounds access, arithmetic errors..
    Panic(U256),
    /// A custom error known by name
    Custom { name: &'static str, data: Bytes },
    /// Anything else, including an empty revert
    Raw(Bytes),
}

impl RevertReason {
    /// Returns the revert message if this is an `Error(string)` revert.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the name of the custom error.
    pub fn custom_error(&self) -> Option<&'static str> {
        match self {
            Self::Custom { name, .. } => Some(*name),
            _ => None,
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panic(_))
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            Self::Panic(code) => Panic { code: *code }.fmt(f),
            Self::Custom { name, .. } => write!(f, "{name}()"),
            Self::Raw(data) if data.is_empty() => f.write_str("EvmError: Revert"),
            Self::Raw(data) => write!(f, "custom error {}", hex::encode_prefixed(data)),
        }
    }
}

/// Tries to decode the revert reason from the given revert bytes.
///
/// Unknown payloads are returned as [`RevertReason::Raw`].
pub fn decode_revert(err: &[u8]) -> RevertReason {
    if err.len() < SELECTOR_LEN {
        return RevertReason::Raw(Bytes::copy_from_slice(err));
    }

    let selector = Selector::from_slice(&err[..SELECTOR_LEN]).0;
    match selector {
        Revert::SELECTOR => {
            if let Ok(revert) = Revert::abi_decode(err) {
                return RevertReason::Message(revert.reason);
            }
        }
        Panic::SELECTOR => {
            if let Ok(panic) = Panic::abi_decode(err) {
                return RevertReason::Panic(panic.code);
            }
        }
        _ => {
            if let Some(&(_, name)) = KNOWN_ERRORS.iter().find(|(known, _)| *known == selector) {
                return RevertReason::Custom { name, data: Bytes::copy_from_slice(err) };
            }
        }
    }
    RevertReason::Raw(Bytes::copy_from_slice(err))
}
