//! The scenario suites.

use crate::ScenarioContext;
use fund_me_config::ExecutionMode;
use std::{fmt, future::Future, pin::Pin};

mod local;
mod staging;

pub use local::{CONSTRUCTOR, FUND, LOCAL_SEND_VALUE, WITHDRAW};
pub use staging::{STAGING, STAGING_SEND_VALUE};

/// Future returned by a case or setup step.
pub type CaseFuture<'a> = Pin<Box<dyn Future<Output = eyre::Result<()>> + Send + 'a>>;

/// A case or setup step.
pub type CaseFn = for<'a> fn(&'a mut ScenarioContext) -> CaseFuture<'a>;

/// A single scenario.
#[derive(Clone, Copy)]
pub struct Case {
    pub name: &'static str,
    pub run: CaseFn,
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A group of cases sharing a setup, run in one execution mode only.
#[derive(Clone, Copy)]
pub struct Suite {
    pub name: &'static str,
    pub mode: ExecutionMode,
    /// Runs before every case
    pub setup: Option<CaseFn>,
    pub cases: &'static [Case],
}

impl Suite {
    /// The name cases are filtered by: `<suite> <case>`.
    pub fn full_name(&self, case: &Case) -> String {
        format!("{} {}", self.name, case.name)
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("cases", &self.cases)
            .finish_non_exhaustive()
    }
}

/// All suites, in the order they run.
pub const ALL: &[Suite] = &[CONSTRUCTOR, FUND, WITHDRAW, STAGING];
