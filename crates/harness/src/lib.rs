//! # fund-me-harness
//!
//! Scenario tests of the deployed FundMe contracts.
//!
//! On local networks the full scenario tree runs against the mock price feed, every case starting
//! from the freshly deployed contracts. On live networks only the staging scenario runs.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

#[macro_use]
pub mod expect;

pub mod contract;
pub use contract::{ContractHandle, FundMeHandle, GasMeter, MockV3AggregatorHandle};

mod context;
pub use context::ScenarioContext;

pub mod report;

pub mod result;
pub use result::{SuiteResult, TestOutcome, TestResult, TestStatus};

mod runner;
pub use runner::ScenarioRunner;

pub mod suites;
pub use suites::{Case, Suite};
