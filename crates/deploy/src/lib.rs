//! # fund-me-deploy
//!
//! Deploys the FundMe contracts: the mock price feed on the local chain, then `FundMe` itself.
//! Deployed addresses are recorded in [`Deployments`], which the scenario harness resolves
//! contracts from.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod deployments;
pub use deployments::{CHAIN_ID_FILE, DeployOptions, Deployment, Deployments};

mod error;
pub use error::DeploymentError;

pub mod steps;
pub use steps::{DeployContext, DeployStep, run_steps};
