//! The `eyre` hook of the `fund-me` binary.

use eyre::EyreHandler;
use fund_me_chain::ChainError;
use fund_me_common::errors::dedup_chain;
use fund_me_config::{ConfigError, UnresolvedEnvVarError};
use fund_me_deploy::DeploymentError;
use itertools::Itertools;
use std::{error::Error, fmt};
use yansi::Paint;

/// Prints the deduplicated error chain, followed by a hint on how to fix errors caused by the
/// project setup.
#[derive(Debug, Default)]
pub struct Handler {
    verbose: bool,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the raw `Debug` output of every error instead of the deduplicated chain.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verbose || f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let messages = dedup_chain(error);
        let Some((message, causes)) = messages.split_first() else { return Ok(()) };
        f.write_str(message)?;

        if !causes.is_empty() {
            write!(f, "\n\nCaused by:")?;
            for (n, cause) in causes.iter().enumerate() {
                write!(f, "\n  {n:>2}: {cause}")?;
            }
        }

        if let Some(hint) = hint(error) {
            write!(f, "\n\n{} {hint}", "hint:".yellow().bold())?;
        }

        Ok(())
    }
}

/// What to change in the project to fix the first error of the chain that has a known fix.
fn hint(error: &(dyn Error + 'static)) -> Option<String> {
    let mut next = Some(error);
    while let Some(err) = next {
        let hint = if let Some(err) = err.downcast_ref::<DeploymentError>() {
            match err {
                DeploymentError::Config(err) => config_hint(err),
                DeploymentError::Chain(err) => chain_hint(err),
                _ => None,
            }
        } else if let Some(err) = err.downcast_ref::<ChainError>() {
            chain_hint(err)
        } else if let Some(err) = err.downcast_ref::<ConfigError>() {
            config_hint(err)
        } else {
            err.downcast_ref::<UnresolvedEnvVarError>().map(env_var_hint)
        };
        if hint.is_some() {
            return hint;
        }
        next = err.source();
    }
    None
}

fn config_hint(err: &ConfigError) -> Option<String> {
    match err {
        ConfigError::UnknownNetwork { name, .. } => {
            Some(format!("add a `[profile.default.networks.{name}]` section to `fund-me.toml`"))
        }
        ConfigError::UnknownNamedAccount(name) => {
            Some(format!("add `{name}` to `[profile.default.named_accounts]` in `fund-me.toml`"))
        }
    }
}

fn chain_hint(err: &ChainError) -> Option<String> {
    match err {
        // transparent, so the env var error is not part of the source chain
        ChainError::UnresolvedEnvVar(err) => Some(env_var_hint(err)),
        ChainError::ChainIdMismatch { .. } => {
            Some("check the `chain_id` of the network in `fund-me.toml`".to_string())
        }
        _ => None,
    }
}

fn env_var_hint(err: &UnresolvedEnvVarError) -> String {
    format!("set `{}` in the environment or in the project's `.env` file", err.var)
}

/// Installs the [`eyre`] hook as the global one.
///
/// If `FUND_ME_DEBUG` is set in the environment errors are printed with their raw `Debug` output.
pub fn install() {
    let verbose = std::env::var_os("FUND_ME_DEBUG").is_some();
    if let Err(e) = eyre::set_hook(Box::new(move |_| Box::new(Handler::new().verbose(verbose)))) {
        debug!("failed to install eyre error hook: {e}");
    }
}
