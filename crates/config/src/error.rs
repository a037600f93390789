//! Config errors

use std::fmt;

/// The message shown if the config could not be extracted from the figment
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract fund-me config:";

/// Represents a failed attempt to extract `Config` from a `Figment`
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    error: figment::Error,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }

    /// One line per invalid setting: where the value came from, the setting and what's wrong
    /// with it, e.g.
    ///
    /// ```text
    /// fund-me.toml: invalid type: found string "x", expected u64 for setting `local_chain_id`
    /// ```
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        for err in self.error.clone() {
            let origin = match err.metadata.as_ref() {
                Some(meta) => match meta.source.as_ref().and_then(|source| source.file_path()) {
                    Some(path) => match path.file_name() {
                        Some(name) => name.to_string_lossy().into_owned(),
                        None => path.display().to_string(),
                    },
                    None => meta.name.to_string(),
                },
                None => "fund-me config".to_string(),
            };
            let mut reason = format!("{origin}: {}", err.kind);
            if !err.path.is_empty() {
                reason.push_str(&format!(" for setting `{}`", err.path.join(".")));
            }
            if !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }
        reasons
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FAILED_TO_EXTRACT_CONFIG_MSG)?;
        for reason in self.reasons() {
            write!(f, "\n  {reason}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ExtractConfigError {}

/// Errors raised when looking up values in an extracted `Config`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown network `{name}`, configured networks: {}", known.join(", "))]
    UnknownNetwork { name: String, known: Vec<String> },
    #[error("unknown named account `{0}`")]
    UnknownNamedAccount(String),
}
