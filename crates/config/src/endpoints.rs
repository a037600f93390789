//! Values that may reference environment variables: RPC urls and account keys.

use crate::resolve::{RE_PLACEHOLDER, UnresolvedEnvVarError, interpolate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Represents a single RPC endpoint url.
///
/// This type preserves the value as it's stored in the config. If the value is a reference to an
/// env var, then the `Env` variant holds the reference (`${SEPOLIA_RPC_URL}`) and _not_ the value
/// of the env var itself. Env vars are only resolved on [`RpcEndpointUrl::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RpcEndpointUrl {
    /// A raw Url (ws, http)
    Url(String),
    /// An endpoint that contains at least one `${ENV_VAR}` placeholder
    Env(String),
}

impl RpcEndpointUrl {
    /// Returns the url variant
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Env(_) => None,
        }
    }

    /// Returns the env variant
    pub fn as_env(&self) -> Option<&str> {
        match self {
            Self::Env(val) => Some(val),
            Self::Url(_) => None,
        }
    }

    /// Returns the url this type holds
    ///
    /// # Error
    ///
    /// Returns an error if the type holds a reference to an env var and the env var is not set
    pub fn resolve(&self) -> Result<String, UnresolvedEnvVarError> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::Env(val) => interpolate(val),
        }
    }
}

impl fmt::Display for RpcEndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => url.fmt(f),
            Self::Env(var) => var.fmt(f),
        }
    }
}

impl From<&str> for RpcEndpointUrl {
    fn from(val: &str) -> Self {
        if RE_PLACEHOLDER.is_match(val) { Self::Env(val.to_string()) } else { Self::Url(val.to_string()) }
    }
}

impl Serialize for RpcEndpointUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RpcEndpointUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let val = String::deserialize(deserializer)?;
        Ok(Self::from(val.as_str()))
    }
}

/// A private key used to sign transactions on a network.
///
/// Works the same way as [`RpcEndpointUrl`]: the raw key or a `${PRIVATE_KEY}` reference.
#[derive(Clone, PartialEq, Eq)]
pub enum AccountKey {
    Raw(String),
    Env(String),
}

impl AccountKey {
    /// Returns the key this type holds
    ///
    /// # Error
    ///
    /// Returns an error if the type holds a reference to an env var and the env var is not set
    pub fn resolve(&self) -> Result<String, UnresolvedEnvVarError> {
        match self {
            Self::Raw(key) => Ok(key.clone()),
            Self::Env(var) => interpolate(var),
        }
    }
}

// Never print raw keys.
impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(_) => f.write_str("AccountKey::Raw(<redacted>)"),
            Self::Env(var) => f.debug_tuple("AccountKey::Env").field(var).finish(),
        }
    }
}

impl From<&str> for AccountKey {
    fn from(val: &str) -> Self {
        if RE_PLACEHOLDER.is_match(val) { Self::Env(val.to_string()) } else { Self::Raw(val.to_string()) }
    }
}

impl Serialize for AccountKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Raw(key) | Self::Env(key) => serializer.serialize_str(key),
        }
    }
}

impl<'de> Deserialize<'de> for AccountKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let val = String::deserialize(deserializer)?;
        Ok(Self::from(val.as_str()))
    }
}
