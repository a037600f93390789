//! Compiled contract artifacts.

use alloy_primitives::{Bytes, hex};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A deployable contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
    pub name: String,
    /// Creation bytecode. Empty for contracts implemented natively by the devnet.
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn new(name: impl Into<String>, bytecode: Bytes) -> Self {
        Self { name: name.into(), bytecode }
    }

    /// An artifact resolved by name only, for contracts the devnet implements natively.
    pub fn native(name: impl Into<String>) -> Self {
        Self::new(name, Bytes::new())
    }

    pub fn is_native(&self) -> bool {
        self.bytecode.is_empty()
    }
}

/// Errors reading artifacts
#[derive(Debug, thiserror::Error)]
pub enum ArtifactsError {
    #[error("failed to read artifacts in {}: {source}", path.display())]
    Walk { path: PathBuf, source: walkdir::Error },
    #[error("failed to read artifact {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid bytecode in artifact {}: {source}", path.display())]
    Bytecode { path: PathBuf, source: hex::FromHexError },
}

/// Artifact file layout shared by hardhat and foundry.
///
/// Hardhat: `{"contractName": "FundMe", "bytecode": "0x.."}`,
/// foundry: `{"bytecode": {"object": "0x.."}}` named after the file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    contract_name: Option<String>,
    bytecode: ArtifactBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Hex(String),
    Object { object: String },
}

impl ArtifactBytecode {
    fn as_hex(&self) -> &str {
        match self {
            Self::Hex(hex) | Self::Object { object: hex } => hex,
        }
    }
}

/// All contract artifacts found in a build output dir, by contract name.
#[derive(Clone, Debug, Default)]
pub struct Artifacts {
    artifacts: BTreeMap<String, ContractArtifact>,
}

impl Artifacts {
    /// Reads every artifact under `dir`, hardhat's `artifacts/` or foundry's `out/`.
    ///
    /// Debug files, build infos and JSON files that are not contract artifacts are skipped, as
    /// are abstract contracts and interfaces, which have no bytecode. A missing dir yields no
    /// artifacts.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactsError> {
        let dir = dir.as_ref();
        let mut artifacts = BTreeMap::new();
        if !dir.exists() {
            debug!(target: "artifacts", dir = %dir.display(), "no artifacts dir");
            return Ok(Self { artifacts });
        }

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|source| ArtifactsError::Walk { path: dir.to_path_buf(), source })?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else { continue };
            if !entry.file_type().is_file()
                || !file_name.ends_with(".json")
                || file_name.ends_with(".dbg.json")
                || path.components().any(|c| c.as_os_str() == "build-info")
            {
                continue;
            }

            let content = std::fs::read_to_string(path)
                .map_err(|source| ArtifactsError::Io { path: path.to_path_buf(), source })?;
            let Ok(file) = serde_json::from_str::<ArtifactFile>(&content) else {
                trace!(target: "artifacts", path = %path.display(), "skipping non artifact file");
                continue;
            };
            let hex_code = file.bytecode.as_hex();
            if hex_code.trim_start_matches("0x").is_empty() {
                continue;
            }
            let bytecode = hex::decode(hex_code)
                .map_err(|source| ArtifactsError::Bytecode { path: path.to_path_buf(), source })?;
            let name = file
                .contract_name
                .unwrap_or_else(|| file_name.trim_end_matches(".json").to_string());
            trace!(target: "artifacts", %name, path = %path.display(), "found artifact");
            artifacts.insert(name.clone(), ContractArtifact::new(name, bytecode.into()));
        }

        Ok(Self { artifacts })
    }

    pub fn get(&self, name: &str) -> Option<&ContractArtifact> {
        self.artifacts.get(name)
    }

    /// Returns the artifact named `name`, falling back to a native artifact.
    pub fn get_or_native(&self, name: &str) -> ContractArtifact {
        self.get(name).cloned().unwrap_or_else(|| ContractArtifact::native(name))
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
