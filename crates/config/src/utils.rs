//! Utility functions

use crate::Config;
use std::path::{Path, PathBuf};

/// Returns the root path to set for the project root
///
/// traverse the dir tree up and look for a `fund-me.toml` file starting at the given path or cwd,
/// or a `hardhat.config.js` when the harness runs next to a hardhat project:
///
/// ```text
/// -- repo
///   |__ fund-me.toml
///   |__ sub
///      |__ [given_path | cwd]
/// ```
/// will detect `repo` as root. Falls back to the starting dir if no marker file exists.
pub fn find_project_root(path: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let start = path.unwrap_or(&cwd);
    for dir in start.ancestors() {
        if [Config::FILE_NAME, "hardhat.config.js"].iter().any(|marker| dir.join(marker).is_file()) {
            return Ok(dir.to_path_buf());
        }
    }
    Ok(start.to_path_buf())
}
