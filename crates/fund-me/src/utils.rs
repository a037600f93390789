//! Setup of the process: logging, `.env` files, colors and the runtime.

use eyre::Result;
use fund_me_config::find_project_root;
use std::path::Path;
use tokio::runtime::Runtime;

/// Initializes a tracing Subscriber for logging
pub fn subscriber() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Loads a `.env` file from the current directory and from the project root.
///
/// Variables that are already set are not overridden, so the current directory takes precedence.
pub fn load_dotenv() {
    let load = |dir: &Path| {
        let path = dir.join(".env");
        match dotenvy::from_path(&path) {
            Ok(()) => debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!(path = %path.display(), %err, "failed to load .env"),
        }
    };
    if let Ok(cwd) = std::env::current_dir() {
        load(&cwd);
    }
    if let Ok(root) = find_project_root(None) {
        load(&root);
    }
}

/// Enables colored output on terminals, unless disabled through `NO_COLOR`.
pub fn enable_paint() {
    yansi::whenever(yansi::Condition::TTY_AND_COLOR);
}

/// Creates the multi-threaded runtime the commands run on.
pub fn tokio_runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread().enable_all().build()?)
}
