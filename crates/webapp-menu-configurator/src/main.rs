//! Headless settings check for the Web App Menu extension.
//!
//! Loads the settings document the way the preferences dialog does, logs
//! every diagnostic, and prints the repaired document to stdout.  Nothing is
//! written back.
//!
//! # Environment
//!
//! | Variable                    | Default                                   |
//! |-----------------------------|-------------------------------------------|
//! | `WEBAPP_MENU_SETTINGS_FILE` | the extension's `settings.json` in the user data dir |
//! | `RUST_LOG`                  | `info`                                    |

use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use webapp_menu_configurator::infrastructure::storage::paths::default_settings_path;
use webapp_menu_configurator::load_settings;

const SETTINGS_FILE_ENV: &str = "WEBAPP_MENU_SETTINGS_FILE";

fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`.  Logs go to stderr so stdout stays
    // valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = resolve_settings_path()?;
    let outcome = load_settings(&path);

    for diagnostic in &outcome.diagnostics {
        eprintln!("{diagnostic}");
    }
    if outcome.needs_save() {
        info!("applying from the configurator would rewrite {}", path.display());
    }

    let json = serde_json::to_string_pretty(&outcome.settings)
        .context("failed to serialize settings")?;
    println!("{json}");
    Ok(())
}

fn resolve_settings_path() -> anyhow::Result<PathBuf> {
    match std::env::var_os(SETTINGS_FILE_ENV).filter(|v| !v.is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => {
            let path = default_settings_path()
                .with_context(|| format!("{SETTINGS_FILE_ENV} is not set"))?;
            warn!("File name not specified, using {} by default.", path.display());
            Ok(path)
        }
    }
}
