/// `load_config` module: loads the static YAML config for `lo-tree sync`.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into [`SyncConfig`]
/// - Apply the `LO_TREE_OUTPUT_DIR` environment override (optionally from `.env`)
/// - Report read and parse failures with the offending path
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Overrides `output_dir` when set to a non-empty value.
pub const OUTPUT_DIR_ENV: &str = "LO_TREE_OUTPUT_DIR";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Directory the file-backed writer stores records under.
    pub output_dir: PathBuf,
    /// Course ids to fetch summaries for, e.g. `full-stack-1`.
    #[serde(default)]
    pub courses: Vec<String>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SyncConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let mut config: SyncConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
        if !dir.is_empty() {
            info!(output_dir = %dir, "Output directory overridden from environment");
            config.output_dir = PathBuf::from(dir);
        }
    }

    info!(
        output_dir = %config.output_dir.display(),
        courses = config.courses.len(),
        "Config loaded"
    );
    Ok(config)
}
