//! Configuration file for `gridcalc`.
//!
//! Read from `--config <path>`, or from `gridcalc.toml` in the working
//! directory when that file exists. Every key is optional.
//!
//! # Example
//!
//! ```toml
//! [eval]
//! max_depth = 128
//! ```

use std::path::Path;

use gridcalc_eval::EvalOptions;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "gridcalc.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// `[eval]` section, handed to the evaluator unchanged.
    #[serde(default)]
    pub eval: EvalOptions,
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Parse configuration from TOML text.
pub fn parse_config(content: &str, origin: &Path) -> Result<Config, String> {
    toml::from_str(content).map_err(|e| format!("could not parse '{}': {}", origin.display(), e))
}

/// Read the configuration named on the command line, falling back to
/// [`DEFAULT_CONFIG_FILE`] and then to defaults.
///
/// An explicitly named file must exist; the fallback file is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                log::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(Config::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    let config = parse_config(&content, path)?;
    log::debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Effective evaluation options: the config file's `[eval]` table with
/// `--max-depth` applied on top.
pub fn eval_options(config: &Config, max_depth: Option<usize>) -> EvalOptions {
    let mut options = config.eval.clone();
    if let Some(depth) = max_depth {
        options.max_depth = depth;
    }
    options
}
