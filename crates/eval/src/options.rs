use serde::{Deserialize, Serialize};

/// Default bound on nested reference resolutions.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Evaluation settings. Deserializes from a partial table; missing keys take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Longest chain of open reference resolutions (origin cell included)
    /// before evaluation gives up. Independent of cycle detection.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalOptions {
    pub fn with_max_depth(max_depth: usize) -> Self {
        EvalOptions { max_depth }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let opts: EvalOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, EvalOptions::default());
        let opts: EvalOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(opts.max_depth, 8);
    }
}
