use crate::error::CompareError;

/// Default cap on each input file: 1 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 1_048_576;

/// Compare host configuration loaded from environment variables.
///
/// All fields have defaults suitable for interactive use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    /// Largest input file accepted, in bytes (default: 1 MiB).
    pub max_input_bytes: u64,
    /// Print unchanged lines as well as changes (default: `true`).
    pub show_context: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            show_context: true,
        }
    }
}

impl CompareConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default   |
    /// |-------------------|-----------|
    /// | `MAX_INPUT_BYTES` | `1048576` |
    /// | `SHOW_CONTEXT`    | `true`    |
    pub fn from_env() -> Result<Self, CompareError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CompareError> {
        let defaults = Self::default();

        let max_input_bytes = match lookup("MAX_INPUT_BYTES") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                CompareError::Config(format!("MAX_INPUT_BYTES must be a valid u64 (got '{raw}')"))
            })?,
            None => defaults.max_input_bytes,
        };

        let show_context = match lookup("SHOW_CONTEXT") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                CompareError::Config(format!("SHOW_CONTEXT must be true or false (got '{raw}')"))
            })?,
            None => defaults.show_context,
        };

        Ok(Self {
            max_input_bytes,
            show_context,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = CompareConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CompareConfig::default());
        assert_eq!(config.max_input_bytes, 1024 * 1024);
        assert!(config.show_context);
    }

    #[test]
    fn reads_overrides() {
        let config =
            CompareConfig::from_lookup(lookup(&[("MAX_INPUT_BYTES", "2048"), ("SHOW_CONTEXT", "off")]))
                .unwrap();
        assert_eq!(config.max_input_bytes, 2048);
        assert!(!config.show_context);
    }

    #[test]
    fn rejects_invalid_limit() {
        let err = CompareConfig::from_lookup(lookup(&[("MAX_INPUT_BYTES", "lots")])).unwrap_err();
        assert!(err.to_string().contains("MAX_INPUT_BYTES"));
    }

    #[test]
    fn rejects_invalid_flag() {
        let err = CompareConfig::from_lookup(lookup(&[("SHOW_CONTEXT", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("SHOW_CONTEXT"));
    }
}
