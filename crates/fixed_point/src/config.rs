//! Codec configuration

use crate::strategy::ErrorStrategy;

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Strategy used by [`crate::Codec::encode`]
    pub error_strategy: ErrorStrategy,

    /// Keep parsed layouts keyed by specifier string
    pub memoize_formats: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            error_strategy: ErrorStrategy::Raise,
            memoize_formats: true,
        }
    }
}

impl CodecConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(strategy) = lookup("QCODEC_ERROR_STRATEGY") {
            match strategy.trim().parse() {
                Ok(s) => config.error_strategy = s,
                Err(e) => tracing::warn!("Ignoring QCODEC_ERROR_STRATEGY: {}", e),
            }
        }

        if let Some(memoize) = lookup("QCODEC_MEMOIZE_FORMATS") {
            match parse_flag(&memoize) {
                Some(m) => config.memoize_formats = m,
                None => tracing::warn!("Ignoring QCODEC_MEMOIZE_FORMATS: {:?} is not a boolean", memoize),
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CodecConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.error_strategy, ErrorStrategy::Raise);
        assert!(config.memoize_formats);
    }

    #[test]
    fn test_overrides() {
        let config = CodecConfig::from_lookup(lookup(&[
            ("QCODEC_ERROR_STRATEGY", "skip"),
            ("QCODEC_MEMOIZE_FORMATS", "0"),
        ]));
        assert_eq!(config.error_strategy, ErrorStrategy::Skip);
        assert!(!config.memoize_formats);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = CodecConfig::from_lookup(lookup(&[
            ("QCODEC_ERROR_STRATEGY", "pass"),
            ("QCODEC_MEMOIZE_FORMATS", "maybe"),
        ]));
        assert_eq!(config, CodecConfig::default());
    }
}
