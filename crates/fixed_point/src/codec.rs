//! Configured codec handle with a layout cache

use dashmap::DashMap;

use crate::config::CodecConfig;
use crate::error::Result;
use crate::fixed::BitPattern;
use crate::format::QFormat;
use crate::strategy::ErrorStrategy;

/// Codec that remembers parsed layouts
///
/// Layouts are immutable and derived only from their specifier, so the
/// cache never changes a result. Safe to share between threads.
#[derive(Debug, Default)]
pub struct Codec {
    config: CodecConfig,
    formats: DashMap<String, QFormat>,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            formats: DashMap::new(),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Look up or parse the layout for `specifier`
    ///
    /// Only valid layouts are cached, keyed by their canonical spelling, so
    /// the cache holds at most one entry per distinct layout. Other
    /// spellings such as `U01Q1` are re-parsed on every call.
    pub fn format(&self, specifier: &str) -> Result<QFormat> {
        if !self.config.memoize_formats {
            return QFormat::parse(specifier);
        }

        if let Some(format) = self.formats.get(specifier) {
            return Ok(*format);
        }

        let format = QFormat::parse(specifier)?;
        let key = format.to_string();
        if !self.formats.contains_key(&key) {
            tracing::debug!(format = %key, cached = self.formats.len(), "Caching layout");
        }
        self.formats.entry(key).or_insert(format);
        Ok(format)
    }

    /// Encode with the configured strategy
    pub fn encode(&self, specifier: &str, value: f64) -> Result<u128> {
        self.encode_with(specifier, value, self.config.error_strategy)
    }

    pub fn encode_with(&self, specifier: &str, value: f64, strategy: ErrorStrategy) -> Result<u128> {
        self.format(specifier)?.encode(value, strategy)
    }

    pub fn decode<P: BitPattern>(&self, specifier: &str, bits: P) -> Result<f64> {
        self.format(specifier)?.decode(bits)
    }

    /// Number of cached layouts
    pub fn cached_formats(&self) -> usize {
        self.formats.len()
    }

    pub fn clear_cache(&self) {
        self.formats.clear();
    }
}
