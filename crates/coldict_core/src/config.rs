//! Dictionary configuration.

use crate::export::ExportOptions;

/// Default fuzzy-match threshold on the 0–100 scale.
pub const DEFAULT_THRESHOLD: u8 = 75;

/// Configuration for opening a dictionary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Threshold used by callers that do not pick one per query.
    pub default_threshold: u8,

    /// Whether the stored document is pretty-printed.
    pub pretty_document: bool,

    /// How records are exported.
    pub export: ExportOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            pretty_document: false,
            export: ExportOptions::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default fuzzy-match threshold.
    #[must_use]
    pub const fn default_threshold(mut self, threshold: u8) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// Sets whether the stored document is pretty-printed.
    #[must_use]
    pub const fn pretty_document(mut self, value: bool) -> Self {
        self.pretty_document = value;
        self
    }

    /// Sets whether exports carry the url column.
    #[must_use]
    pub const fn export_url(mut self, value: bool) -> Self {
        self.export.include_url = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.default_threshold, 75);
        assert!(!config.pretty_document);
        assert!(config.export.include_url);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .default_threshold(90)
            .pretty_document(true)
            .export_url(false);

        assert_eq!(config.default_threshold, 90);
        assert!(config.pretty_document);
        assert!(!config.export.include_url);
    }
}
