//! Parser configuration types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Vendor prefix used by Cyrus IMAP on event and field names.
pub const CYRUS_PREFIX: &str = "vnd.cmu.";

/// Event parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Prefixes stripped from the start of event names before dispatch.
    ///
    /// Checked in order; only the first match is removed.
    pub vendor_prefixes: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            vendor_prefixes: vec![CYRUS_PREFIX.to_string()],
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration (Cyrus prefix only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::new()
    }

    /// Loads a configuration from a JSON document.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or if a
    /// configured prefix is empty.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the parser cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any vendor prefix is empty.
    pub fn validate(&self) -> Result<()> {
        if self.vendor_prefixes.iter().any(String::is_empty) {
            return Err(Error::Config("vendor prefix must not be empty".to_string()));
        }
        Ok(())
    }

    /// Removes the first matching vendor prefix from an event name.
    #[must_use]
    pub fn strip_prefix<'a>(&self, name: &'a str) -> &'a str {
        self.vendor_prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .find_map(|prefix| name.strip_prefix(prefix.as_str()))
            .unwrap_or(name)
    }
}

/// Builder for parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    vendor_prefixes: Vec<String>,
    skip_cyrus: bool,
}

impl ParserConfigBuilder {
    /// Creates a new builder. The Cyrus prefix is included unless
    /// [`without_cyrus_prefix`](Self::without_cyrus_prefix) is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vendor prefix to strip from event names.
    #[must_use]
    pub fn vendor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vendor_prefixes.push(prefix.into());
        self
    }

    /// Drops the built-in Cyrus prefix.
    #[must_use]
    pub const fn without_cyrus_prefix(mut self) -> Self {
        self.skip_cyrus = true;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ParserConfig {
        let mut vendor_prefixes = Vec::with_capacity(self.vendor_prefixes.len() + 1);
        if !self.skip_cyrus {
            vendor_prefixes.push(CYRUS_PREFIX.to_string());
        }
        vendor_prefixes.extend(self.vendor_prefixes);
        ParserConfig { vendor_prefixes }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::new();
        assert_eq!(config.vendor_prefixes, vec!["vnd.cmu.".to_string()]);
    }

    #[test]
    fn test_strip_prefix() {
        let config = ParserConfig::default();
        assert_eq!(config.strip_prefix("vnd.cmu.MessageMove"), "MessageMove");
        assert_eq!(config.strip_prefix("FlagsSet"), "FlagsSet");
        // Only a leading prefix is removed.
        assert_eq!(config.strip_prefix("Xvnd.cmu.FlagsSet"), "Xvnd.cmu.FlagsSet");
    }

    #[test]
    fn test_strip_first_matching_prefix_only() {
        let config = ParserConfig::builder().vendor_prefix("vnd.cmu.").build();
        assert_eq!(config.strip_prefix("vnd.cmu.vnd.cmu.Login"), "vnd.cmu.Login");
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::builder()
            .without_cyrus_prefix()
            .vendor_prefix("vnd.dovecot.")
            .build();
        assert_eq!(config.vendor_prefixes, vec!["vnd.dovecot.".to_string()]);
        assert_eq!(config.strip_prefix("vnd.cmu.FlagsSet"), "vnd.cmu.FlagsSet");
        assert_eq!(config.strip_prefix("vnd.dovecot.FlagsSet"), "FlagsSet");
    }

    #[test]
    fn test_builder_keeps_cyrus_by_default() {
        let config = ParserConfig::builder().vendor_prefix("x-").build();
        assert_eq!(config.vendor_prefixes.len(), 2);
        assert_eq!(config.strip_prefix("vnd.cmu.Logout"), "Logout");
        assert_eq!(config.strip_prefix("x-Logout"), "Logout");
    }

    #[test]
    fn test_from_json() {
        let config = ParserConfig::from_json(r#"{"vendor_prefixes": ["a.", "b."]}"#).unwrap();
        assert_eq!(config.vendor_prefixes, vec!["a.".to_string(), "b.".to_string()]);

        let config = ParserConfig::from_json("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_from_json_rejects_empty_prefix() {
        let err = ParserConfig::from_json(r#"{"vendor_prefixes": [""]}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ParserConfig::from_json("not json"),
            Err(Error::Json(_))
        ));
    }
}
