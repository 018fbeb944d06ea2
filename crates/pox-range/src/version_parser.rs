//! Version and range parsing entry points

use thiserror::Error;

use crate::config::ParserConfig;
use crate::expression_builder::ExpressionBuilder;
use crate::range::VersionRange;
use crate::range_builder::{find_range_dash, partition, RangeBuilder};
use crate::tokenizer::Tokenizer;
use crate::version::Version;

/// Error type for version and range parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParserError {
    #[error("Invalid version string \"{0}\"")]
    InvalidVersion(String),
    #[error("Invalid version string \"{version}\": {reason}")]
    InvalidVersionWithReason { version: String, reason: String },
    #[error("Invalid comparator \"{0}\"")]
    InvalidComparator(String),
    #[error("Could not parse version range \"{range}\": {reason}")]
    InvalidRange { range: String, reason: String },
}

/// Parser for versions and version ranges
///
/// A parser holds only its configuration and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct VersionParser {
    config: ParserConfig,
}

impl VersionParser {
    /// Create a parser with the default comparators and labels
    pub fn new() -> Self {
        VersionParser::default()
    }

    /// Create a parser with a custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        VersionParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Check if a string is a valid single version
    pub fn is_valid(&self, version: &str) -> bool {
        self.parse_version(version).is_ok()
    }

    /// Parse a single version such as `1.2.3`, `v1.5.0-rc1` or `2.*`
    pub fn parse_version(&self, input: &str) -> Result<Version, VersionParserError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VersionParserError::InvalidVersion(String::new()));
        }

        let tokens = Tokenizer::tokenize(input);
        let denotes_range = tokens
            .iter()
            .any(|t| t.kind().is_logical() || t.kind().starts_term())
            || find_range_dash(&tokens).is_some();
        if denotes_range {
            return Err(VersionParserError::InvalidVersionWithReason {
                version: input.to_string(),
                reason: "expected a single version, found a range".to_string(),
            });
        }

        let parsed = RangeBuilder::new(&self.config).version(&tokens)?;
        Ok(parsed.version)
    }

    /// Parse a range expression such as `>=1.2.0 <2.0.0 || ^3.1.0`
    pub fn parse_range(&self, input: &str) -> Result<VersionRange, VersionParserError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VersionParserError::InvalidVersion(String::new()));
        }

        let tokens = Tokenizer::tokenize(input);
        let segments = partition(&tokens);
        log::trace!("{:?} split into {} segments", input, segments.len());

        let items = RangeBuilder::new(&self.config).build_items(&segments)?;
        let range = ExpressionBuilder::build(items, input)?;

        log::debug!("parsed range {:?} as {}", input, range);
        Ok(range)
    }
}
