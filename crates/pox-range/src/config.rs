//! Parser configuration
//!
//! A [`ParserConfig`] is built once and handed to
//! [`VersionParser::with_config`](crate::VersionParser::with_config). It holds the
//! symbol table used to resolve comparator tokens and the name table used to
//! resolve pre-release labels.
//!
//! # Example
//!
//! ```rust
//! use pox_range::{LabelRegistry, ParserConfig, Stability, VersionParser};
//!
//! let labels = LabelRegistry::default()
//!     .with_name("preview", Stability::Beta)
//!     .with_fallback(Stability::Alpha);
//! let parser = VersionParser::with_config(ParserConfig::default().with_labels(labels));
//!
//! let version = parser.parse_version("1.2.0-preview.3").unwrap();
//! assert_eq!(version.label().stability(), Stability::Beta);
//! ```

use std::collections::HashMap;

use crate::label::{Label, LabelText, Stability};
use crate::range::Operator;
use crate::version_parser::VersionParserError;

/// Maps comparator symbols to operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparatorRegistry {
    symbols: HashMap<String, Operator>,
}

impl Default for ComparatorRegistry {
    fn default() -> Self {
        let symbols = Operator::all()
            .iter()
            .map(|op| (op.as_str().to_string(), *op))
            .collect();
        ComparatorRegistry { symbols }
    }
}

impl ComparatorRegistry {
    /// Resolve a comparator symbol
    pub fn get(&self, symbol: &str) -> Result<Operator, VersionParserError> {
        self.symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| VersionParserError::InvalidComparator(symbol.to_string()))
    }

    /// Bind a symbol to an operator, replacing any previous binding
    ///
    /// The tokenizer only produces `=`, `>`, `>=`, `<` and `<=`, so only those
    /// symbols are looked up while parsing.
    pub fn with_symbol(mut self, symbol: &str, operator: Operator) -> Self {
        self.symbols.insert(symbol.to_string(), operator);
        self
    }

    /// Remove a symbol so that it is rejected
    pub fn without_symbol(mut self, symbol: &str) -> Self {
        self.symbols.remove(symbol);
        self
    }

    /// Check if a symbol is bound
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }
}

/// Maps label names to stabilities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRegistry {
    names: HashMap<String, Stability>,
    fallback: Option<Stability>,
}

impl Default for LabelRegistry {
    fn default() -> Self {
        let names = [
            ("", Stability::Stable),
            ("dev", Stability::Dev),
            ("alpha", Stability::Alpha),
            ("a", Stability::Alpha),
            ("beta", Stability::Beta),
            ("b", Stability::Beta),
            ("rc", Stability::RC),
        ]
        .into_iter()
        .map(|(name, stability)| (name.to_string(), stability))
        .collect();

        LabelRegistry {
            names,
            fallback: None,
        }
    }
}

impl LabelRegistry {
    /// Add a label name (matched case-insensitively)
    pub fn with_name(mut self, name: &str, stability: Stability) -> Self {
        self.names.insert(name.to_lowercase(), stability);
        self
    }

    /// Map unknown names to `stability` instead of rejecting them
    pub fn with_fallback(mut self, stability: Stability) -> Self {
        self.fallback = Some(stability);
        self
    }

    /// Resolve a label name to its stability
    pub fn stability_of(&self, name: &str) -> Result<Stability, VersionParserError> {
        self.names
            .get(&name.to_lowercase())
            .copied()
            .or(self.fallback)
            .ok_or_else(|| VersionParserError::InvalidVersionWithReason {
                version: name.to_string(),
                reason: "unknown pre-release label".to_string(),
            })
    }

    /// Get the plain label for a name
    pub fn get(&self, name: &str) -> Result<Label, VersionParserError> {
        self.build(name).finish()
    }

    /// Start building a label
    pub fn build(&self, name: &str) -> LabelBuilder<'_> {
        LabelBuilder {
            registry: self,
            name: name.to_string(),
            number: None,
            build_metadata: None,
        }
    }

    /// Parse raw label text such as `rc1`, `beta.2` or `alpha+build.7`
    pub fn parse(&self, text: &str) -> Result<Label, VersionParserError> {
        let invalid = |reason: &str| VersionParserError::InvalidVersionWithReason {
            version: text.to_string(),
            reason: reason.to_string(),
        };

        let parts = LabelText::split(text).ok_or_else(|| invalid("malformed pre-release label"))?;
        if parts.name.is_empty() && parts.number.is_some() {
            return Err(invalid("pre-release number without a label name"));
        }

        let mut builder = self.build(parts.name);
        if let Some(number) = parts.number {
            let number = number
                .parse::<u64>()
                .map_err(|_| invalid("pre-release number out of range"))?;
            builder = builder.number(number);
        }
        if let Some(build) = parts.build_metadata {
            builder = builder.build_metadata(build);
        }
        builder.finish()
    }
}

/// Fluent builder for labels resolved through a [`LabelRegistry`]
#[derive(Debug)]
pub struct LabelBuilder<'a> {
    registry: &'a LabelRegistry,
    name: String,
    number: Option<u64>,
    build_metadata: Option<String>,
}

impl LabelBuilder<'_> {
    pub fn number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    pub fn build_metadata(mut self, build_metadata: &str) -> Self {
        self.build_metadata = Some(build_metadata.to_string());
        self
    }

    pub fn finish(self) -> Result<Label, VersionParserError> {
        let stability = self.registry.stability_of(&self.name)?;
        Ok(Label::new(stability, self.number).with_build_metadata(self.build_metadata))
    }
}

/// Configuration shared by every stage of the parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    comparators: ComparatorRegistry,
    labels: LabelRegistry,
}

impl ParserConfig {
    pub fn new(comparators: ComparatorRegistry, labels: LabelRegistry) -> Self {
        ParserConfig { comparators, labels }
    }

    pub fn with_comparators(mut self, comparators: ComparatorRegistry) -> Self {
        self.comparators = comparators;
        self
    }

    pub fn with_labels(mut self, labels: LabelRegistry) -> Self {
        self.labels = labels;
        self
    }

    pub fn comparators(&self) -> &ComparatorRegistry {
        &self.comparators
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }
}
