//! Semantic version range expressions
//!
//! This crate parses versions such as `1.5.0-rc1` and range expressions such as
//! `>=1.2.0 <2.0.0 || ^3.1`, and evaluates whether a version satisfies a range.
//!
//! Supported range forms: comparators (`=`, `>`, `>=`, `<`, `<=`), tilde (`~1.2`),
//! caret (`^1.2.3`), wildcards (`1.2.*`, `1.x`, `*`), hyphen ranges
//! (`1.0.0 - 2.0.0`) and exact versions. Terms are joined with AND (whitespace
//! or `&&`) and OR (`||`, `|` or `,`); AND binds tighter.
//!
//! ```rust
//! use pox_range::{Semver, VersionParser};
//!
//! let parser = VersionParser::new();
//! let range = parser.parse_range("~1.7 || ^3.1.0").unwrap();
//! assert_eq!(range.to_string(), ">=1.7.0<2.0.0, >=3.1.0<4.0.0");
//! assert!(range.satisfies(&parser.parse_version("3.4.1").unwrap()));
//!
//! assert!(Semver::satisfies("1.8.0", "~1.7"));
//! ```

pub mod range;
mod comparator;
mod config;
mod expression_builder;
mod label;
mod range_builder;
mod semver;
mod tokenizer;
mod version;
mod version_parser;

pub use comparator::Comparator;
pub use config::{ComparatorRegistry, LabelBuilder, LabelRegistry, ParserConfig};
pub use expression_builder::LogicalOperator;
pub use label::{Label, Stability};
pub use range::{Operator, VersionRange};
pub use semver::Semver;
pub use tokenizer::{tokens_text, Token, TokenKind, Tokenizer};
pub use version::{Component, Version};
pub use version_parser::{VersionParser, VersionParserError};
