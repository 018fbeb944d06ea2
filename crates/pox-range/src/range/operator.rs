//! Operator types for version comparisons

use std::fmt;

use crate::version::Version;
use crate::version_parser::VersionParserError;

/// Comparison operators for version ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
}

impl Operator {
    /// Parse operator from its symbol
    pub fn from_symbol(s: &str) -> Result<Self, VersionParserError> {
        match s {
            "=" => Ok(Operator::Equal),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            _ => Err(VersionParserError::InvalidComparator(s.to_string())),
        }
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
        }
    }

    /// Get all operators
    pub fn all() -> &'static [Operator] {
        &[
            Operator::Equal,
            Operator::GreaterThan,
            Operator::GreaterThanOrEqual,
            Operator::LessThan,
            Operator::LessThanOrEqual,
        ]
    }

    /// Check `candidate <op> bound`
    pub fn test(&self, candidate: &Version, bound: &Version) -> bool {
        match self {
            Operator::Equal => candidate == bound,
            Operator::GreaterThan => candidate > bound,
            Operator::GreaterThanOrEqual => candidate >= bound,
            Operator::LessThan => candidate < bound,
            Operator::LessThanOrEqual => candidate <= bound,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
