//! Version range expression trees

use std::fmt;
use std::str::FromStr;

use super::Operator;
use crate::version::Version;
use crate::version_parser::{VersionParser, VersionParserError};

/// A boolean expression over version comparisons
///
/// `Display` writes the canonical form: a leaf is the operator followed by the
/// version, AND-joined operands are written back to back and OR-joined
/// operands are separated by `, `. Parsing that text yields an equal tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    /// Matches every version
    Any,
    /// A single comparison against a version
    Leaf { operator: Operator, version: Version },
    /// Both operands must match
    And(Box<VersionRange>, Box<VersionRange>),
    /// Either operand must match
    Or(Box<VersionRange>, Box<VersionRange>),
}

impl VersionRange {
    pub fn leaf(operator: Operator, version: Version) -> Self {
        VersionRange::Leaf { operator, version }
    }

    pub fn and(left: VersionRange, right: VersionRange) -> Self {
        VersionRange::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: VersionRange, right: VersionRange) -> Self {
        VersionRange::Or(Box::new(left), Box::new(right))
    }

    /// `>= lower` and `< upper`
    pub fn between(lower: Version, upper: Version) -> Self {
        Self::and(
            Self::leaf(Operator::GreaterThanOrEqual, lower),
            Self::leaf(Operator::LessThan, upper),
        )
    }

    /// Check if `version` satisfies this range
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionRange::Any => true,
            VersionRange::Leaf { operator, version: bound } => operator.test(version, bound),
            VersionRange::And(left, right) => left.satisfies(version) && right.satisfies(version),
            VersionRange::Or(left, right) => left.satisfies(version) || right.satisfies(version),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, VersionRange::Any)
    }

    /// The operator and version of a leaf
    pub fn as_leaf(&self) -> Option<(Operator, &Version)> {
        match self {
            VersionRange::Leaf { operator, version } => Some((*operator, version)),
            _ => None,
        }
    }

    /// Number of leaves (including `Any`) in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            VersionRange::Any | VersionRange::Leaf { .. } => 1,
            VersionRange::And(left, right) | VersionRange::Or(left, right) => {
                left.leaf_count() + right.leaf_count()
            }
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionParser::new().parse_range(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Any => write!(f, "*"),
            VersionRange::Leaf { operator, version } => write!(f, "{}{}", operator, version),
            VersionRange::And(left, right) => write!(f, "{}{}", left, right),
            VersionRange::Or(left, right) => write!(f, "{}, {}", left, right),
        }
    }
}
