//! Version type and ordering

use std::fmt;
use std::str::FromStr;

use crate::label::Label;
use crate::version_parser::{VersionParser, VersionParserError};

/// A single numeric component of a version
///
/// Wildcards only live inside parsed wildcard versions; ranges resolve them to
/// concrete bounds before anything is compared. For a total order they sort
/// above every number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    Number(u64),
    Wildcard,
}

impl Component {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Component::Wildcard)
    }

    /// The numeric value, if this is not a wildcard
    pub fn number(&self) -> Option<u64> {
        match self {
            Component::Number(n) => Some(*n),
            Component::Wildcard => None,
        }
    }
}

impl From<u64> for Component {
    fn from(n: u64) -> Self {
        Component::Number(n)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Number(n) => write!(f, "{}", n),
            Component::Wildcard => write!(f, "*"),
        }
    }
}

/// A `major.minor.patch` version with an optional pre-release label
///
/// Versions compare by major, minor and patch, then by label precedence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    major: Component,
    minor: Component,
    patch: Component,
    label: Label,
}

impl Version {
    /// Create a release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major: Component::Number(major),
            minor: Component::Number(minor),
            patch: Component::Number(patch),
            label: Label::stable(),
        }
    }

    /// Create a version from components, rejecting non-contiguous wildcards
    pub fn from_components(
        major: Component,
        minor: Component,
        patch: Component,
        label: Label,
    ) -> Result<Self, VersionParserError> {
        let version = Version {
            major,
            minor,
            patch,
            label,
        };

        let components = version.components();
        if let Some(first) = components.iter().position(Component::is_wildcard) {
            if components[first..].iter().any(|c| !c.is_wildcard()) {
                return Err(VersionParserError::InvalidVersionWithReason {
                    version: version.to_string(),
                    reason: "wildcards must be trailing".to_string(),
                });
            }
            if version.label.is_prerelease() {
                return Err(VersionParserError::InvalidVersionWithReason {
                    version: version.to_string(),
                    reason: "a wildcard version cannot carry a pre-release label".to_string(),
                });
            }
        }

        Ok(version)
    }

    /// Replace the label
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    pub fn major(&self) -> Component {
        self.major
    }

    pub fn minor(&self) -> Component {
        self.minor
    }

    pub fn patch(&self) -> Component {
        self.patch
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn components(&self) -> [Component; 3] {
        [self.major, self.minor, self.patch]
    }

    /// Check if any component is a wildcard
    pub fn is_wildcard(&self) -> bool {
        self.components().iter().any(Component::is_wildcard)
    }

    pub fn is_prerelease(&self) -> bool {
        self.label.is_prerelease()
    }
}

impl FromStr for Version {
    type Err = VersionParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionParser::new().parse_version(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.label.is_prerelease() {
            write!(f, "-")?;
        }
        write!(f, "{}", self.label)
    }
}
