//! Pre-release labels and their precedence

use std::cmp::Ordering;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

/// Stability levels for versions, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stability {
    Dev,
    Alpha,
    Beta,
    RC,
    #[default]
    Stable,
}

impl Stability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Dev => "dev",
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::RC => "rc",
            Stability::Stable => "stable",
        }
    }

    /// Check if this stability marks a pre-release
    pub fn is_prerelease(&self) -> bool {
        *self != Stability::Stable
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

lazy_static! {
    // name, optional numeric suffix (dot optional), optional build metadata
    static ref LABEL_TEXT_RE: Regex = Regex::new(
        r"(?i)^(?P<name>[a-z]*)(?:\.?(?P<number>\d+))?(?:\+(?P<build>[0-9a-z.\-]+))?$"
    ).unwrap();
}

/// The pieces of a raw label such as `rc.1+build.5`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LabelText<'a> {
    pub name: &'a str,
    pub number: Option<&'a str>,
    pub build_metadata: Option<&'a str>,
}

impl<'a> LabelText<'a> {
    /// Split raw label text, returning `None` if it is not label-shaped
    pub fn split(text: &'a str) -> Option<Self> {
        let caps = LABEL_TEXT_RE.captures(text)?;
        Some(LabelText {
            name: caps.name("name").map_or("", |m| m.as_str()),
            number: caps.name("number").map(|m| m.as_str()),
            build_metadata: caps.name("build").map(|m| m.as_str()),
        })
    }
}

/// A pre-release qualifier with an optional numeric suffix and build metadata.
///
/// Equality and ordering only look at the stability and the number; build
/// metadata is carried for display.
#[derive(Debug, Clone, Default)]
pub struct Label {
    stability: Stability,
    number: Option<u64>,
    build_metadata: Option<String>,
}

impl Label {
    /// Create a label
    pub fn new(stability: Stability, number: Option<u64>) -> Self {
        Label {
            stability,
            number,
            build_metadata: None,
        }
    }

    /// The label of a final release
    pub fn stable() -> Self {
        Label::default()
    }

    /// Attach build metadata
    pub fn with_build_metadata(mut self, build_metadata: Option<String>) -> Self {
        self.build_metadata = build_metadata.filter(|b| !b.is_empty());
        self
    }

    pub fn stability(&self) -> Stability {
        self.stability
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.stability.is_prerelease()
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        // None sorts below Some, and numbers compare numerically
        self.stability
            .cmp(&other.stability)
            .then_with(|| self.number.cmp(&other.number))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stability.is_prerelease() {
            write!(f, "{}", self.stability)?;
        }
        if let Some(number) = self.number {
            write!(f, ".{}", number)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}
