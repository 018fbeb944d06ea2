//! Semver facade providing high-level version operations

use std::cmp::Ordering;

use crate::range::VersionRange;
use crate::version::Version;
use crate::version_parser::{VersionParser, VersionParserError};

/// Main facade for semantic versioning operations
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a range
    pub fn satisfies(version: &str, range: &str) -> bool {
        let parser = VersionParser::new();

        let version = match parser.parse_version(version) {
            Ok(v) => v,
            Err(_) => return false,
        };

        match parser.parse_range(range) {
            Ok(r) => r.satisfies(&version),
            Err(_) => false,
        }
    }

    /// Return all versions that satisfy the given range
    pub fn satisfied_by(versions: &[&str], range: &str) -> Vec<String> {
        let parser = VersionParser::new();
        let parsed = match parser.parse_range(range) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter(|v| {
                parser
                    .parse_version(v)
                    .map(|version| parsed.satisfies(&version))
                    .unwrap_or(false)
            })
            .map(|v| v.to_string())
            .collect()
    }

    /// Parse a range once for repeated checks
    pub fn parse_range(range: &str) -> Result<VersionRange, VersionParserError> {
        VersionParser::new().parse_range(range)
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let parser = VersionParser::new();

        // Versions that fail to parse are dropped
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((parser.parse_version(v).ok()?, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp: Ordering = a.cmp(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}
