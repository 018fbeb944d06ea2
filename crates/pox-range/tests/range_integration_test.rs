//! Integration tests for version and range parsing
//!
//! These tests go through the public API only: parse a range, evaluate it
//! against versions and check the canonical text it prints back.

use pox_range::{
    Component, Label, LabelRegistry, Operator, ParserConfig, Stability, Version, VersionParser,
    VersionParserError, VersionRange,
};

fn parser() -> VersionParser {
    VersionParser::new()
}

fn version(input: &str) -> Version {
    parser().parse_version(input).unwrap()
}

fn range(input: &str) -> VersionRange {
    parser().parse_range(input).unwrap()
}

/// Same answers for every sampled version
fn assert_equivalent(a: &str, b: &str) {
    let (left, right) = (range(a), range(b));
    for major in 0..5 {
        for minor in 0..12 {
            for patch in [0, 1, 5, 17] {
                let v = Version::new(major, minor, patch);
                assert_eq!(
                    left.satisfies(&v),
                    right.satisfies(&v),
                    "{} and {} disagree on {}",
                    a,
                    b,
                    v
                );
            }
        }
    }
}

#[test]
fn test_release_candidate_version() {
    let v = version("1.5.0-rc1");

    assert_eq!(v.major(), Component::Number(1));
    assert_eq!(v.minor(), Component::Number(5));
    assert_eq!(v.patch(), Component::Number(0));
    assert_eq!(v.label(), &Label::new(Stability::RC, Some(1)));
    assert!(v.is_prerelease());
}

#[test]
fn test_four_components_is_invalid() {
    assert!(matches!(
        parser().parse_version("1.2.3.4"),
        Err(VersionParserError::InvalidVersion(_))
    ));
}

#[test]
fn test_wildcard_range() {
    assert_eq!(range("1.7.*").to_string(), ">=1.7.0<1.8.0");
    assert_equivalent("1.7.*", ">=1.7.0<1.8.0");
    assert_equivalent("1.x", ">=1.0.0<2.0.0");
    assert!(range("*").is_any());
}

#[test]
fn test_caret_range() {
    assert_eq!(range("^3.1.0").to_string(), ">=3.1.0<4.0.0");
    assert_equivalent("^3.1.0", ">=3.1.0<4.0.0");
    assert_equivalent("^0.2", ">=0.2.0<1.0.0");
}

#[test]
fn test_tilde_range() {
    assert_equivalent("~1.7", ">=1.7.0<2.0.0");
    assert_equivalent("~1.7.3", ">=1.7.3<1.8.0");
}

#[test]
fn test_hyphen_range_upper_bound_is_inclusive_with_patch() {
    // A fully qualified right side keeps its own version as an inclusive
    // bound; `>=1.0.7<3.1.18` would exclude 3.1.18 itself.
    let parsed = range("1.0.7-3.1.18");
    assert_eq!(parsed.to_string(), ">=1.0.7<=3.1.18");
    assert!(parsed.satisfies(&version("3.1.18")));
    assert!(!parsed.satisfies(&version("3.1.19")));
    assert!(!parsed.satisfies(&version("1.0.6")));

    // A partial right side is rounded up and exclusive
    assert_eq!(range("1.0.7-3.1").to_string(), ">=1.0.7<3.2.0");
    assert_eq!(range("1.0.7 - 3").to_string(), ">=1.0.7<4.0.0");
}

#[test]
fn test_exact_versions_cannot_be_and_joined() {
    assert!(matches!(
        parser().parse_range("=1.0.3=2.0.0"),
        Err(VersionParserError::InvalidRange { .. })
    ));
    assert!(matches!(
        parser().parse_range("1.0.3 2.0.0"),
        Err(VersionParserError::InvalidRange { .. })
    ));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let parsed = range(">1.5<4.0||>=5.0<6.0");

    assert!(!parsed.satisfies(&version("4.0")));
    assert!(parsed.satisfies(&version("5.5")));
    assert!(parsed.satisfies(&version("2.0")));
    assert_eq!(parsed.to_string(), ">1.5.0<4.0.0, >=5.0.0<6.0.0");
}

#[test]
fn test_tree_shape() {
    let parsed = range(">=1.0 <2.0 || 3.x");
    match parsed {
        VersionRange::Or(left, right) => {
            assert_eq!(left.leaf_count(), 2);
            assert_eq!(right.to_string(), ">=3.0.0<4.0.0");
            match *left {
                VersionRange::And(lower, upper) => {
                    assert_eq!(lower.as_leaf(), Some((Operator::GreaterThanOrEqual, &Version::new(1, 0, 0))));
                    assert_eq!(upper.as_leaf(), Some((Operator::LessThan, &Version::new(2, 0, 0))));
                }
                other => panic!("expected an AND node, got {:?}", other),
            }
        }
        other => panic!("expected an OR node, got {:?}", other),
    }
}

#[test]
fn test_canonical_text_parses_back() {
    let inputs = [
        "~1.2.1 >=1.2.3",
        "^1.2.3-beta.2 || 2.*",
        ">=1.0.0-rc.1+build.5 <2",
        "1.0 - 2.0 || * >=3",
        "v1.2.3 , <0.1",
        "1.0.0+20130313",
        ">=1.0.0 1.0.0 - 2.0",
        "1.0.0 ^1",
        "1.0.0-rc.1+build.x1 || 2.x",
    ];

    for input in inputs {
        let first = range(input);
        let text = first.to_string();
        let second = range(&text);
        assert_eq!(second, first, "{:?} changed shape when reparsed", input);
        assert_eq!(second.to_string(), text, "{:?} did not print stably", input);
    }
}

#[test]
fn test_from_str() {
    let parsed: VersionRange = ">=1.2 <1.3".parse().unwrap();
    let v: Version = "1.2.9".parse().unwrap();
    assert!(parsed.satisfies(&v));

    assert!("1.2.3.4".parse::<Version>().is_err());
    assert!("1.0 ||".parse::<VersionRange>().is_err());
}

#[test]
fn test_version_ordering() {
    let mut versions: Vec<Version> = ["1.0.0", "1.0.0-rc.2", "1.0.0-dev", "1.0.0-beta", "0.9.9", "1.0.0-alpha.3", "1.0.0-rc.10"]
        .iter()
        .map(|v| version(v))
        .collect();
    versions.sort();

    let sorted: Vec<String> = versions.iter().map(Version::to_string).collect();
    assert_eq!(
        sorted,
        vec![
            "0.9.9",
            "1.0.0-dev",
            "1.0.0-alpha.3",
            "1.0.0-beta",
            "1.0.0-rc.2",
            "1.0.0-rc.10",
            "1.0.0",
        ]
    );
}

#[test]
fn test_label_fallback() {
    let strict = VersionParser::new();
    assert!(matches!(
        strict.parse_version("1.0.0-nightly"),
        Err(VersionParserError::InvalidVersionWithReason { .. })
    ));

    let lenient = VersionParser::with_config(
        ParserConfig::default().with_labels(LabelRegistry::default().with_fallback(Stability::Dev)),
    );
    let v = lenient.parse_version("1.0.0-nightly.4").unwrap();
    assert_eq!(v.label().stability(), Stability::Dev);
    assert_eq!(v.label().number(), Some(4));
}

#[test]
fn test_parser_is_shareable() {
    let parser = std::sync::Arc::new(VersionParser::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = std::sync::Arc::clone(&parser);
            std::thread::spawn(move || {
                let range = parser.parse_range(&format!("^{}.0", i)).unwrap();
                range.satisfies(&Version::new(i, 5, 0))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
