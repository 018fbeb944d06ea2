//! Property-based tests for range parsing and version ordering

use std::cmp::Ordering;

use pox_range::{Label, Stability, Version, VersionParser, VersionRange};
use proptest::prelude::*;

fn label_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(String::new()),
        1 => Just("-dev".to_string()),
        1 => Just("-alpha".to_string()),
        1 => (0u64..20).prop_map(|n| format!("-beta.{}", n)),
        1 => (0u64..20).prop_map(|n| format!("-rc{}", n)),
        1 => (0u64..20).prop_map(|n| format!("-rc.{}+exp.x{}", n, n)),
    ]
}

fn full_version() -> impl Strategy<Value = String> {
    (0u64..30, 0u64..30, 0u64..30, label_suffix())
        .prop_map(|(major, minor, patch, label)| format!("{}.{}.{}{}", major, minor, patch, label))
}

fn partial_version() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..30).prop_map(|major| major.to_string()),
        (0u64..30, 0u64..30).prop_map(|(major, minor)| format!("{}.{}", major, minor)),
        full_version(),
    ]
}

/// An exact version, with or without the `=` comparator
fn exact_term() -> impl Strategy<Value = String> {
    prop_oneof![partial_version(), partial_version().prop_map(|v| format!("={}", v))]
}

/// One range term that is not an exact version
fn bounded_term() -> impl Strategy<Value = String> {
    prop_oneof![
        (prop::sample::select(vec![">", ">=", "<", "<="]), partial_version())
            .prop_map(|(op, v)| format!("{}{}", op, v)),
        partial_version().prop_map(|v| format!("~{}", v)),
        partial_version().prop_map(|v| format!("^{}", v)),
        prop_oneof![
            Just("*".to_string()),
            (0u64..30).prop_map(|major| format!("{}.*", major)),
            (0u64..30, 0u64..30).prop_map(|(major, minor)| format!("{}.{}.x", major, minor)),
        ],
        (0u64..10, 0u64..10, 10u64..20, 0u64..10)
            .prop_map(|(low, minor, high, patch)| format!("{}.{} - {}.{}.{}", low, minor, high, minor, patch)),
    ]
}

/// A term and whether it is an exact version
fn term() -> impl Strategy<Value = (String, bool)> {
    prop_oneof![
        3 => bounded_term().prop_map(|t| (t, false)),
        1 => exact_term().prop_map(|t| (t, true)),
    ]
}

fn range_expression() -> impl Strategy<Value = String> {
    let joiner = prop::sample::select(vec![" ", " && ", " || ", ", ", "|"]);
    (term(), prop::collection::vec((joiner, term()), 0..4)).prop_map(|((first, mut exact), rest)| {
        let mut acc = first;
        for (joiner, (term, term_exact)) in rest {
            // Two exact versions cannot be AND-joined
            let joins_with_and = matches!(joiner, " " | " && ");
            acc.push_str(if exact && term_exact && joins_with_and { " || " } else { joiner });
            acc.push_str(&term);
            exact = term_exact;
        }
        acc
    })
}

fn sample_version() -> impl Strategy<Value = Version> {
    let stability = prop::sample::select(vec![
        Stability::Dev,
        Stability::Alpha,
        Stability::Beta,
        Stability::RC,
        Stability::Stable,
    ]);
    (0u64..5, 0u64..12, 0u64..12, stability, prop::option::of(0u64..5)).prop_map(
        |(major, minor, patch, stability, number)| {
            let label = if stability == Stability::Stable {
                Label::stable()
            } else {
                Label::new(stability, number)
            };
            Version::new(major, minor, patch).with_label(label)
        },
    )
}

fn parse(input: &str) -> VersionRange {
    VersionParser::new().parse_range(input).unwrap()
}

proptest! {
    #[test]
    fn test_generated_ranges_parse(input in range_expression()) {
        prop_assert!(VersionParser::new().parse_range(&input).is_ok(), "{:?} was rejected", input);
    }

    #[test]
    fn test_canonical_text_round_trips(input in range_expression()) {
        let first = parse(&input);
        let text = first.to_string();
        let second = parse(&text);

        prop_assert_eq!(&second, &first);
        prop_assert_eq!(second.to_string(), text);
    }

    #[test]
    fn test_canonical_text_keeps_meaning(input in range_expression(), version in sample_version()) {
        let first = parse(&input);
        let second = parse(&first.to_string());
        prop_assert_eq!(first.satisfies(&version), second.satisfies(&version));
    }

    #[test]
    fn test_arbitrary_input_never_panics(input in "\\PC{0,24}") {
        let parser = VersionParser::new();
        let _ = parser.parse_range(&input);
        let _ = parser.parse_version(&input);
    }

    #[test]
    fn test_ordering_is_total(a in sample_version(), b in sample_version()) {
        let outcomes = [a < b, a == b, a > b];
        prop_assert_eq!(outcomes.iter().filter(|o| **o).count(), 1);
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn test_label_precedence(
        major in 0u64..5,
        minor in 0u64..5,
        patch in 0u64..5,
        number in prop::option::of(0u64..5),
    ) {
        let at = |stability: Stability| {
            let label = if stability == Stability::Stable { Label::stable() } else { Label::new(stability, number) };
            Version::new(major, minor, patch).with_label(label)
        };

        let ladder = [Stability::Dev, Stability::Alpha, Stability::Beta, Stability::RC, Stability::Stable];
        for pair in ladder.windows(2) {
            prop_assert_eq!(at(pair[0]).cmp(&at(pair[1])), Ordering::Less);
        }
    }

    #[test]
    fn test_shorthand_matches_expanded_form(version in sample_version()) {
        let pairs = [
            ("~1.7", ">=1.7.0<2.0.0"),
            ("~1.7.2", ">=1.7.2<1.8.0"),
            ("^3.1.0", ">=3.1.0<4.0.0"),
            ("1.7.*", ">=1.7.0<1.8.0"),
            ("2.x", ">=2.0.0<3.0.0"),
            ("1 - 2.3", ">=1.0.0<2.4.0"),
        ];

        for (shorthand, expanded) in pairs {
            prop_assert_eq!(
                parse(shorthand).satisfies(&version),
                parse(expanded).satisfies(&version),
                "{} vs {}", shorthand, expanded
            );
        }
    }

    #[test]
    fn test_and_binds_tighter_than_or(version in sample_version()) {
        let combined = parse(">1.5<4.0||>=5.0<6.0");
        let first = parse(">1.5<4.0");
        let second = parse(">=5.0<6.0");

        prop_assert_eq!(
            combined.satisfies(&version),
            first.satisfies(&version) || second.satisfies(&version)
        );
    }
}
