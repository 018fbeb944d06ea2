//! Grouping of tokens into range terms and the builders for each term form

use crate::config::ParserConfig;
use crate::expression_builder::{ExpressionItem, LogicalOperator};
use crate::label::Label;
use crate::range::{Operator, VersionRange};
use crate::tokenizer::{tokens_text, Token, TokenKind};
use crate::version::{Component, Version};
use crate::version_parser::VersionParserError;

/// A run of tokens forming one term, or a logical operator between terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Cluster(&'a [Token]),
    Logical(LogicalOperator),
}

/// Split a token stream into clusters and logical operators
///
/// Comparators, `~` and `^` open a new cluster. A wildcard closes its cluster
/// unless more dotted components follow it. Two clusters with nothing between
/// them are joined by an AND.
pub(crate) fn partition(tokens: &[Token]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        let kind = token.kind();

        if kind.is_logical() {
            close_cluster(&mut segments, &tokens[start..i]);
            let operator = if kind == TokenKind::LogicalAnd {
                LogicalOperator::And
            } else {
                LogicalOperator::Or
            };
            segments.push(Segment::Logical(operator));
            start = i + 1;
            continue;
        }

        let opens_cluster = kind.starts_term()
            || (kind == TokenKind::WildcardDigits
                && i > start
                && tokens[i - 1].kind() != TokenKind::DotSeparator);
        if opens_cluster && i > start {
            close_cluster(&mut segments, &tokens[start..i]);
            start = i;
        }

        let closes_cluster = kind == TokenKind::WildcardDigits
            && tokens.get(i + 1).map(Token::kind) != Some(TokenKind::DotSeparator);
        if closes_cluster {
            close_cluster(&mut segments, &tokens[start..=i]);
            start = i + 1;
        }
    }
    close_cluster(&mut segments, &tokens[start..]);

    segments
}

fn close_cluster<'a>(segments: &mut Vec<Segment<'a>>, cluster: &'a [Token]) {
    if cluster.is_empty() {
        return;
    }
    if matches!(segments.last(), Some(Segment::Cluster(_))) {
        segments.push(Segment::Logical(LogicalOperator::And));
    }
    segments.push(Segment::Cluster(cluster));
}

/// Position of a dash that separates two versions
///
/// A dash directly followed by label text belongs to the version before it.
pub(crate) fn find_range_dash(tokens: &[Token]) -> Option<usize> {
    tokens.iter().enumerate().position(|(i, token)| {
        token.kind() == TokenKind::DashSeparator
            && tokens.get(i + 1).map(Token::kind) != Some(TokenKind::LabelString)
    })
}

/// A version read from tokens, with how many components were written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedVersion {
    pub version: Version,
    pub specified: usize,
}

impl ParsedVersion {
    /// Index of the first wildcard component
    fn wildcard_position(&self) -> Option<usize> {
        self.version.components().iter().position(Component::is_wildcard)
    }
}

/// Builds range expressions from clusters
pub(crate) struct RangeBuilder<'a> {
    config: &'a ParserConfig,
}

impl<'a> RangeBuilder<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        RangeBuilder { config }
    }

    /// Turn segments into operands and operators, in source order
    ///
    /// A term with two bounds contributes both leaves joined by an AND, so
    /// every AND chain is folded left to right by the expression builder.
    pub fn build_items(&self, segments: &[Segment<'_>]) -> Result<Vec<ExpressionItem>, VersionParserError> {
        let mut items = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Cluster(cluster) => push_conjuncts(self.term(cluster)?, &mut items),
                Segment::Logical(operator) => items.push(ExpressionItem::Operator(*operator)),
            }
        }
        Ok(items)
    }

    /// Build the range for one cluster
    pub fn term(&self, cluster: &[Token]) -> Result<VersionRange, VersionParserError> {
        let first = cluster.first().ok_or_else(|| invalid_range(cluster, "empty term"))?;

        let range = match first.kind() {
            TokenKind::TildeRange => self.tilde(&cluster[1..]),
            TokenKind::CaretRange => self.caret(&cluster[1..]),
            kind if kind.is_comparator() => self.comparator(first, &cluster[1..]),
            kind if kind.is_numeric() => {
                if let Some(dash) = find_range_dash(cluster) {
                    self.hyphen(&cluster[..dash], &cluster[dash + 1..])
                } else if last_numeric_kind(cluster) == Some(TokenKind::WildcardDigits) {
                    self.wildcard(cluster)
                } else {
                    self.exact(cluster)
                }
            }
            _ => Err(invalid_range(
                cluster,
                &format!("unexpected \"{}\" at the start of a term", first.value()),
            )),
        }?;

        log::trace!("term {:?} built as {}", tokens_text(cluster), range);
        Ok(range)
    }

    /// Read a version from tokens: `digits[.digits[.digits]]` followed by an
    /// optional label, either dash-separated or directly attached
    pub fn version(&self, tokens: &[Token]) -> Result<ParsedVersion, VersionParserError> {
        let text = tokens_text(tokens);
        let invalid = |reason: &str| VersionParserError::InvalidVersionWithReason {
            version: text.clone(),
            reason: reason.to_string(),
        };

        if tokens.is_empty() {
            return Err(VersionParserError::InvalidVersion(text.clone()));
        }

        let numeric_len = tokens
            .iter()
            .take_while(|t| t.kind().is_numeric() || t.kind() == TokenKind::DotSeparator)
            .count();
        let (numeric, rest) = tokens.split_at(numeric_len);

        let alternates = numeric.iter().enumerate().all(|(i, t)| {
            if i % 2 == 0 {
                t.kind().is_numeric()
            } else {
                t.kind() == TokenKind::DotSeparator
            }
        });
        if !matches!(numeric.len(), 1 | 3 | 5) || !alternates {
            return Err(VersionParserError::InvalidVersion(text.clone()));
        }

        let mut components = numeric
            .iter()
            .step_by(2)
            .map(|t| match t.kind() {
                TokenKind::WildcardDigits => Ok(Component::Wildcard),
                _ => t
                    .value()
                    .parse::<u64>()
                    .map(Component::Number)
                    .map_err(|_| invalid("numeric component out of range")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let specified = components.len();

        let filler = match components.last() {
            Some(Component::Wildcard) => Component::Wildcard,
            _ => Component::Number(0),
        };
        components.resize(3, filler);

        let label = match rest.split_first() {
            None => Label::stable(),
            Some((dash, label_tokens)) if dash.kind() == TokenKind::DashSeparator => {
                if label_tokens.first().map(Token::kind) != Some(TokenKind::LabelString) {
                    return Err(invalid("a hyphen must be followed by a pre-release label"));
                }
                self.config.labels().parse(&tokens_text(label_tokens))?
            }
            Some((first, _)) if first.kind() == TokenKind::LabelString => {
                self.config.labels().parse(&tokens_text(rest))?
            }
            Some(_) => return Err(invalid("unexpected trailing characters")),
        };

        let version = Version::from_components(components[0], components[1], components[2], label)?;
        Ok(ParsedVersion { version, specified })
    }

    /// Read a version that must not contain wildcards
    fn concrete_version(&self, tokens: &[Token], form: &str) -> Result<ParsedVersion, VersionParserError> {
        let parsed = self.version(tokens)?;
        if parsed.version.is_wildcard() {
            return Err(VersionParserError::InvalidVersionWithReason {
                version: tokens_text(tokens),
                reason: format!("wildcards are not allowed in a {} range", form),
            });
        }
        Ok(parsed)
    }

    /// `<op>version`
    fn comparator(&self, comparator: &Token, rest: &[Token]) -> Result<VersionRange, VersionParserError> {
        let operator = self.config.comparators().get(comparator.value())?;
        let parsed = self.concrete_version(rest, "comparator")?;
        Ok(VersionRange::leaf(operator, parsed.version))
    }

    /// `~1.2` is `>=1.2.0 <2.0.0`, `~1.2.3` is `>=1.2.3 <1.3.0`
    fn tilde(&self, rest: &[Token]) -> Result<VersionRange, VersionParserError> {
        let parsed = self.concrete_version(rest, "tilde")?;
        let upper = if parsed.specified == 3 {
            bump(&parsed.version, 1)?
        } else {
            bump(&parsed.version, 0)?
        };
        Ok(VersionRange::between(parsed.version, upper))
    }

    /// `^1.2.3` is `>=1.2.3 <2.0.0`, whatever the major version is
    fn caret(&self, rest: &[Token]) -> Result<VersionRange, VersionParserError> {
        let parsed = self.concrete_version(rest, "caret")?;
        let upper = bump(&parsed.version, 0)?;
        Ok(VersionRange::between(parsed.version, upper))
    }

    /// `1.*` is `~1`, `1.2.*` is `~1.2.0` widened to the minor, `*` is anything
    fn wildcard(&self, cluster: &[Token]) -> Result<VersionRange, VersionParserError> {
        let parsed = self.version(cluster)?;
        let position = match parsed.wildcard_position() {
            Some(0) => return Ok(VersionRange::Any),
            Some(position) => position,
            None => return Err(invalid_range(cluster, "expected a wildcard")),
        };

        let lower = zero_from(&parsed.version, position);
        let upper = bump(&lower, position - 1)?;
        Ok(VersionRange::between(lower, upper))
    }

    /// `low-high`: inclusive when `high` has a patch, otherwise rounded up
    fn hyphen(&self, left: &[Token], right: &[Token]) -> Result<VersionRange, VersionParserError> {
        let low = self.concrete_version(left, "hyphen")?;
        let high = self.concrete_version(right, "hyphen")?;

        let upper = match high.specified {
            3 => VersionRange::leaf(Operator::LessThanOrEqual, high.version),
            specified => VersionRange::leaf(Operator::LessThan, bump(&high.version, specified - 1)?),
        };

        Ok(VersionRange::and(
            VersionRange::leaf(Operator::GreaterThanOrEqual, low.version),
            upper,
        ))
    }

    /// A bare version only matches itself
    fn exact(&self, cluster: &[Token]) -> Result<VersionRange, VersionParserError> {
        let parsed = self.concrete_version(cluster, "exact")?;
        Ok(VersionRange::leaf(Operator::Equal, parsed.version))
    }
}

/// Flatten the AND nodes of a term into leaves separated by AND operators
fn push_conjuncts(range: VersionRange, items: &mut Vec<ExpressionItem>) {
    match range {
        VersionRange::And(left, right) => {
            push_conjuncts(*left, items);
            items.push(ExpressionItem::Operator(LogicalOperator::And));
            push_conjuncts(*right, items);
        }
        other => items.push(ExpressionItem::Operand(other)),
    }
}

fn last_numeric_kind(cluster: &[Token]) -> Option<TokenKind> {
    cluster
        .iter()
        .rev()
        .map(Token::kind)
        .find(TokenKind::is_numeric)
}

fn invalid_range(cluster: &[Token], reason: &str) -> VersionParserError {
    VersionParserError::InvalidRange {
        range: tokens_text(cluster),
        reason: reason.to_string(),
    }
}

/// Increment the component at `position` and zero everything after it.
/// The result is a release (no label).
fn bump(version: &Version, position: usize) -> Result<Version, VersionParserError> {
    let mut parts = [0u64; 3];
    for (i, component) in version.components().iter().enumerate().take(position + 1) {
        parts[i] = component.number().unwrap_or(0);
    }
    parts[position] = parts[position]
        .checked_add(1)
        .ok_or_else(|| VersionParserError::InvalidVersionWithReason {
            version: version.to_string(),
            reason: "carry overflow".to_string(),
        })?;
    Ok(Version::new(parts[0], parts[1], parts[2]))
}

/// Keep components before `position`, zero the rest
fn zero_from(version: &Version, position: usize) -> Version {
    let mut parts = [0u64; 3];
    for (i, component) in version.components().iter().enumerate().take(position) {
        parts[i] = component.number().unwrap_or(0);
    }
    Version::new(parts[0], parts[1], parts[2])
}
