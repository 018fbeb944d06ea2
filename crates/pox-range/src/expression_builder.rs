//! Operator-precedence construction of range expression trees
//!
//! Terms and logical operators arrive in source order. They are reordered into
//! postfix form with the shunting-yard algorithm (AND binds tighter than OR,
//! both left-associative) and then folded into a [`VersionRange`].

use std::fmt;

use crate::range::{Operator, VersionRange};
use crate::version_parser::VersionParserError;

/// Logical operators between range terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn precedence(&self) -> u8 {
        match self {
            LogicalOperator::And => 1,
            LogicalOperator::Or => 0,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "&&"),
            LogicalOperator::Or => write!(f, "||"),
        }
    }
}

/// An operand or an operator of the expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExpressionItem {
    Operand(VersionRange),
    Operator(LogicalOperator),
}

pub(crate) struct ExpressionBuilder;

impl ExpressionBuilder {
    /// Build a single tree from infix items; `source` is used for errors
    pub fn build(items: Vec<ExpressionItem>, source: &str) -> Result<VersionRange, VersionParserError> {
        let postfix = Self::to_postfix(items);
        Self::reduce(postfix, source)
    }

    /// Shunting-yard: infix to reverse polish order
    pub fn to_postfix(items: Vec<ExpressionItem>) -> Vec<ExpressionItem> {
        let mut output = Vec::with_capacity(items.len());
        let mut operators: Vec<LogicalOperator> = Vec::new();

        for item in items {
            match item {
                ExpressionItem::Operand(_) => output.push(item),
                ExpressionItem::Operator(incoming) => {
                    while let Some(top) = operators.last() {
                        if top.precedence() < incoming.precedence() {
                            break;
                        }
                        output.push(ExpressionItem::Operator(*top));
                        operators.pop();
                    }
                    operators.push(incoming);
                }
            }
        }

        output.extend(operators.into_iter().rev().map(ExpressionItem::Operator));
        output
    }

    /// Fold postfix items into a tree
    pub fn reduce(postfix: Vec<ExpressionItem>, source: &str) -> Result<VersionRange, VersionParserError> {
        let invalid = |reason: String| VersionParserError::InvalidRange {
            range: source.to_string(),
            reason,
        };

        let mut stack: Vec<VersionRange> = Vec::new();
        for item in postfix {
            match item {
                ExpressionItem::Operand(range) => stack.push(range),
                ExpressionItem::Operator(operator) => {
                    let (left, right) = match (stack.pop(), stack.pop()) {
                        (Some(right), Some(left)) => (left, right),
                        _ => return Err(invalid(format!("\"{}\" is missing an operand", operator))),
                    };

                    let combined = match operator {
                        LogicalOperator::And => {
                            if is_equality(&left) && is_equality(&right) {
                                return Err(invalid(format!(
                                    "exact versions {} and {} cannot be combined with AND",
                                    left, right
                                )));
                            }
                            VersionRange::and(left, right)
                        }
                        LogicalOperator::Or => VersionRange::or(left, right),
                    };
                    stack.push(combined);
                }
            }
        }

        let result = stack.pop().ok_or_else(|| invalid("empty expression".to_string()))?;
        if !stack.is_empty() {
            return Err(invalid("terms must be joined by a logical operator".to_string()));
        }
        Ok(result)
    }
}

fn is_equality(range: &VersionRange) -> bool {
    matches!(range.as_leaf(), Some((Operator::Equal, _)))
}
