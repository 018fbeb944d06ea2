//! Tokenizer for version and range expressions
//!
//! The tokenizer never fails. Anything it does not understand ends up in a
//! label token and is rejected by the parser.

use std::fmt;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Digits,
    WildcardDigits,
    DashSeparator,
    DotSeparator,
    TildeRange,
    CaretRange,
    LabelString,
    ComparatorEqual,
    ComparatorGreaterThan,
    ComparatorGreaterThanOrEqual,
    ComparatorLessThan,
    ComparatorLessThanOrEqual,
    LogicalAnd,
    LogicalOr,
}

impl TokenKind {
    pub fn is_comparator(&self) -> bool {
        matches!(
            self,
            TokenKind::ComparatorEqual
                | TokenKind::ComparatorGreaterThan
                | TokenKind::ComparatorGreaterThanOrEqual
                | TokenKind::ComparatorLessThan
                | TokenKind::ComparatorLessThanOrEqual
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, TokenKind::LogicalAnd | TokenKind::LogicalOr)
    }

    /// Digits or a wildcard
    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenKind::Digits | TokenKind::WildcardDigits)
    }

    /// Tokens that open a new range term
    pub fn starts_term(&self) -> bool {
        self.is_comparator() || matches!(self, TokenKind::TildeRange | TokenKind::CaretRange)
    }
}

/// A typed slice of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.value)
    }
}

/// Join token values back into source-like text
pub fn tokens_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::value).collect()
}

/// Single pass scanner turning text into tokens
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenize an expression
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(input.trim());
        scanner.run();
        log::trace!("tokenized {:?} into {} tokens", input, scanner.tokens.len());
        scanner.tokens
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
    digits: String,
    label: String,
    // set once label or build text starts, until the term ends
    in_label: bool,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Scanner {
            chars: input.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
            digits: String::new(),
            label: String::new(),
            in_label: false,
        }
    }

    fn run(&mut self) {
        while let Some(c) = self.current() {
            match c {
                '-' | '~' | '^' => {
                    self.in_label = false;
                    let kind = match c {
                        '-' => TokenKind::DashSeparator,
                        '~' => TokenKind::TildeRange,
                        _ => TokenKind::CaretRange,
                    };
                    self.simple(kind, c)
                }
                '.' => self.simple(TokenKind::DotSeparator, c),
                '*' => self.simple(TokenKind::WildcardDigits, c),
                // `x` inside a label or build metadata is a letter
                'x' if !self.in_label && !self.peek().is_some_and(|n| n.is_ascii_alphabetic()) => {
                    self.simple(TokenKind::WildcardDigits, c)
                }
                '>' | '<' | '=' => self.comparator(c),
                'v' if !self.in_label
                    && self.digits.is_empty()
                    && self.peek().is_some_and(|n| n.is_ascii_digit()) =>
                {
                    self.pos += 1;
                }
                c if is_logical_char(c) => self.logical(),
                c => {
                    if !c.is_ascii_digit() || !self.label.is_empty() {
                        self.in_label = true;
                        self.label.push(c);
                    } else {
                        self.digits.push(c);
                    }
                    self.pos += 1;
                }
            }
        }
        self.flush();
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(Token::kind)
    }

    fn flush(&mut self) {
        if !self.digits.is_empty() {
            let digits = std::mem::take(&mut self.digits);
            self.tokens.push(Token::new(TokenKind::Digits, digits));
        }
        if !self.label.is_empty() {
            let label = std::mem::take(&mut self.label);
            self.tokens.push(Token::new(TokenKind::LabelString, label));
        }
    }

    fn simple(&mut self, kind: TokenKind, c: char) {
        self.flush();
        self.tokens.push(Token::new(kind, c.to_string()));
        self.pos += 1;
    }

    fn comparator(&mut self, c: char) {
        self.flush();
        self.in_label = false;

        let (kind, symbol) = match (c, self.peek()) {
            ('>', Some('=')) => (TokenKind::ComparatorGreaterThanOrEqual, ">="),
            ('<', Some('=')) => (TokenKind::ComparatorLessThanOrEqual, "<="),
            ('>', _) => (TokenKind::ComparatorGreaterThan, ">"),
            ('<', _) => (TokenKind::ComparatorLessThan, "<"),
            _ => (TokenKind::ComparatorEqual, "="),
        };

        // `>=1.0<2.0` is two terms joined by AND
        if matches!(
            self.last_kind(),
            Some(TokenKind::Digits | TokenKind::WildcardDigits | TokenKind::LabelString)
        ) {
            self.tokens.push(Token::new(TokenKind::LogicalAnd, ""));
        }

        self.tokens.push(Token::new(kind, symbol));
        self.pos += symbol.len();
    }

    fn logical(&mut self) {
        self.flush();
        self.in_label = false;

        // Whitespace after a comparator or range marker is insignificant
        if self
            .last_kind()
            .is_some_and(|k| k.starts_term())
        {
            self.pos += 1;
            return;
        }

        let start = self.pos;
        while self.current().is_some_and(is_logical_char) {
            self.pos += 1;
        }
        let run: String = self.chars[start..self.pos].iter().collect();
        let trimmed = run.trim();

        // Whitespace around a hyphen range separator is insignificant
        if trimmed.is_empty()
            && (self.last_kind() == Some(TokenKind::DashSeparator) || self.current() == Some('-'))
        {
            return;
        }

        let kind = if trimmed.is_empty() || trimmed == "&&" {
            TokenKind::LogicalAnd
        } else {
            TokenKind::LogicalOr
        };
        self.tokens.push(Token::new(kind, trimmed));
    }
}

fn is_logical_char(c: char) -> bool {
    c == ',' || c == '|' || c == '&' || c.is_whitespace()
}
