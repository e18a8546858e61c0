use crate::symbols::Variable;
use itertools::Itertools;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::Peekable;
use std::slice::Iter;
use std::str::FromStr;
use thiserror::Error;

/// Combining overline (U+0305), postfix negation of the preceding operand.
pub const OVERLINE: char = '\u{0305}';

lazy_static! {
    static ref TOKENIZER: Regex = Regex::new(
        r"(?s)(?P<symbol>∧|&|·|\*|∨|\||\+|¬|!|~|\x{0305})|(?P<identifier>[A-Za-z]+)|(?P<constant>[01])|(?P<open>\()|(?P<close>\))|(?P<space>\s+)|(?P<unknown>.)"
    )
    .expect("tokenizer regex is valid");
}

/// A single function definition line: `name(params) = expression`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: String,
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has no `=` separating name and expression.
    #[error("missing '=' in definition: {0}")]
    MissingEquals(String),
    /// Nothing precedes the `=`.
    #[error("missing function name in definition: {0}")]
    EmptyName(String),
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }

    /// The cosmetic parameter list, e.g. `["x", "y"]` for `f(x, y)`.
    ///
    /// Parameters are not checked against the variables used in the expression.
    pub fn params(&self) -> Vec<&str> {
        self.name
            .split_once('(')
            .and_then(|(_, rest)| rest.strip_suffix(')'))
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The free variables of this definition's expression.
    pub fn variables(&self) -> BTreeSet<Variable> {
        variables(&self.expression)
    }
}

impl FromStr for FunctionDefinition {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, expression) = line
            .split_once('=')
            .ok_or_else(|| ParseError::MissingEquals(line.to_string()))?;

        let name = name.trim();

        if name.is_empty() {
            return Err(ParseError::EmptyName(line.to_string()));
        }

        Ok(Self::new(name, expression.trim()))
    }
}

/// Parses every definition in `input`; blank lines and lines that are not definitions are skipped.
pub fn parse_input(input: &str) -> Vec<FunctionDefinition> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match line.parse::<FunctionDefinition>() {
            Ok(definition) => Some(definition),
            Err(e) => {
                debug!("skipping line: {e}");
                None
            }
        })
        .collect()
}

/// Collects the free variables of all definitions, sorted by name.
pub fn collect_variables(functions: &[FunctionDefinition]) -> Vec<Variable> {
    functions
        .iter()
        .flat_map(FunctionDefinition::variables)
        .sorted()
        .dedup()
        .collect()
}

/// The free variables occurring in a single expression.
pub fn variables(expression: &str) -> BTreeSet<Variable> {
    tokenize(expression)
        .into_iter()
        .filter_map(|t| match t {
            Token::Var(v) => Some(v),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Var(Variable),
    Const(bool),
    And,
    Or,
    Not,
    Overline,
    OpenParen,
    CloseParen,
    Unknown(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => fmt::Display::fmt(v, f),
            Self::Const(true) => f.write_str("1"),
            Self::Const(false) => f.write_str("0"),
            Self::And => f.write_str("∧"),
            Self::Or => f.write_str("∨"),
            Self::Not => f.write_str("¬"),
            Self::Overline => write!(f, "{OVERLINE}"),
            Self::OpenParen => f.write_str("("),
            Self::CloseParen => f.write_str(")"),
            Self::Unknown(c) => write!(f, "{c}"),
        }
    }
}

/// How operators are spelled when rendering a token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `∧ ∨ ¬` and overline marks, as written by the user
    Source,
    /// `AND OR NOT`, the normalized form
    Keyword,
}

/// Splits an expression into tokens. Characters that are not part of the
/// expression language become [`Token::Unknown`].
pub fn tokenize(src: &str) -> Vec<Token> {
    let mut result = Vec::new();

    for c in TOKENIZER.captures_iter(src) {
        if let Some(symbol) = c.name("symbol") {
            match symbol.as_str() {
                "∧" | "&" | "·" | "*" => result.push(Token::And),
                "∨" | "|" | "+" => result.push(Token::Or),
                "¬" | "!" | "~" => result.push(Token::Not),
                _ => result.push(Token::Overline),
            }
        } else if let Some(identifier) = c.name("identifier") {
            // a run of letters is a keyword as a whole, otherwise one variable per letter
            match identifier.as_str() {
                "AND" => result.push(Token::And),
                "OR" => result.push(Token::Or),
                "NOT" => result.push(Token::Not),
                letters => result.extend(
                    letters
                        .chars()
                        .map(|letter| Variable::new(letter).map_or(Token::Unknown(letter), Token::Var)),
                ),
            }
        } else if let Some(constant) = c.name("constant") {
            result.push(Token::Const(constant.as_str() == "1"));
        } else if c.name("open").is_some() {
            result.push(Token::OpenParen);
        } else if c.name("close").is_some() {
            result.push(Token::CloseParen);
        } else if let Some(unknown) = c.name("unknown") {
            result.extend(unknown.as_str().chars().map(Token::Unknown));
        }
    }

    result
}

/// Renders tokens with single spaces between operands and operators.
pub fn render(tokens: &[Token], notation: Notation) -> String {
    let mut result = String::new();
    let mut previous: Option<Token> = None;

    for &token in tokens {
        let attached = match previous {
            None | Some(Token::OpenParen) => true,
            Some(Token::Not) => notation == Notation::Source,
            _ => matches!(token, Token::CloseParen | Token::Overline),
        };

        if !attached {
            result.push(' ');
        }

        match (notation, token) {
            (Notation::Keyword, Token::And) => result.push_str("AND"),
            (Notation::Keyword, Token::Or) => result.push_str("OR"),
            (Notation::Keyword, Token::Not) => result.push_str("NOT"),
            (_, other) => result.push_str(&other.to_string()),
        }

        previous = Some(token);
    }

    result
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionErrorKind {
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("unknown character '{0}'")]
    UnknownCharacter(char),
    #[error("overline does not follow an operand")]
    StrayOverline,
    /// A variable is left in an expression that should only contain literals.
    #[error("free variable '{0}' in literal expression")]
    FreeVariable(Variable),
    /// A variable has no value in the assignment.
    #[error("no value assigned to variable '{0}'")]
    UnboundVariable(Variable),
}

/// An expression could not be normalized or evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} in \"{expression}\"")]
pub struct ExpressionError {
    pub expression: String,
    pub kind: ExpressionErrorKind,
}

impl ExpressionError {
    pub fn new(expression: impl Into<String>, kind: ExpressionErrorKind) -> Self {
        Self {
            expression: expression.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
}

/// Syntax tree of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    False,
    True,
    Var(Variable),
    Not(Box<Formula>),
    BinaryOp(BinaryOperator, Box<Formula>, Box<Formula>),
}

type TokenReader<'a> = Peekable<Iter<'a, Token>>;

impl FromStr for Formula {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&tokenize(s)).map_err(|kind| ExpressionError::new(s, kind))
    }
}

// precedence, tightest first: postfix overline, prefix not, and, or
impl Formula {
    pub fn parse(tokens: &[Token]) -> Result<Self, ExpressionErrorKind> {
        let mut tokens = tokens.iter().peekable();
        let result = Self::parse_disjunction(&mut tokens)?;

        match tokens.next() {
            None => Ok(result),
            Some(Token::CloseParen) => Err(ExpressionErrorKind::UnbalancedParentheses),
            Some(other) => Err(unexpected(*other)),
        }
    }

    fn parse_disjunction(tokens: &mut TokenReader) -> Result<Self, ExpressionErrorKind> {
        let mut left = Self::parse_conjunction(tokens)?;

        while tokens.next_if_eq(&&Token::Or).is_some() {
            let right = Self::parse_conjunction(tokens)?;
            left = Self::BinaryOp(BinaryOperator::Or, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_conjunction(tokens: &mut TokenReader) -> Result<Self, ExpressionErrorKind> {
        let mut left = Self::parse_negation(tokens)?;

        while tokens.next_if_eq(&&Token::And).is_some() {
            let right = Self::parse_negation(tokens)?;
            left = Self::BinaryOp(BinaryOperator::And, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_negation(tokens: &mut TokenReader) -> Result<Self, ExpressionErrorKind> {
        let next = tokens.peek().copied().copied();

        match next {
            Some(Token::Not) => {
                expect(Token::Not, tokens)?;
                let negated = Self::parse_negation(tokens)?;
                Ok(Self::Not(Box::new(negated)))
            }
            Some(Token::Overline) if opens_group(tokens) => {
                expect(Token::Overline, tokens)?;
                let negated = Self::parse_overlined(tokens)?;
                Ok(Self::Not(Box::new(negated)))
            }
            _ => Self::parse_overlined(tokens),
        }
    }

    fn parse_overlined(tokens: &mut TokenReader) -> Result<Self, ExpressionErrorKind> {
        let mut operand = Self::parse_operand(tokens)?;

        while tokens.next_if_eq(&&Token::Overline).is_some() {
            operand = Self::Not(Box::new(operand));
        }

        Ok(operand)
    }

    fn parse_operand(tokens: &mut TokenReader) -> Result<Self, ExpressionErrorKind> {
        match tokens.next() {
            Some(Token::OpenParen) => {
                let subform = Self::parse_disjunction(tokens)?;
                match tokens.next() {
                    Some(Token::CloseParen) => Ok(subform),
                    None => Err(ExpressionErrorKind::UnbalancedParentheses),
                    Some(other) => Err(unexpected(*other)),
                }
            }
            Some(Token::Const(false)) => Ok(Self::False),
            Some(Token::Const(true)) => Ok(Self::True),
            Some(Token::Var(v)) => Ok(Self::Var(*v)),
            Some(Token::CloseParen) => Err(ExpressionErrorKind::UnbalancedParentheses),
            Some(Token::Overline) => Err(ExpressionErrorKind::StrayOverline),
            Some(Token::Unknown(c)) => Err(ExpressionErrorKind::UnknownCharacter(*c)),
            Some(other) => Err(unexpected(*other)),
            None => Err(ExpressionErrorKind::UnexpectedEnd),
        }
    }
}

/// Whether the overline at the head of `tokens` is directly followed by `(`.
fn opens_group(tokens: &TokenReader) -> bool {
    let mut ahead = tokens.clone();
    ahead.next();
    matches!(ahead.peek(), Some(Token::OpenParen))
}

fn unexpected(token: Token) -> ExpressionErrorKind {
    match token {
        Token::Unknown(c) => ExpressionErrorKind::UnknownCharacter(c),
        Token::Overline => ExpressionErrorKind::StrayOverline,
        other => ExpressionErrorKind::UnexpectedToken(other.to_string()),
    }
}

fn expect(token: Token, tokens: &mut TokenReader) -> Result<(), ExpressionErrorKind> {
    match tokens.next() {
        Some(t) if *t == token => Ok(()),
        Some(t) => Err(unexpected(*t)),
        None => Err(ExpressionErrorKind::UnexpectedEnd),
    }
}

// syntax:
// x
// x ∧ y, x & y, x AND y, x · y
// x ∨ y, x | y, x OR y, x + y
// ¬x, !x, ~x, NOT x
// x̅ == ¬x
// (x ∧ y)̅ == ¬(x ∧ y)
// ̅(x ∧ y) == ¬(x ∧ y)
// x̅̅ == ¬¬x
// 0̅ == 1
// x ∨ y ∧ z == x ∨ (y ∧ z)
