//! Rewrites a user-written expression into a literal-only Boolean expression.
//!
//! Substitution and operator rewriting both work on tokens, so a variable can
//! never be matched inside an operator keyword or another token.
//!
//! ```
//! use truthtab::assignment::Assignment;
//! use truthtab::normalizer::normalize;
//! use truthtab::Variable;
//!
//! let x = Variable::new('x').unwrap();
//! let y = Variable::new('y').unwrap();
//! let assignment = Assignment::new([(x, true), (y, false)]);
//!
//! assert_eq!(
//!     normalize("(x ∨ y̅) ∧ ¬y", &assignment).unwrap(),
//!     "(1 OR NOT (0)) AND NOT 0"
//! );
//! ```

use crate::assignment::Assignment;
use crate::parser::{render, tokenize, ExpressionError, ExpressionErrorKind, Notation, Token};
use crate::trace::Trace;

/// Normalizes `expression` under `assignment`, see [`normalize_traced`].
pub fn normalize(expression: &str, assignment: &Assignment) -> Result<String, ExpressionError> {
    normalize_traced(expression, assignment, &mut Trace::new())
}

/// Substitutes the values of `assignment` into `expression` and rewrites all
/// operators to `AND`, `OR` and `NOT`.
///
/// Every overline-marked operand `G̅` becomes `NOT (G)`. Each substitution and the
/// normalized result are recorded in `trace`.
///
/// The output is spaced canonically, one space between tokens except after `(` and
/// before `)`. Normalizing that output again returns it unchanged, while
/// literal-only input spaced differently (`NOT(1)`) is respaced (`NOT (1)`).
pub fn normalize_traced(
    expression: &str,
    assignment: &Assignment,
    trace: &mut Trace,
) -> Result<String, ExpressionError> {
    let error = |kind| ExpressionError::new(expression, kind);
    let mut tokens = tokenize(expression);

    for (var, value) in assignment.iter() {
        if !tokens.contains(&Token::Var(var)) {
            continue;
        }

        for token in tokens.iter_mut().filter(|t| **t == Token::Var(var)) {
            *token = Token::Const(value);
        }

        trace.push(format!(
            "Replace {var} with {}: {}",
            u8::from(value),
            render(&tokens, Notation::Source)
        ));
    }

    let normalized = rewrite_operators(&tokens).map_err(error)?;
    let result = render(&normalized, Notation::Keyword);
    trace.push(format!("Normalized expression: {result}"));

    Ok(result)
}

/// Turns a substituted token sequence into literal-only form.
fn rewrite_operators(tokens: &[Token]) -> Result<Vec<Token>, ExpressionErrorKind> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());

    for (i, &token) in tokens.iter().enumerate() {
        match token {
            Token::Var(v) => return Err(ExpressionErrorKind::UnboundVariable(v)),
            Token::Unknown(c) => return Err(ExpressionErrorKind::UnknownCharacter(c)),
            Token::Overline => match output.last().copied() {
                Some(Token::Const(value)) => {
                    output.pop();
                    output.extend([
                        Token::Not,
                        Token::OpenParen,
                        Token::Const(value),
                        Token::CloseParen,
                    ]);
                }
                Some(Token::CloseParen) => {
                    let open = matching_open(&output)
                        .ok_or(ExpressionErrorKind::UnbalancedParentheses)?;
                    output.insert(open, Token::Not);
                }
                _ if tokens.get(i + 1) == Some(&Token::OpenParen) => output.push(Token::Not),
                _ => return Err(ExpressionErrorKind::StrayOverline),
            },
            other => output.push(other),
        }
    }

    Ok(output)
}

/// Index of the `(` matching the `)` at the end of `tokens`.
fn matching_open(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate().rev() {
        match token {
            Token::CloseParen => depth += 1,
            Token::OpenParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
