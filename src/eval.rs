use crate::parser::{
    tokenize, BinaryOperator, ExpressionError, ExpressionErrorKind, Formula, Token,
};
use crate::symbols::Variable;

/// Evaluates a literal-only expression (`0`, `1`, `AND`, `OR`, `NOT` and parentheses).
///
/// Variables and overline marks are rejected: they must have been removed by the normalizer.
pub fn evaluate(normalized: &str) -> Result<bool, ExpressionError> {
    let error = |kind| ExpressionError::new(normalized, kind);
    let tokens = tokenize(normalized);

    if let Some(token) = tokens.iter().find(|t| !is_literal_only(**t)) {
        return Err(error(match *token {
            Token::Var(v) => ExpressionErrorKind::FreeVariable(v),
            Token::Unknown(c) => ExpressionErrorKind::UnknownCharacter(c),
            other => ExpressionErrorKind::UnexpectedToken(other.to_string()),
        }));
    }

    Formula::parse(&tokens)
        .and_then(|formula| formula.eval(&|_| None))
        .map_err(error)
}

const fn is_literal_only(token: Token) -> bool {
    matches!(
        token,
        Token::Const(_)
            | Token::And
            | Token::Or
            | Token::Not
            | Token::OpenParen
            | Token::CloseParen
    )
}

impl Formula {
    /// Evaluates the formula, looking up variables with `lookup`.
    pub fn eval(&self, lookup: &dyn Fn(Variable) -> Option<bool>) -> Result<bool, ExpressionErrorKind> {
        match self {
            Self::False => Ok(false),
            Self::True => Ok(true),
            Self::Var(v) => lookup(*v).ok_or(ExpressionErrorKind::FreeVariable(*v)),
            Self::Not(f) => Ok(!f.eval(lookup)?),
            Self::BinaryOp(op, l, r) => {
                let l = l.eval(lookup)?;
                let r = r.eval(lookup)?;

                Ok(match op {
                    BinaryOperator::And => l && r,
                    BinaryOperator::Or => l || r,
                })
            }
        }
    }
}
