use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Single result cell in a truth table.
///
/// A function evaluates to either [`True`] or [`False`] under an assignment.
/// When the expression cannot be evaluated (unknown tokens, unbalanced parentheses, ...),
/// the cell is marked [`Undefined`] and the rest of the table is still generated.
///
/// [`Undefined`]: TruthTableEntry::Undefined
/// [`True`]: TruthTableEntry::True
/// [`False`]: TruthTableEntry::False
pub enum TruthTableEntry {
    /// The function evaluates to 1
    True,
    /// The function evaluates to 0
    False,
    /// The expression could not be evaluated
    Undefined,
}

impl From<bool> for TruthTableEntry {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl Display for TruthTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "1",
            Self::False => "0",
            Self::Undefined => "undefined",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bool() {
        assert_eq!(TruthTableEntry::from(true), TruthTableEntry::True);
        assert_eq!(TruthTableEntry::from(false), TruthTableEntry::False);
    }

    #[test]
    fn display_pads() {
        assert_eq!(format!("{:>3}", TruthTableEntry::True), "  1");
        assert_eq!(TruthTableEntry::Undefined.to_string(), "undefined");
    }
}
