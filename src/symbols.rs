use std::fmt::{self, Display};

/// A free variable of a Boolean function.
///
/// Variables are exactly one ASCII letter and case-sensitive.
/// They are ordered by their letter, so a sorted list of variables is lexicographic
/// (`A` < `Z` < `a` < `z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(char);

impl Variable {
    /// Creates a variable from a letter, or `None` if `name` is not an ASCII letter.
    pub const fn new(name: char) -> Option<Self> {
        if name.is_ascii_alphabetic() {
            Some(Self(name))
        } else {
            None
        }
    }

    pub const fn name(self) -> char {
        self.0
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 4];
        f.pad(self.0.encode_utf8(&mut buf))
    }
}
