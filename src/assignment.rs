use crate::symbols::Variable;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt;

/// One row's mapping from variables to truth values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    order: Vec<Variable>,
    values: FxHashMap<Variable, bool>,
}

impl Assignment {
    pub fn new<I: IntoIterator<Item = (Variable, bool)>>(values: I) -> Self {
        let mut assignment = Self::default();

        for (var, value) in values {
            assignment.insert(var, value);
        }

        assignment
    }

    pub fn insert(&mut self, var: Variable, value: bool) {
        if self.values.insert(var, value).is_none() {
            self.order.push(var);
        }
    }

    pub fn get(&self, var: Variable) -> Option<bool> {
        self.values.get(&var).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The assigned variables and their values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.order.iter().map(|&var| (var, self.values[&var]))
    }

    /// Enumerates all `2^k` assignments of `variables` in binary counting order,
    /// with the first variable as the most significant bit.
    ///
    /// For an empty variable list this yields exactly one (empty) assignment.
    pub fn enumerate(variables: &[Variable]) -> Assignments<'_> {
        debug_assert!(variables.len() < u64::BITS as usize);

        Assignments {
            variables,
            next: 0,
            end: 1u64 << variables.len(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .map(|(var, value)| format!("{var}={}", u8::from(value)))
                .join(", ")
        )
    }
}

/// Iterator over all assignments of a variable list, see [`Assignment::enumerate`].
#[derive(Debug, Clone)]
pub struct Assignments<'a> {
    variables: &'a [Variable],
    next: u64,
    end: u64,
}

impl<'a> Iterator for Assignments<'a> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }

        let row = self.next;
        let k = self.variables.len();
        self.next += 1;

        Some(Assignment::new(
            self.variables
                .iter()
                .enumerate()
                .map(|(i, &var)| (var, (row >> (k - 1 - i)) & 1 == 1)),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}
