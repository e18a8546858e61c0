use crate::assignment::Assignment;
use crate::eval::evaluate;
use crate::normalizer::normalize_traced;
use crate::parser::{collect_variables, ExpressionError, FunctionDefinition};
use crate::symbols::Variable;
use crate::trace::Trace;
use crate::truth_table::TruthTableEntry;
use log::{debug, trace, warn};
use thiserror::Error;

/// Default upper bound on the number of free variables, i.e. at most 65536 rows.
pub const DEFAULT_MAX_VARIABLES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub max_variables: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// There is nothing to tabulate.
    #[error("no valid functions")]
    NoFunctions,
    #[error("{count} variables exceed the limit of {limit} (2^{count} rows)")]
    TooManyVariables { count: usize, limit: usize },
}

/// Result of one function under one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub entry: TruthTableEntry,
    pub trace: Trace,
    pub error: Option<ExpressionError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRow {
    pub assignment: Assignment,
    /// One cell per function, in input order.
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    pub variables: Vec<Variable>,
    pub functions: Vec<FunctionDefinition>,
    pub rows: Vec<TruthTableRow>,
}

/// Normalizes and evaluates `expression` under `assignment`.
///
/// Failures do not propagate: they produce an [`TruthTableEntry::Undefined`] cell
/// whose trace ends with the error message.
pub fn evaluate_cell(expression: &str, assignment: &Assignment) -> Cell {
    let mut steps = Trace::new();

    match normalize_traced(expression, assignment, &mut steps).and_then(|n| evaluate(&n)) {
        Ok(value) => {
            steps.push(format!("Final result: {}", u8::from(value)));
            Cell {
                entry: value.into(),
                trace: steps,
                error: None,
            }
        }
        Err(e) => {
            warn!("cannot evaluate {expression} with {assignment}: {e}");
            steps.push(format!("Error: {e}"));
            Cell {
                entry: TruthTableEntry::Undefined,
                trace: steps,
                error: Some(e),
            }
        }
    }
}

/// Evaluates every function under every assignment of their free variables.
pub fn generate(
    functions: &[FunctionDefinition],
    options: GeneratorOptions,
) -> Result<TruthTable, GenerateError> {
    if functions.is_empty() {
        return Err(GenerateError::NoFunctions);
    }

    let variables = collect_variables(functions);
    debug!(
        "tabulating {} functions over variables {:?}",
        functions.len(),
        variables
    );

    if variables.len() > options.max_variables {
        return Err(GenerateError::TooManyVariables {
            count: variables.len(),
            limit: options.max_variables,
        });
    }

    let rows = Assignment::enumerate(&variables)
        .map(|assignment| {
            let cells = functions
                .iter()
                .map(|f| {
                    let cell = evaluate_cell(&f.expression, &assignment);
                    trace!("{} with {assignment} = {}", f.name, cell.entry);
                    cell
                })
                .collect();

            TruthTableRow { assignment, cells }
        })
        .collect();

    Ok(TruthTable {
        variables,
        functions: functions.to_vec(),
        rows,
    })
}

impl TruthTable {
    /// Variable names, function names and optionally one steps column per function.
    pub fn headers(&self, with_steps: bool) -> Vec<String> {
        let variables = self.variables.iter().map(ToString::to_string);
        let functions = self.functions.iter().map(|f| f.name.clone());
        let steps = self
            .functions
            .iter()
            .filter(|_| with_steps)
            .map(|f| format!("Steps for {}", f.name));

        variables.chain(functions).chain(steps).collect()
    }

    /// Rows of cell strings, in the column order of [`TruthTable::headers`].
    pub fn records(&self, with_steps: bool) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let values = row.assignment.iter().map(|(_, v)| u8::from(v).to_string());
                let results = row.cells.iter().map(|c| c.entry.to_string());
                let steps = row
                    .cells
                    .iter()
                    .filter(|_| with_steps)
                    .map(|c| c.trace.to_string());

                values.chain(results).chain(steps).collect()
            })
            .collect()
    }

    /// The results of the function called `name`, one per row.
    pub fn column(&self, name: &str) -> Option<Vec<TruthTableEntry>> {
        let index = self.functions.iter().position(|f| f.name == name)?;

        Some(self.rows.iter().map(|row| row.cells[index].entry).collect())
    }
}
