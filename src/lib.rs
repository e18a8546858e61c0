#![warn(clippy::disallowed_types)]

pub use symbols::*;
pub use truth_table::TruthTableEntry;

pub mod assignment;
pub mod eval;
pub mod generator;
pub mod normalizer;
pub mod output;
pub mod parser;
pub mod parser_io;
pub mod trace;

mod truth_table;

mod symbols;
