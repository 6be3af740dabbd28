#![warn(clippy::disallowed_types)]

pub use error::{ExprError, LexError, ParseError};
pub use parser::{parse, LogicExpr};
pub use symbols::*;
pub use truth_table::{Column, ColumnKind, Row, TableOptions, TruthTable, TruthTableEntry};

pub mod enumerate;
pub mod error;
pub mod eval;
pub mod parser;
pub mod parser_io;
pub mod truth_table_io;

mod truth_table;

mod symbols;

/// Evaluate `expr` under every assignment of its variables.
///
/// The table has `2^n` rows for `n` distinct variables and is built in memory, so callers
/// should bound `n` first (the binary refuses more than `--max-vars`). Row indices are `u128`:
/// past [`VariableRegistry::MAX_VARIABLES`] the row count saturates and the table no longer
/// covers every assignment.
pub fn build_truth_table(expr: &LogicExpr) -> TruthTable {
    TruthTable::build(expr)
}
