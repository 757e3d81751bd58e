pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    #[display("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("row {row}: expected {expected} cells, got {actual}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("row {row}, column {col}: unknown tile symbol {symbol:?}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    #[error(not(source))]
    input: String,
}

impl ParseSeedError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }
}
