use crate::expenses::ExpenseId;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("index {index} is out of range ({len} expenses)")]
    InvalidIndex { index: usize, len: usize },

    #[error("no expense with id {0}")]
    UnknownExpense(ExpenseId),

    #[error("invalid currency code {0:?}")]
    InvalidCurrency(String),

    #[error("invalid amount: {0}")]
    ParseAmount(#[from] rust_decimal::Error),
}
