//! Host editor model: document snapshots and edit transactions

pub mod document;
pub mod transaction;

pub use document::{Document, Line};
pub use transaction::{
    ChangeRange, FilterOutcome, Origin, Selection, TextChange, Transaction, TransactionError,
    TransactionSpec, UserEvent,
};
