//! Core contracts for tabeval.
//!
//! This crate defines the in-memory table model, the CSV loader, and the
//! schema checks shared by the evaluation engine and the CLI.

pub mod error;
pub mod table;
pub mod validation;

pub use error::{Error, Result};
pub use table::{DEFAULT_NULL_TOKENS, LoadOptions, Table, load_table_csv};
pub use validation::{validate_row_counts, validate_same_columns};
