//! Data model - column types, columns, and message formats.
//!
//! A log message format is an ordered list of typed, named columns bound to
//! a numeric message id. The model layer owns the typing rules (which type
//! codes exist and how wide they are on the wire) and the derived strings
//! (format string, joined column names) that feed the self-describing FMT
//! records.

mod column;
mod column_type;
mod message;

pub use column::ColumnFormat;
pub use column_type::ColumnType;
pub use message::MessageFormat;
