//! Errors
//!
//! Custom error types used throughout the `id3tree` crate.
use thiserror::Error;

/// Errors that can occur while building or querying a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum Id3Error {
    /// The data set has no rows.
    #[error("The data set is empty, at least one data point is required.")]
    EmptyDataSet,
    /// A row does not have the same length as the first row.
    #[error("Row {row} has {found} values, but {expected} were expected.")]
    RaggedDataSet { row: usize, expected: usize, found: usize },
    /// Rows carry no values at all, so there is no target column.
    #[error("Data points must end with a target class value.")]
    NoTargetColumn,
    /// Rows only carry the target column.
    #[error("Data points must have at least one attribute column before the target.")]
    NoAttributes,
    /// Attribute index passed that is not one of the attribute columns.
    #[error("Attribute {attribute} is out of range, the data set has {n_attributes} attribute columns.")]
    AttributeOutOfRange { attribute: usize, n_attributes: usize },
    /// Input vector passed to a decision has the wrong length.
    #[error("Input has {found} attribute values, but {expected} were expected.")]
    InputLength { expected: usize, found: usize },
    /// The value of the split attribute was never observed during training.
    #[error("Value {value} of attribute {attribute} was not observed during training.")]
    UnseenValue { attribute: usize, value: String },
    /// A decision was requested from a tree that was never built.
    #[error("The tree has not been fitted yet.")]
    NotFitted,
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model from file.
    #[error("Unable to read model from a file {0}")]
    UnableToRead(String),
}
