//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when the addressed transaction does not exist.
//! - [`MissingField`] thrown when a mandatory input is absent.
//! - [`InvalidField`] thrown when an input is present but not acceptable.
//! - [`EmptyUpdate`] thrown when an update carries no field at all.
//! - [`InvalidReference`] thrown when an input points to a missing account or
//!   budget.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`MissingField`]: EngineError::MissingField
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`EmptyUpdate`]: EngineError::EmptyUpdate
//!  [`InvalidReference`]: EngineError::InvalidReference
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("Nothing to update")]
    EmptyUpdate,
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::EmptyUpdate, Self::EmptyUpdate) => true,
            (Self::InvalidReference(a), Self::InvalidReference(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
