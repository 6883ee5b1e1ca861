//! The module contains the errors the engine can throw.

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
///
/// The server maps each variant to a fixed HTTP status: `Validation` and
/// `UserNotFound` become 400, `Forbidden` 403, `NotFound` 404 and
/// `Database` 500.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    /// The acting user named in the request does not exist. Kept separate
    /// from [`NotFound`](Self::NotFound) because the API reports it as a
    /// bad request, not a missing resource.
    #[error("User not found")]
    UserNotFound,
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
