use std::error::Error;

pub mod distance;
pub mod fare;
pub mod ledger;
pub mod registry;
pub mod store;
pub mod sync;

use store::StoreError;

/// Everything that can go wrong while handling a request against the core.
/// All variants are recoverable at the caller boundary; the surrounding
/// transport layer decides how to present them.
#[derive(Debug)]
pub enum RequestError {
    UserNotFound,
    ShuttleNotFound,
    NoMatchingTrip,
    TripAlreadyOpen,
    AlreadyExists,
    InvalidAction(String),
    InvalidInput(String),
    Storage(Box<dyn Error + Send + Sync>),
}

impl RequestError {
    pub fn invalid_input<S: Into<String>>(why: S) -> Self {
        Self::InvalidInput(why.into())
    }
}

impl From<StoreError> for RequestError {
    fn from(value: StoreError) -> Self {
        match value {
            // Absence is checked before any mutation, so a NotFound surfacing
            // here means the store lost a key mid-operation.
            StoreError::NotFound => Self::Storage("store reported a missing key".into()),
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::Unavailable(why) => Self::Storage(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
