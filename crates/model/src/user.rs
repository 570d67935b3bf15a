use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{trip::TripRecord, ExampleData};

/// A rider account, keyed by username.
///
/// `trips` is append-only and in insertion order, which is also
/// chronological order. The last element is the user's most recent trip.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Opaque credential digest. Hashing happens outside this system; the
    /// plaintext password never reaches it.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub trips: Vec<TripRecord>,
}

impl HasId for UserAccount {
    type IdType = String;
}

impl UserAccount {
    pub fn new<S: Into<String>>(password_hash: S) -> Self {
        Self {
            password_hash: password_hash.into(),
            trips: vec![],
        }
    }
}

impl ExampleData for UserAccount {
    fn example_data() -> Self {
        Self {
            password_hash: "$2b$10$...".to_owned(),
            trips: vec![TripRecord::example_data()],
        }
    }
}
