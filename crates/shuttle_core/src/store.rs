use std::{error, result};

use async_trait::async_trait;
use model::{shuttle::ShuttleState, trip::TripRecord, user::UserAccount, WithId};
use utility::id::Id;

#[derive(Debug)]
pub enum StoreError {
    NotFound,
    AlreadyExists,
    Unavailable(Box<dyn error::Error + Send + Sync>),
}

impl StoreError {
    pub fn unavailable<E: error::Error + Send + Sync + 'static>(why: E) -> Self {
        Self::Unavailable(Box::new(why))
    }
}

pub type Result<T> = result::Result<T, StoreError>;

/// Keyed store of the latest known state per shuttle. The registry is the
/// only writer; there is no delete.
#[async_trait]
pub trait LocationStore {
    async fn get(&self, id: &Id<ShuttleState>) -> Result<Option<WithId<ShuttleState>>>;

    /// Inserts or overwrites the state stored under `shuttle.id`.
    async fn upsert(&self, shuttle: WithId<ShuttleState>) -> Result<WithId<ShuttleState>>;

    async fn list_all(&self) -> Result<Vec<WithId<ShuttleState>>>;
}

/// Keyed store of rider accounts and their trip histories.
#[async_trait]
pub trait UserStore {
    async fn get(&self, username: &Id<UserAccount>) -> Result<Option<WithId<UserAccount>>>;

    /// Fails with `AlreadyExists` if the username is taken.
    async fn create(&self, user: WithId<UserAccount>) -> Result<()>;

    /// Appends a record to the end of the user's trip history.
    async fn append_trip(&self, username: &Id<UserAccount>, record: TripRecord) -> Result<()>;

    /// Replaces the most recent record of the user's trip history.
    /// Fails with `NotFound` if the user is unknown or has no trips.
    async fn update_last_trip(
        &self,
        username: &Id<UserAccount>,
        record: TripRecord,
    ) -> Result<()>;
}
