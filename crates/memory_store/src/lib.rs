//! In-memory implementations of the core's store traits.
//!
//! Both stores are cheap to clone and share their contents, the same way a
//! database handle shares its pool. Maps are ordered by insertion so
//! `list_all` and trip histories come back in the order they were written.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use model::{shuttle::ShuttleState, trip::TripRecord, user::UserAccount, WithId};
use shuttle_core::store::{LocationStore, Result, StoreError, UserStore};
use tokio::sync::RwLock;
use utility::id::Id;

#[derive(Debug, Clone, Default)]
pub struct MemoryLocationStore {
    shuttles: Arc<RwLock<IndexMap<String, ShuttleState>>>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn get(&self, id: &Id<ShuttleState>) -> Result<Option<WithId<ShuttleState>>> {
        let shuttles = self.shuttles.read().await;
        Ok(shuttles
            .get(id.raw_ref::<str>())
            .map(|state| WithId::new(id.clone(), state.clone())))
    }

    async fn upsert(&self, shuttle: WithId<ShuttleState>) -> Result<WithId<ShuttleState>> {
        let mut shuttles = self.shuttles.write().await;
        shuttles.insert(shuttle.id.raw(), shuttle.content.clone());
        Ok(shuttle)
    }

    async fn list_all(&self) -> Result<Vec<WithId<ShuttleState>>> {
        let shuttles = self.shuttles.read().await;
        Ok(shuttles
            .iter()
            .map(|(id, state)| WithId::new(Id::new(id.clone()), state.clone()))
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<IndexMap<String, UserAccount>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, username: &Id<UserAccount>) -> Result<Option<WithId<UserAccount>>> {
        let users = self.users.read().await;
        Ok(users
            .get(username.raw_ref::<str>())
            .map(|user| WithId::new(username.clone(), user.clone())))
    }

    async fn create(&self, user: WithId<UserAccount>) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(user.id.raw_ref::<str>()) {
            return Err(StoreError::AlreadyExists);
        }
        users.insert(user.id.raw(), user.content);
        Ok(())
    }

    async fn append_trip(&self, username: &Id<UserAccount>, record: TripRecord) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(username.raw_ref::<str>())
            .ok_or(StoreError::NotFound)?;
        user.trips.push(record);
        Ok(())
    }

    async fn update_last_trip(
        &self,
        username: &Id<UserAccount>,
        record: TripRecord,
    ) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(username.raw_ref::<str>())
            .ok_or(StoreError::NotFound)?;
        let last = user.trips.last_mut().ok_or(StoreError::NotFound)?;
        *last = record;
        Ok(())
    }
}
