use std::fmt::Debug;

use schemars::JsonSchema;
use serde::Serialize;
use utility::id::{HasId, Id};

pub mod shuttle;
pub mod trip;
pub mod user;

/// Example payloads for generated schemas.
pub trait ExampleData {
    fn example_data() -> Self;
}

/// A domain value together with the key it is stored under.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
