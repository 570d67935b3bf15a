use std::{collections::HashMap, sync::Arc, sync::Mutex as StdMutex};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per string key, created on first use.
///
/// Operations on the same key are serialized, operations on different keys
/// proceed in parallel. Locks are never removed; the set of shuttles and
/// users is small and grows slowly.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("keyed lock table poisoned");
            locks.entry(key.to_owned()).or_default().clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;

    #[tokio::test]
    async fn same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let guard = locks.acquire("a").await;

        let locks2 = locks.clone();
        let contender = tokio::spawn(async move {
            let _guard = locks2.acquire("a").await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_keys_do_not_block_each_other() {
        let locks = KeyedLocks::new();
        let _a = locks.acquire("a").await;
        let _b = locks.acquire("b").await;
    }
}
