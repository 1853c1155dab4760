use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-category async locks serializing reconciliation passes in this process.
///
/// Only reduces flapping between near-simultaneous events. Passes still re-read the
/// category under the lock, and other processes or administrators are not covered by
/// it.
#[derive(Clone, Default)]
pub struct CategoryLocks {
    locks: Arc<Mutex<HashMap<u64, Arc<Mutex<()>>>>>,
}

impl CategoryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `category_id`. Released when the guard drops.
    pub async fn acquire(&self, category_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(category_id).or_default())
        };

        lock.lock_owned().await
    }

    /// Releases `guard` and forgets the category once nobody else holds or waits for
    /// its lock, so the map only tracks categories with passes in flight.
    pub async fn release(&self, category_id: u64, guard: OwnedMutexGuard<()>) {
        drop(guard);

        let mut locks = self.locks.lock().await;
        // Waiters clone the lock under the map lock, so a count of one means the map
        // holds the only reference
        if locks
            .get(&category_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&category_id);
        }
    }

    /// Number of categories currently tracked.
    #[cfg(test)]
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
