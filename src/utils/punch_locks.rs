use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-(employee, day) mutual exclusion around read-modify-write of a time log.
///
/// A lock stays cached while it keeps being used; an idle lock is evicted and
/// a fresh one is created on the next access.
#[derive(Clone)]
pub struct PunchLocks {
    locks: Cache<(String, NaiveDate), Arc<Mutex<()>>>,
}

impl PunchLocks {
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(100_000) // tune based on head count
                .time_to_idle(Duration::from_secs(3600))
                .build(),
        }
    }

    /// Waits for exclusive access to `employee_email`'s log of `day`.
    pub async fn acquire(&self, employee_email: &str, day: NaiveDate) -> OwnedMutexGuard<()> {
        let key = (employee_email.to_lowercase(), day);
        let lock = self
            .locks
            .get_with(key, async { Arc::new(Mutex::new(())) })
            .await;
        lock.lock_owned().await
    }
}

impl Default for PunchLocks {
    fn default() -> Self {
        Self::new()
    }
}
