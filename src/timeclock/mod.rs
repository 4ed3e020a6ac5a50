//! Time-log lifecycle: daily provisioning, punches, hours, manager edits and
//! edit requests, all scoped by company.

use std::sync::Arc;

use crate::store::{IdentityStore, TimeClockStore};
use crate::utils::punch_locks::PunchLocks;

pub mod clock;
pub mod edit_request;
pub mod error;
pub mod hours;
pub mod manager_edit;
pub mod provisioner;
pub mod punch;
pub mod tenant;

use clock::Clock;
use tenant::TenantGuard;

/// Entry point of every time-clock operation. Cheap to clone.
#[derive(Clone)]
pub struct TimeClock {
    identity: Arc<dyn IdentityStore>,
    store: Arc<dyn TimeClockStore>,
    clock: Arc<dyn Clock>,
    locks: PunchLocks,
}

impl TimeClock {
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        store: Arc<dyn TimeClockStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity,
            store,
            clock,
            locks: PunchLocks::new(),
        }
    }

    pub fn tenant_guard(&self) -> TenantGuard<'_> {
        TenantGuard::new(self.identity.as_ref())
    }
}
