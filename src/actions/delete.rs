//! Delete items, retrying while the device is busy

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::ItemAction;
use crate::store::{ActionOutcome, ItemActionKind, Location, StoreError, StoreView};

/// How often and how patiently to retry a busy device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(retries: u32, base_delay: Duration) -> Self {
        Self {
            retries,
            base_delay,
            max_delay: Duration::from_secs(10),
        }
    }

    /// Never retry
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`,
    /// capped at `max_delay`
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(250))
    }
}

/// Remove each item from the store
#[derive(Debug, Default)]
pub struct DeleteItem {
    policy: RetryPolicy,
    pub deleted: Vec<Location>,
    pub protected: Vec<Location>,
}

impl DeleteItem {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            deleted: Vec::new(),
            protected: Vec::new(),
        }
    }

    fn delete_once(
        store: &mut dyn StoreView,
        location: &Location,
    ) -> Result<ActionOutcome, StoreError> {
        store.apply_item_action(&location.folder, &location.name, &ItemActionKind::Delete)
    }
}

impl ItemAction for DeleteItem {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn is_destructive(&self) -> bool {
        true
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        location: &Location,
    ) -> Result<ActionOutcome, StoreError> {
        let mut attempt = 0;
        let outcome = loop {
            match Self::delete_once(store, location) {
                Err(e) if e.is_busy() && attempt < self.policy.retries => {
                    let delay = self.policy.backoff(attempt);
                    warn!(
                        item = %location,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "device busy, retrying delete"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                result => break result?,
            }
        };

        match outcome {
            ActionOutcome::Success => {
                debug!(item = %location, "deleted");
                self.deleted.push(location.clone());
            }
            ActionOutcome::NotSupported => self.protected.push(location.clone()),
        }
        Ok(outcome)
    }
}
