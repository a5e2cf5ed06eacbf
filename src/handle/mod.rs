use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::core::error::ProviderError;
use crate::core::traits::{ProviderFactory, TranslationProvider};
use crate::core::types::ProviderId;

/// A provider handle checked out of a [`ProviderHandle`], tagged with the
/// generation it was created in.
#[derive(Clone)]
pub struct Lease {
    pub generation: u64,
    pub provider: Arc<dyn TranslationProvider>,
}

/// Process-wide, lazily created provider slot.
///
/// Callers hold an `Arc` to the provider for the duration of a call, so a
/// replacement never tears a handle that is still in use. Creation runs under
/// the slot mutex and invalidation only clears the generation the caller
/// observed, so concurrent failures replace the handle once.
pub struct ProviderHandle {
    factory: Arc<dyn ProviderFactory>,
    slot: Mutex<Slot>,
}

#[derive(Default)]
struct Slot {
    current: Option<Lease>,
    next_generation: u64,
}

impl ProviderHandle {
    pub fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            factory,
            slot: Mutex::new(Slot::default()),
        }
    }

    pub fn provider_id(&self) -> ProviderId {
        self.factory.id()
    }

    /// Returns the live handle, creating one if the slot is empty.
    pub fn acquire(&self) -> Result<Lease, ProviderError> {
        let mut slot = self.lock_slot();
        if let Some(lease) = &slot.current {
            return Ok(lease.clone());
        }

        let provider = self.factory.create()?;
        slot.next_generation += 1;
        let lease = Lease {
            generation: slot.next_generation,
            provider,
        };
        debug!(
            provider = ?self.factory.id(),
            generation = lease.generation,
            "created provider handle"
        );
        slot.current = Some(lease.clone());
        Ok(lease)
    }

    /// Drops the handle if it is still the one from `generation`.
    pub fn invalidate(&self, generation: u64) -> bool {
        let mut slot = self.lock_slot();
        let is_current = slot
            .current
            .as_ref()
            .is_some_and(|lease| lease.generation == generation);
        if !is_current {
            return false;
        }

        slot.current = None;
        debug!(
            provider = ?self.factory.id(),
            generation, "invalidated provider handle"
        );
        true
    }

    pub fn current_generation(&self) -> Option<u64> {
        self.lock_slot().current.as_ref().map(|lease| lease.generation)
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
