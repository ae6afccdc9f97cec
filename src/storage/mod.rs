pub mod json_slot;

use crate::errors::LedgerError;
use crate::ledger::Ledger;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// The platform key-value primitive: one named slot holding a single opaque
/// value, read and written whole. Writes are assumed atomic at this
/// granularity.
pub trait Slot: Send + Sync {
    /// Returns the slot contents, or `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>>;
    /// Overwrites the slot with the given value.
    fn write(&self, value: &str) -> Result<()>;
}

impl<S: Slot + ?Sized> Slot for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, value: &str) -> Result<()> {
        (**self).write(value)
    }
}

/// Abstraction over persistence adapters capable of storing the full ledger.
pub trait StorageAdapter: Send + Sync {
    fn save(&self, ledger: &Ledger) -> Result<()>;
    fn load(&self) -> Result<Ledger>;
}

pub use json_slot::{FileSlot, JsonSlotStorage, MemorySlot};
