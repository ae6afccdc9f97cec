//! Facade that coordinates the in-memory ledger with its storage slot.

use uuid::Uuid;

use crate::domain::{EntryFields, Transaction};
use crate::errors::LedgerError;
use crate::ledger::{Ledger, Totals};
use crate::storage::StorageAdapter;

const MAX_ID_ATTEMPTS: usize = 8;

/// Source of fresh record identifiers, injected into the store so tests can
/// run deterministically.
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> Uuid;
}

/// Production generator: random v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic counter-backed generator for tests.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: u128,
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> Uuid {
        self.counter += 1;
        Uuid::from_u128(self.counter)
    }
}

/// Outcome of a mutating store operation.
///
/// The in-memory change always applies; `persist_error` records whether the
/// synchronous follow-up save reached storage. Callers surface a failed save
/// to the user instead of rolling the mutation back.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub persist_error: Option<LedgerError>,
}

impl<T> Committed<T> {
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// Owns the ledger and persists it through the storage adapter after every
/// mutation, so a reader of the slot always observes the latest state.
pub struct LedgerStore {
    ledger: Ledger,
    ids: Box<dyn IdGenerator>,
    storage: Box<dyn StorageAdapter>,
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl LedgerStore {
    pub fn new(storage: Box<dyn StorageAdapter>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            ledger: Ledger::new(),
            ids,
            storage,
        }
    }

    /// Loads the persisted ledger, or starts empty when the slot is absent.
    ///
    /// A corrupt slot propagates as `CorruptData`; the caller decides whether
    /// to abort or continue empty after warning the user.
    pub fn open(
        storage: Box<dyn StorageAdapter>,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, LedgerError> {
        let ledger = storage.load()?;
        tracing::info!(records = ledger.len(), "ledger loaded");
        Ok(Self {
            ledger,
            ids,
            storage,
        })
    }

    /// Appends a new record with a fresh unique id and saves.
    ///
    /// Field validation is the caller's responsibility; only id uniqueness is
    /// enforced here, by re-drawing from the generator on collision.
    pub fn add(&mut self, fields: EntryFields) -> Result<Committed<Transaction>, LedgerError> {
        let id = self.fresh_id()?;
        let record = Transaction::new(id, fields);
        self.ledger.insert(record.clone())?;
        let persist_error = self.persist();
        Ok(Committed {
            value: record,
            persist_error,
        })
    }

    /// Replaces all fields of the record with the given id and saves.
    pub fn update(
        &mut self,
        id: Uuid,
        fields: EntryFields,
    ) -> Result<Committed<Transaction>, LedgerError> {
        let record = self.ledger.update(id, fields)?.clone();
        let persist_error = self.persist();
        Ok(Committed {
            value: record,
            persist_error,
        })
    }

    /// Deletes the record with the given id and saves when something changed.
    pub fn remove(&mut self, id: Uuid) -> Committed<bool> {
        let removed = self.ledger.remove(id);
        let persist_error = if removed { self.persist() } else { None };
        Committed {
            value: removed,
            persist_error,
        }
    }

    pub fn find(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.find(id)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    fn fresh_id(&mut self) -> Result<Uuid, LedgerError> {
        let mut candidate = self.ids.next_id();
        for _ in 0..MAX_ID_ATTEMPTS {
            if self.ledger.find(candidate).is_none() {
                return Ok(candidate);
            }
            candidate = self.ids.next_id();
        }
        Err(LedgerError::DuplicateId(candidate))
    }

    fn persist(&self) -> Option<LedgerError> {
        match self.storage.save(&self.ledger) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, "ledger save failed; in-memory state retained");
                Some(err)
            }
        }
    }
}
