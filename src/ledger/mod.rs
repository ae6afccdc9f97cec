//! The ordered transaction collection and its derived totals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{EntryFields, EntryKind, Transaction};
use crate::errors::LedgerError;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The full ordered collection of transaction records.
///
/// Insertion order is preserved but carries no meaning; display order is
/// always derived by the view layer. Ids are pairwise distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub records: Vec<Transaction>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Appends a record, rejecting an id already present in the collection.
    pub fn insert(&mut self, record: Transaction) -> Result<Uuid, LedgerError> {
        if self.find(record.id).is_some() {
            return Err(LedgerError::DuplicateId(record.id));
        }
        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    /// Replaces every field of the record with the given id, preserving the id.
    ///
    /// Never falls back to inserting a new record.
    pub fn update(&mut self, id: Uuid, fields: EntryFields) -> Result<&Transaction, LedgerError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        record.apply(fields);
        Ok(record)
    }

    /// Deletes the record with the given id, reporting whether one was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() != before
    }

    pub fn find(&self, id: Uuid) -> Option<&Transaction> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Income, expense, and balance sums over the whole collection.
    ///
    /// Accumulates at full f64 precision; rounding to two decimals happens
    /// only when formatting for display.
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for record in &self.records {
            match record.kind {
                EntryKind::Income => totals.income += record.amount,
                EntryKind::Expense => totals.expense += record.amount,
            }
        }
        totals.balance = totals.income - totals.expense;
        totals
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Derived sums over the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    fn entry(amount: f64, kind: EntryKind) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            EntryFields {
                description: "entry".into(),
                amount,
                category: Category::Other,
                kind,
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            },
        )
    }

    #[test]
    fn totals_over_mixed_entries() {
        let mut ledger = Ledger::new();
        ledger.insert(entry(500.0, EntryKind::Income)).unwrap();
        ledger.insert(entry(200.0, EntryKind::Expense)).unwrap();
        ledger.insert(entry(100.0, EntryKind::Expense)).unwrap();

        let totals = ledger.totals();
        assert_eq!(totals.income, 500.0);
        assert_eq!(totals.expense, 300.0);
        assert_eq!(totals.balance, 200.0);
    }

    #[test]
    fn totals_over_empty_ledger_are_zero() {
        assert_eq!(Ledger::new().totals(), Totals::default());
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut ledger = Ledger::new();
        let record = entry(10.0, EntryKind::Income);
        let clone = record.clone();
        ledger.insert(record).unwrap();
        let err = ledger.insert(clone).expect_err("duplicate id must fail");
        assert!(matches!(err, LedgerError::DuplicateId(_)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn remove_missing_id_is_a_noop() {
        let mut ledger = Ledger::new();
        ledger.insert(entry(10.0, EntryKind::Income)).unwrap();
        assert!(!ledger.remove(Uuid::new_v4()));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn update_missing_id_fails_without_inserting() {
        let mut ledger = Ledger::new();
        let err = ledger
            .update(
                Uuid::new_v4(),
                EntryFields {
                    description: "ghost".into(),
                    amount: 1.0,
                    category: Category::Other,
                    kind: EntryKind::Expense,
                    date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                },
            )
            .expect_err("update of unknown id must fail");
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert!(ledger.is_empty());
    }
}
