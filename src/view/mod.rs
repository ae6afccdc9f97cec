//! Read-only list projections of the ledger.

use std::fmt;
use std::str::FromStr;

use crate::domain::{EntryKind, Transaction};
use crate::ledger::Ledger;

/// Closed set of list filters.
///
/// Parsing an unrecognized value is an error; it never silently behaves
/// as `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl ViewFilter {
    pub const ALL: [ViewFilter; 3] = [ViewFilter::All, ViewFilter::Income, ViewFilter::Expense];

    pub fn matches(&self, record: &Transaction) -> bool {
        match self {
            ViewFilter::All => true,
            ViewFilter::Income => record.kind == EntryKind::Income,
            ViewFilter::Expense => record.kind == EntryKind::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewFilter::All => "all",
            ViewFilter::Income => "income",
            ViewFilter::Expense => "expense",
        }
    }
}

impl fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "all" => Ok(ViewFilter::All),
            "income" => Ok(ViewFilter::Income),
            "expense" => Ok(ViewFilter::Expense),
            other => Err(format!("unknown filter `{}`", other)),
        }
    }
}

/// Displayable projection: filtered by kind, most recent date first.
///
/// Records sharing a date order by id ascending, so repeated calls always
/// produce the same sequence. Never mutates the ledger.
pub fn project(ledger: &Ledger, filter: ViewFilter) -> Vec<&Transaction> {
    let mut rows: Vec<&Transaction> = ledger
        .records()
        .iter()
        .filter(|record| filter.matches(record))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, EntryFields, Transaction};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn entry(day: u32, kind: EntryKind) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            EntryFields {
                description: format!("day {day}"),
                amount: 10.0,
                category: Category::Other,
                kind,
                date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            },
        )
    }

    #[test]
    fn projection_orders_most_recent_first() {
        let mut ledger = Ledger::new();
        ledger.insert(entry(3, EntryKind::Income)).unwrap();
        ledger.insert(entry(20, EntryKind::Expense)).unwrap();
        ledger.insert(entry(11, EntryKind::Income)).unwrap();

        let days: Vec<u32> = project(&ledger, ViewFilter::All)
            .iter()
            .map(|record| chrono::Datelike::day(&record.date))
            .collect();
        assert_eq!(days, vec![20, 11, 3]);
    }

    #[test]
    fn expense_filter_never_yields_income() {
        let mut ledger = Ledger::new();
        ledger.insert(entry(1, EntryKind::Income)).unwrap();
        ledger.insert(entry(2, EntryKind::Expense)).unwrap();

        let rows = project(&ledger, ViewFilter::Expense);
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|record| record.kind == EntryKind::Expense));
    }

    #[test]
    fn equal_dates_break_ties_by_id_ascending() {
        let mut ledger = Ledger::new();
        ledger.insert(entry(5, EntryKind::Income)).unwrap();
        ledger.insert(entry(5, EntryKind::Expense)).unwrap();
        ledger.insert(entry(5, EntryKind::Income)).unwrap();

        let first: Vec<Uuid> = project(&ledger, ViewFilter::All)
            .iter()
            .map(|record| record.id)
            .collect();
        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted);
        let second: Vec<Uuid> = project(&ledger, ViewFilter::All)
            .iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_filter_value_fails_fast() {
        assert!("weird".parse::<ViewFilter>().is_err());
        assert_eq!("Expense".parse::<ViewFilter>().unwrap(), ViewFilter::Expense);
    }
}
