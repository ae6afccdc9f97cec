//! Domain types representing ledger entries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// A single income or expense record.
///
/// `amount` is always the unsigned magnitude; the sign is derived from
/// `kind` at display time and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub kind: EntryKind,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(id: Uuid, fields: EntryFields) -> Self {
        Self {
            id,
            description: fields.description,
            amount: fields.amount,
            category: fields.category,
            kind: fields.kind,
            date: fields.date,
        }
    }

    /// Replaces every field except the id.
    pub fn apply(&mut self, fields: EntryFields) {
        self.description = fields.description;
        self.amount = fields.amount;
        self.category = fields.category;
        self.kind = fields.kind;
        self.date = fields.date;
    }

    /// Amount with the sign implied by the entry kind.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} ({})", self.description, self.date)
    }
}

/// Validated field values for creating or fully replacing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub kind: EntryKind,
    pub date: NaiveDate,
}

/// Fixed set of spending and income categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Freelance,
    Investment,
    Food,
    Transport,
    Health,
    Leisure,
    Education,
    Housing,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Food,
        Category::Transport,
        Category::Health,
        Category::Leisure,
        Category::Education,
        Category::Housing,
        Category::Other,
    ];

    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Health => "health",
            Category::Leisure => "leisure",
            Category::Education => "education",
            Category::Housing => "housing",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| format!("unknown category `{}`", value.trim()))
    }
}

/// Whether an entry adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => Err(format!("unknown entry kind `{}`", other)),
        }
    }
}
