//! Display formatting for amounts, dates, and categories.
//!
//! Rounding to two decimal places happens here and only here; stored and
//! aggregated values keep full precision.

use chrono::{Datelike, NaiveDate};

use crate::domain::{Category, EntryKind, Transaction};
use crate::ledger::Totals;

/// Presentation preferences for the list and summary views.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency: String,
    pub day_first_dates: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency: "R$".into(),
            day_first_dates: true,
        }
    }
}

/// Unsigned currency value, e.g. `R$ 1234.56`.
pub fn format_money(value: f64, opts: &DisplayOptions) -> String {
    format!("{} {:.2}", opts.currency, value)
}

/// Amount with the sign implied by the entry kind, e.g. `- R$ 54.30`.
pub fn format_amount(record: &Transaction, opts: &DisplayOptions) -> String {
    let sign = match record.kind {
        EntryKind::Income => '+',
        EntryKind::Expense => '-',
    };
    format!("{} {}", sign, format_money(record.amount, opts))
}

/// `DD/MM/YYYY` when day-first display is on, ISO otherwise.
pub fn format_date(date: NaiveDate, opts: &DisplayOptions) -> String {
    if opts.day_first_dates {
        format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// One-line list row: glyph, description, category, date, signed amount.
pub fn format_row(record: &Transaction, opts: &DisplayOptions) -> String {
    format!(
        "{} {}  [{}]  {}  {}",
        category_glyph(record.category),
        record.description,
        record.category,
        format_date(record.date, opts),
        format_amount(record, opts),
    )
}

/// Three-line totals summary.
pub fn format_totals(totals: &Totals, opts: &DisplayOptions) -> String {
    format!(
        "Income:  {}\nExpense: {}\nBalance: {}",
        format_money(totals.income, opts),
        format_money(totals.expense, opts),
        format_money(totals.balance, opts),
    )
}

/// Emoji glyph shown next to the description in list rows.
pub fn category_glyph(category: Category) -> &'static str {
    match category {
        Category::Salary => "💼",
        Category::Freelance => "💻",
        Category::Investment => "📈",
        Category::Food => "🍔",
        Category::Transport => "🚗",
        Category::Health => "🏥",
        Category::Leisure => "🎮",
        Category::Education => "📚",
        Category::Housing => "🏠",
        Category::Other => "📦",
    }
}
