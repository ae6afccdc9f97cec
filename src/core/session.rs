//! Edit-session state and form-field validation.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Category, EntryFields, EntryKind, Transaction};
use crate::errors::LedgerError;

/// Whether the next form submission creates a record or replaces one.
///
/// `Editing(id)` is only entered through an existing record and is
/// invalidated when that record is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Uuid),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(id) => Some(*id),
        }
    }
}

/// Raw field values exactly as submitted by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub kind: String,
    pub date: String,
}

impl EntryForm {
    /// Form values prefilled from an existing record, for edit prompts.
    pub fn prefill(record: &Transaction) -> Self {
        Self {
            description: record.description.clone(),
            amount: record.amount.to_string(),
            category: record.category.to_string(),
            kind: record.kind.to_string(),
            date: record.date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Validates every field, returning the first failure as a single
    /// user-visible message. No mutation happens on failure.
    pub fn validate(&self) -> Result<EntryFields, LedgerError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(LedgerError::Validation(
                "description cannot be empty".into(),
            ));
        }
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| LedgerError::Validation("amount must be a number".into()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        let category: Category = self.category.parse().map_err(LedgerError::Validation)?;
        let kind: EntryKind = self.kind.parse().map_err(LedgerError::Validation)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| LedgerError::Validation("date must use YYYY-MM-DD format".into()))?;
        Ok(EntryFields {
            description: description.to_string(),
            amount,
            category,
            kind,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> EntryForm {
        EntryForm {
            description: " Bus ticket ".into(),
            amount: "4.80".into(),
            category: "transport".into(),
            kind: "expense".into(),
            date: "2025-07-02".into(),
        }
    }

    #[test]
    fn valid_form_produces_trimmed_fields() {
        let fields = valid_form().validate().expect("form is valid");
        assert_eq!(fields.description, "Bus ticket");
        assert_eq!(fields.amount, 4.8);
        assert_eq!(fields.category, Category::Transport);
        assert_eq!(fields.kind, EntryKind::Expense);
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut form = valid_form();
        form.description = "   ".into();
        let err = form.validate().expect_err("blank description");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for raw in ["0", "-12.5", "NaN", "inf"] {
            let mut form = valid_form();
            form.amount = raw.into();
            assert!(form.validate().is_err(), "amount `{raw}` must be rejected");
        }
    }

    #[test]
    fn unknown_category_and_kind_are_rejected() {
        let mut form = valid_form();
        form.category = "gadgets".into();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.kind = "transfer".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut form = valid_form();
        form.date = "02/07/2025".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn prefill_round_trips_through_validate() {
        let record = Transaction::new(
            Uuid::new_v4(),
            valid_form().validate().expect("valid form"),
        );
        let fields = EntryForm::prefill(&record).validate().expect("prefill");
        assert_eq!(fields.description, record.description);
        assert_eq!(fields.amount, record.amount);
        assert_eq!(fields.date, record.date);
    }
}
