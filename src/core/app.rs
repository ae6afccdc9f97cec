//! Command facade driven by the presentation layer.

use uuid::Uuid;

use crate::core::session::{EditSession, EntryForm};
use crate::core::store::LedgerStore;
use crate::domain::Transaction;
use crate::errors::LedgerError;
use crate::ledger::Totals;
use crate::view::{project, ViewFilter};

/// User-visible outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Outcome of the delete confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Owns the ledger store, the edit session, and the current list filter,
/// exposing the command interface the presentation layer calls into.
pub struct App {
    store: LedgerStore,
    session: EditSession,
    filter: ViewFilter,
}

impl App {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
            session: EditSession::Idle,
            filter: ViewFilter::All,
        }
    }

    /// Validates the submitted fields and dispatches to create or update
    /// depending on the session state. Every outcome is user-visible.
    pub fn submit_form(&mut self, form: EntryForm) -> Notification {
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => return Notification::error(err.to_string()),
        };
        match self.session {
            EditSession::Idle => match self.store.add(fields) {
                Ok(committed) => outcome("Transaction added.", committed.persist_error),
                Err(err) => Notification::error(err.to_string()),
            },
            EditSession::Editing(id) => match self.store.update(id, fields) {
                Ok(committed) => {
                    self.session = EditSession::Idle;
                    outcome("Transaction updated.", committed.persist_error)
                }
                Err(err @ LedgerError::NotFound(_)) => {
                    // The record vanished mid-edit; never create in its place.
                    self.session = EditSession::Idle;
                    Notification::error(err.to_string())
                }
                Err(err) => Notification::error(err.to_string()),
            },
        }
    }

    /// Enters edit mode for an existing record and returns its current
    /// field values for the presentation layer to prefill.
    pub fn request_edit(&mut self, id: Uuid) -> Result<EntryForm, LedgerError> {
        let record = self.store.find(id).ok_or(LedgerError::NotFound(id))?;
        let form = EntryForm::prefill(record);
        self.session = EditSession::Editing(id);
        Ok(form)
    }

    /// Deletes a record after explicit confirmation.
    ///
    /// A declined confirmation aborts with zero side effects. Deleting the
    /// record currently under edit resets the session.
    pub fn request_delete(&mut self, id: Uuid, confirmation: Confirmation) -> Option<Notification> {
        if confirmation == Confirmation::Declined {
            return None;
        }
        let committed = self.store.remove(id);
        if self.session.editing_id() == Some(id) {
            self.session = EditSession::Idle;
        }
        if committed.value {
            Some(outcome("Transaction deleted.", committed.persist_error))
        } else {
            Some(Notification::error(
                LedgerError::NotFound(id).to_string(),
            ))
        }
    }

    /// Leaves edit mode without touching the ledger.
    pub fn cancel_edit(&mut self) {
        self.session = EditSession::Idle;
    }

    pub fn select_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> ViewFilter {
        self.filter
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    /// The current filtered, date-sorted list view.
    pub fn projection(&self) -> Vec<&Transaction> {
        project(self.store.ledger(), self.filter)
    }

    pub fn totals(&self) -> Totals {
        self.store.totals()
    }

    pub fn find(&self, id: Uuid) -> Option<&Transaction> {
        self.store.find(id)
    }

    pub fn record_count(&self) -> usize {
        self.store.ledger().len()
    }
}

fn outcome(message: &str, persist_error: Option<LedgerError>) -> Notification {
    match persist_error {
        None => Notification::success(message),
        Some(err) => Notification::warning(format!("{} Saving failed: {}", message, err)),
    }
}
