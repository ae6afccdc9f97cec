pub mod app;
pub mod session;
pub mod store;

pub use app::{App, Confirmation, Notification, NotificationKind};
pub use session::{EditSession, EntryForm};
pub use store::{Committed, IdGenerator, LedgerStore, SequentialIdGenerator, UuidIdGenerator};
