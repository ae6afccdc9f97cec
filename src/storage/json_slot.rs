//! JSON serialization of the ledger into a single storage slot.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::LedgerError;
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};

use super::{Result, Slot, StorageAdapter};

const SLOT_FILE_NAME: &str = "transactions.json";
const TMP_SUFFIX: &str = "tmp";

/// Persists the whole ledger as one JSON blob in a single slot.
///
/// Every save fully overwrites the previous blob; there is no incremental
/// patching. Loading an absent slot yields an empty ledger, while a slot
/// whose contents cannot be parsed fails with `CorruptData` so callers can
/// decide what to do with the unreadable data instead of losing it silently.
pub struct JsonSlotStorage {
    slot: Box<dyn Slot>,
}

impl JsonSlotStorage {
    pub fn new(slot: Box<dyn Slot>) -> Self {
        Self { slot }
    }

    /// Storage backed by a file in the platform data directory.
    pub fn file_backed() -> Result<Self> {
        Ok(Self::new(Box::new(FileSlot::default_location()?)))
    }
}

impl StorageAdapter for JsonSlotStorage {
    fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        self.slot.write(&json)?;
        tracing::debug!(records = ledger.len(), "ledger saved");
        Ok(())
    }

    fn load(&self) -> Result<Ledger> {
        let raw = match self.slot.read()? {
            Some(raw) => raw,
            None => return Ok(Ledger::new()),
        };
        let ledger: Ledger = serde_json::from_str(&raw)
            .map_err(|err| LedgerError::CorruptData(err.to_string()))?;
        if ledger.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::SchemaVersion {
                found: ledger.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(ledger)
    }
}

/// File-backed slot. Writes stage to a temporary sibling and rename into
/// place so a reader never observes a partial blob.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default slot location under the platform data directory.
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fintrack");
        ensure_dir(&base)?;
        Ok(Self::new(base.join(SLOT_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory slot used by tests and embedding hosts.
#[derive(Default)]
pub struct MemorySlot {
    cell: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-populated with raw contents, e.g. a corrupt blob.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            cell: Mutex::new(Some(raw.into())),
        }
    }

    /// Current slot contents, for round-trip assertions.
    pub fn snapshot(&self) -> Option<String> {
        self.cell.lock().expect("slot lock poisoned").clone()
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.cell.lock().expect("slot lock poisoned").clone())
    }

    fn write(&self, value: &str) -> Result<()> {
        *self.cell.lock().expect("slot lock poisoned") = Some(value.to_string());
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
