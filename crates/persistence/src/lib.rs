#![deny(warnings)]

//! Persistence layer: save stores and snapshot encoding.
//!
//! The simulation treats a [`Save`] as an opaque record. Stores only key it by
//! id, stamp its timestamps and move it in and out of storage.

use serde::{Deserialize, Serialize};
use sim_core::Save;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by save stores.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
    /// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
    #[error("invalid save id: {0:?}")]
    InvalidId(String),
}

/// Listing entry of a stored save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub id: String,
    pub name: String,
    pub created: u64,
    pub last_saved: u64,
    pub version: String,
}

impl From<&Save> for SaveSummary {
    fn from(s: &Save) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            created: s.created,
            last_saved: s.last_saved,
            version: s.version.clone(),
        }
    }
}

/// Keyed storage of save records.
pub trait SaveStore: Send {
    /// Insert or replace a save, stamping its timestamps.
    fn put(&mut self, save: Save) -> Result<(), PersistenceError>;
    fn get(&self, id: &str) -> Result<Option<Save>, PersistenceError>;
    /// Summaries ordered by id.
    fn list(&self) -> Result<Vec<SaveSummary>, PersistenceError>;
    /// Returns whether a save was removed.
    fn delete(&mut self, id: &str) -> Result<bool, PersistenceError>;
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Set `last_saved` to now and `created` on first write.
pub fn stamp(save: &mut Save) {
    let now = now_unix();
    if save.created == 0 {
        save.created = now;
    }
    save.last_saved = now;
}

fn check_id(id: &str) -> Result<(), PersistenceError> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(PersistenceError::InvalidId(id.to_string()))
    }
}

/// Compact binary encoding of a save.
pub fn encode(save: &Save) -> Result<Vec<u8>, PersistenceError> {
    Ok(bincode::serialize(save)?)
}

pub fn decode(bytes: &[u8]) -> Result<Save, PersistenceError> {
    Ok(bincode::deserialize(bytes)?)
}

/// In-process store keeping bincode blobs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SaveStore for MemoryStore {
    fn put(&mut self, mut save: Save) -> Result<(), PersistenceError> {
        check_id(&save.id)?;
        if let Some(prev) = self.get(&save.id)? {
            save.created = prev.created;
        }
        stamp(&mut save);
        let blob = encode(&save)?;
        debug!(id = %save.id, bytes = blob.len(), "memory save");
        self.blobs.insert(save.id.clone(), blob);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Save>, PersistenceError> {
        self.blobs.get(id).map(|b| decode(b)).transpose()
    }

    fn list(&self) -> Result<Vec<SaveSummary>, PersistenceError> {
        self.blobs
            .values()
            .map(|b| decode(b).map(|s| SaveSummary::from(&s)))
            .collect()
    }

    fn delete(&mut self, id: &str) -> Result<bool, PersistenceError> {
        Ok(self.blobs.remove(id).is_some())
    }
}

/// One pretty-printed JSON file per save in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open (and create if needed) a save directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, PersistenceError> {
        check_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }
}

impl SaveStore for JsonDirStore {
    fn put(&mut self, mut save: Save) -> Result<(), PersistenceError> {
        let path = self.path_for(&save.id)?;
        if let Some(prev) = self.get(&save.id)? {
            save.created = prev.created;
        }
        stamp(&mut save);
        let json = serde_json::to_string_pretty(&save)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        info!(id = %save.id, path = %path.display(), "save written");
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Save>, PersistenceError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn list(&self) -> Result<Vec<SaveSummary>, PersistenceError> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            let save: Save = serde_json::from_str(&text)?;
            out.push(SaveSummary::from(&save));
        }
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    fn delete(&mut self, id: &str) -> Result<bool, PersistenceError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use sim_core::{NewsKind, NewsLog, SaveData};

    fn save(id: &str) -> Save {
        let time = NaiveDate::from_ymd_opt(1979, 2, 3)
            .unwrap()
            .and_hms_opt(4, 5, 0)
            .unwrap();
        let mut log = NewsLog::default();
        log.publish("Vector One", time, NewsKind::ProductReleased);
        let data = SaveData {
            news: log.items().to_vec(),
            ..SaveData::default()
        };
        Save::new(id, "Campaign", Decimal::new(123_456, 2), time, data)
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tycoon-{tag}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn bincode_roundtrip_preserves_save() {
        let s = save("a");
        let back = decode(&encode(&s).unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn memory_store_crud() {
        let mut store = MemoryStore::new();
        store.put(save("b")).unwrap();
        store.put(save("a")).unwrap();
        assert_eq!(store.len(), 2);
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["a", "b"]);
        let got = store.get("a").unwrap().unwrap();
        assert!(got.created > 0);
        assert_eq!(got.cash, Decimal::new(123_456, 2));
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn json_dir_store_crud() {
        let dir = temp_dir("json");
        let mut store = JsonDirStore::open(&dir).unwrap();
        store.put(save("slot-1")).unwrap();
        let first = store.get("slot-1").unwrap().unwrap();
        store.put(save("slot-1")).unwrap();
        let second = store.get("slot-1").unwrap().unwrap();
        assert_eq!(first.created, second.created);
        assert_eq!(second.data.news.len(), 1);
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(store.delete("slot-1").unwrap());
        assert!(store.list().unwrap().is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn path_like_ids_are_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.put(save("../evil")),
            Err(PersistenceError::InvalidId(_))
        ));
        let json = JsonDirStore::open(temp_dir("ids")).unwrap();
        assert!(json.get("").is_err());
        fs::remove_dir_all(json.dir()).unwrap();
    }

    proptest! {
        #[test]
        fn valid_ids_accepted(id in "[A-Za-z0-9_-]{1,32}") {
            prop_assert!(check_id(&id).is_ok());
        }
    }
}
