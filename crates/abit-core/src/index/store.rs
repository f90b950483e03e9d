//! Sled-backed passage store: the on-disk knowledge index artifact.
//!
//! One sled directory per level, written offline by the indexing job and
//! only ever read at runtime. Passages live in the `passages` tree under
//! zero-padded ordinal keys so sled's key order is insertion order.

use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;

const PASSAGE_TREE: &str = "passages";

/// One embedded passage: vector, text, and source metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageRecord {
    pub text: String,
    /// Source document identifier (file name, section, URL).
    pub source: String,
    pub embedding: Vec<f32>,
}

impl PassageRecord {
    pub fn new(text: impl Into<String>, source: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            embedding,
        }
    }

    /// Serializes this record to JSON bytes for storage.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Deserializes a record from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}

/// Read/write handle on one index directory.
///
/// The runtime pipeline only reads; `append` exists for the offline builder
/// and test fixtures.
pub struct IndexStore {
    db: Db,
}

impl IndexStore {
    /// Opens or creates the index DB at the given path.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, sled::Error> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn ordinal_key(ordinal: u64) -> String {
        format!("passage/{:08}", ordinal)
    }

    /// Appends a passage after the current last ordinal.
    pub fn append(&self, record: &PassageRecord) -> Result<(), sled::Error> {
        let tree = self.db.open_tree(PASSAGE_TREE)?;
        let next = tree.len() as u64;
        tree.insert(Self::ordinal_key(next).as_bytes(), record.to_bytes())?;
        Ok(())
    }

    /// Returns all passages in insertion order, skipping undecodable entries.
    pub fn load_all(&self) -> Result<Vec<PassageRecord>, sled::Error> {
        let tree = self.db.open_tree(PASSAGE_TREE)?;
        let mut out = Vec::with_capacity(tree.len());
        for item in tree.iter() {
            let (_, value) = item?;
            if let Some(record) = PassageRecord::from_bytes(&value) {
                out.push(record);
            }
        }
        Ok(out)
    }

    /// Number of stored passages.
    pub fn count(&self) -> Result<usize, sled::Error> {
        Ok(self.db.open_tree(PASSAGE_TREE)?.len())
    }

    /// Flushes pending writes to disk.
    pub fn flush(&self) -> Result<(), sled::Error> {
        self.db.flush()?;
        Ok(())
    }
}
