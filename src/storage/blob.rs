use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{core::utils::ensure_dir, errors::BudgetError};

use super::Result;

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// String-keyed storage for serialized payloads.
pub trait BlobStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, data: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        (**self).write(key, data)
    }
}

/// Keeps each blob in its own `<key>.json` file under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), BLOB_EXTENSION))
    }
}

impl BlobStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        let path = self.blob_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "blob written");
        Ok(())
    }
}

/// In-process blob store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| BudgetError::Storage("memory store lock poisoned".into()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        "blob".into()
    } else {
        sanitized
    }
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
