//! Whole-file JSON key-value stores.
//!
//! Each store is a single JSON object on disk. Every operation reads the file
//! fresh, and every write replaces the whole file, so the file is the only
//! source of truth and there is no in-memory cache to go stale.
//!
//! # Locking
//!
//! Each store owns an async mutex that is held for the full
//! load-mutate-save sequence. Two handlers updating different users can
//! therefore never interleave and lose one another's write.
//!
//! # Atomic Writes
//!
//! Saves use write-to-temp-then-rename:
//! 1. Write to `<path>.tmp`
//! 2. fsync the file
//! 3. Rename to `<path>`
//! 4. fsync the parent directory
//!
//! The directory is synced because a rename only updates the directory entry,
//! and that entry may not survive a power loss until the directory is synced.
//!
//! File I/O runs on the blocking thread pool while the lock is held.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::types::{GuildId, LevelRoles, UserId, XpRecord};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing the store file.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store file is not a valid JSON object of the expected shape.
    #[error("malformed store {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The blocking task doing the file I/O panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Per-user XP, keyed by user ID.
pub type XpStore = JsonStore<UserId, XpRecord>;

/// Per-guild role thresholds, keyed by guild ID.
pub type RankRoleStore = JsonStore<GuildId, LevelRoles>;

/// A JSON object on disk, loaded and saved as a whole.
pub struct JsonStore<K, V> {
    path: PathBuf,
    lock: Mutex<()>,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> JsonStore<K, V>
where
    K: Ord + Serialize + DeserializeOwned + Send + 'static,
    V: Serialize + DeserializeOwned + Send + 'static,
{
    /// Opens the store at `path`, creating an empty `{}` file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            debug!(path = %path.display(), "Creating empty store");
            write_atomic(&path, &BTreeMap::<K, V>::new())?;
        }

        Ok(JsonStore {
            path,
            lock: Mutex::new(()),
            _entries: PhantomData,
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full contents of the store.
    pub async fn snapshot(&self) -> Result<BTreeMap<K, V>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Returns the value stored under `key`, if any.
    pub async fn get(&self, key: &K) -> Result<Option<V>> {
        let _guard = self.lock.lock().await;
        let mut entries: BTreeMap<K, V> = self.load().await?;
        Ok(entries.remove(key))
    }

    /// Inserts or overwrites the value stored under `key`.
    pub async fn upsert(&self, key: K, value: V) -> Result<()> {
        self.update(|entries| {
            entries.insert(key, value);
        })
        .await
    }

    /// Loads the store, applies `f`, and saves the result, all under the store lock.
    ///
    /// Nothing is written if loading fails.
    pub async fn update<R>(&self, f: impl FnOnce(&mut BTreeMap<K, V>) -> R) -> Result<R> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let result = f(&mut entries);
        self.save(entries).await?;
        Ok(result)
    }

    async fn load(&self) -> Result<BTreeMap<K, V>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load(&path)).await?
    }

    async fn save(&self, entries: BTreeMap<K, V>) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &entries)).await?
    }
}

impl<K, V> std::fmt::Debug for JsonStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Reads the store file. A missing file reads as an empty store.
fn load<K, V>(path: &Path) -> Result<BTreeMap<K, V>>
where
    K: Ord + DeserializeOwned,
    V: DeserializeOwned,
{
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes `entries` with 4-space indentation and replaces `path` atomically.
fn write_atomic<T: Serialize>(path: &Path, entries: &T) -> Result<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    entries
        .serialize(&mut serializer)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent).map_err(io_err)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        fsync_file(&file).map_err(io_err)?;
    }

    std::fs::rename(&tmp_path, path).map_err(io_err)?;
    fsync_dir(parent).map_err(io_err)?;

    Ok(())
}

/// Syncs a file's contents and metadata to disk.
fn fsync_file(file: &File) -> io::Result<()> {
    file.sync_all()
}

/// Syncs a directory so that newly created or renamed entries are durable.
fn fsync_dir(dir_path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(dir_path)?;
    dir.sync_all()
}
