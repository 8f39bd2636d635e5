//! Note storage boundary.
//!
//! [`NoteStore`] is the seam between the editor and wherever notes live.
//! [`FileNoteStore`] keeps one pretty-printed JSON file per note in a
//! directory, guarded by an `fs2` lock file and written via temp-file rename.

use super::note::Note;
use crate::config::Config;
use crate::util::IdGenerator;
use async_trait::async_trait;
use fs2::FileExt;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

const LOCK_FILE_NAME: &str = ".notes.lock";

/// Errors reported by a note store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note '{0}' not found")]
    NotFound(String),

    #[error("invalid note id '{0}'")]
    InvalidId(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("note file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialise note: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Asynchronous note persistence.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fetches the note with `id`.
    async fn load(&self, id: &str) -> Result<Note, StoreError>;

    /// Stores a new note and returns its id.
    async fn create(&self, note: &Note) -> Result<String, StoreError>;

    /// Overwrites the existing note `id`.
    async fn update(&self, id: &str, note: &Note) -> Result<(), StoreError>;
}

/// Directory-backed note store.
pub struct FileNoteStore {
    dir: PathBuf,
    ids: Mutex<IdGenerator>,
}

impl FileNoteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ids: Mutex::new(IdGenerator::new()),
        }
    }

    /// Store rooted at the configured notes directory.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.notes_directory()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing note `id`.
    pub fn note_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }

    fn next_id(&self) -> String {
        match self.ids.lock() {
            Ok(mut ids) => ids.next("note"),
            Err(poisoned) => poisoned.into_inner().next("note"),
        }
    }
}

#[async_trait]
impl NoteStore for FileNoteStore {
    async fn load(&self, id: &str) -> Result<Note, StoreError> {
        let path = self.note_path(id)?;
        let id = id.to_string();
        run_blocking(move || {
            if !path.exists() {
                return Err(StoreError::NotFound(id));
            }
            read_note_file(&path)
        })
        .await
    }

    async fn create(&self, note: &Note) -> Result<String, StoreError> {
        let dir = self.dir.clone();
        let note = note.clone();
        let mut id = self.next_id();
        // Ids from an earlier run can collide with this run's clock.
        while self.note_path(&id)?.exists() {
            id = self.next_id();
        }
        let path = self.note_path(&id)?;
        run_blocking(move || {
            fs::create_dir_all(&dir).map_err(|err| StoreError::io(&dir, err))?;
            write_note_file(&path, &note)
        })
        .await?;
        info!("Created note {id}");
        Ok(id)
    }

    async fn update(&self, id: &str, note: &Note) -> Result<(), StoreError> {
        let path = self.note_path(id)?;
        let note = note.clone();
        let owned_id = id.to_string();
        run_blocking(move || {
            if !path.exists() {
                return Err(StoreError::NotFound(owned_id));
            }
            write_note_file(&path, &note)
        })
        .await?;
        info!("Updated note {id}");
        Ok(())
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| StoreError::Task(err.to_string()))?
}

fn validate_id(id: &str) -> Result<(), StoreError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

/// Reads a note file under a shared lock on its directory.
pub fn read_note_file(path: &Path) -> Result<Note, StoreError> {
    let lock = DirLock::shared(path)?;

    let mut bytes = Vec::new();
    let result = File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|err| StoreError::io(path, err));
    lock.release();
    result?;

    let note = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read note file {}", path.display());
    Ok(note)
}

/// Writes a note file under an exclusive lock on its directory, replacing
/// any previous version atomically.
pub fn write_note_file(path: &Path, note: &Note) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(note).map_err(StoreError::Serialize)?;

    let lock = DirLock::exclusive(path)?;
    let result = write_atomically(path, &payload);
    lock.release();
    result?;

    debug!(
        "Wrote note file {} ({} bytes)",
        path.display(),
        payload.len()
    );
    Ok(())
}

fn write_atomically(path: &Path, payload: &[u8]) -> Result<(), StoreError> {
    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|err| StoreError::io(&tmp_path, err))?;
        tmp_file
            .write_all(payload)
            .and_then(|_| tmp_file.sync_all())
            .map_err(|err| StoreError::io(&tmp_path, err))?;
    }

    fs::rename(&tmp_path, path).map_err(|err| {
        fs::remove_file(&tmp_path).ok();
        StoreError::io(path, err)
    })
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{}", counter));
    }
    candidate
}

/// Advisory lock on the directory containing a note file.
struct DirLock {
    file: File,
    path: PathBuf,
}

impl DirLock {
    fn open(note_path: &Path) -> Result<Self, StoreError> {
        let dir = note_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let path = dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|err| StoreError::io(&path, err))?;
        Ok(Self { file, path })
    }

    fn shared(note_path: &Path) -> Result<Self, StoreError> {
        let lock = Self::open(note_path)?;
        lock.file
            .lock_shared()
            .map_err(|err| StoreError::io(&lock.path, err))?;
        Ok(lock)
    }

    fn exclusive(note_path: &Path) -> Result<Self, StoreError> {
        let lock = Self::open(note_path)?;
        lock.file
            .lock_exclusive()
            .map_err(|err| StoreError::io(&lock.path, err))?;
        Ok(lock)
    }

    fn release(self) {
        self.file.unlock().unwrap_or_else(|err| {
            warn!("failed to unlock {}: {}", self.path.display(), err)
        });
    }
}
