//! JSON file backend
//!
//! The whole document lives in one pretty-printed JSON file. Every write
//! replaces it using the write-fsync-rename pattern:
//! 1. Write to a temporary file next to the target (`.<name>.tmp`)
//! 2. fsync the temporary file
//! 3. Atomic rename over the target
//! 4. fsync the parent directory
//!
//! Readers therefore see either the old document or the new one, never a
//! partial file.
//!
//! An exclusive advisory lock on `<name>.lock` is held for the lifetime of
//! the storage so that a second process cannot write the same document.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sitedata_core::{CorruptionPolicy, Document, DocumentStorage, Error, Result, Schema};
use tracing::{debug, info, warn};

/// Document stored in a JSON file on disk.
pub struct JsonFileStorage {
    path: PathBuf,
    schema: Schema,
    policy: CorruptionPolicy,
    _lock: File,
}

impl std::fmt::Debug for JsonFileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStorage")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish()
    }
}

impl JsonFileStorage {
    /// Open the document at `path`, taking the process lock.
    ///
    /// Creates the parent directory if needed. Does not create the document
    /// itself; call [`DocumentStorage::ensure`] for that.
    ///
    /// # Errors
    ///
    /// Returns `Error::Locked` if another process holds the lock.
    pub fn open(
        path: impl Into<PathBuf>,
        schema: Schema,
        policy: CorruptionPolicy,
    ) -> Result<Self> {
        let path = path.into();
        let lock_path = lock_path(&path)?;
        fs::create_dir_all(parent_dir(&path))?;

        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)?;
        fs2::FileExt::try_lock_exclusive(&lock_file).map_err(|_| Error::Locked(path.clone()))?;

        debug!(target: "sitedata::store", path = ?path, ?policy, "Opened document storage");
        Ok(Self {
            path,
            schema,
            policy,
            _lock: lock_file,
        })
    }

    /// Location of the document file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document> {
        let text = fs::read_to_string(&self.path)?;
        Document::parse(&text)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        parent_dir(&self.path).join(format!(".{name}.tmp"))
    }
}

impl DocumentStorage for JsonFileStorage {
    fn ensure(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        fs::create_dir_all(parent_dir(&self.path))?;
        self.write(&self.schema.empty_document())?;
        info!(target: "sitedata::store", path = ?self.path, "Created default document");
        Ok(())
    }

    fn read(&self) -> Result<Document> {
        match self.load() {
            Ok(document) => Ok(document),
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(target: "sitedata::store", path = ?self.path, "Document missing, serving default");
                Ok(self.schema.empty_document())
            }
            Err(e) => match self.policy {
                CorruptionPolicy::Reset => {
                    warn!(
                        target: "sitedata::store",
                        path = ?self.path,
                        error = %e,
                        "Unreadable document, serving default document. The next write replaces it."
                    );
                    Ok(self.schema.empty_document())
                }
                CorruptionPolicy::Fail => Err(Error::Corrupt {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }),
            },
        }
    }

    fn write(&self, document: &Document) -> Result<()> {
        let text = document.to_pretty_string()?;
        let temp_path = self.temp_path();

        let result = (|| -> io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            drop(file);

            fs::rename(&temp_path, &self.path)?;

            #[cfg(unix)]
            File::open(parent_dir(&self.path))?.sync_all()?;
            Ok(())
        })();

        if let Err(e) = result {
            warn!(target: "sitedata::store", path = ?self.path, error = %e, "Failed to write document");
            let _ = fs::remove_file(&temp_path);
            return Err(Error::Io(e));
        }
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn lock_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::invalid_input(format!("{} is not a file path", path.display())))?;
    let mut lock_name = name.to_os_string();
    lock_name.push(".lock");
    Ok(path.with_file_name(lock_name))
}
