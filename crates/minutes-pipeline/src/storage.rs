use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Longest sanitized filename suffix kept on disk
const MAX_NAME_LEN: usize = 100;

/// Suffix used when the client sent no usable filename
const FALLBACK_NAME: &str = "audio";

/// Errors from the upload directory
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The upload directory could not be created
    #[error("failed to create upload directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// The upload could not be written
    #[error("failed to write upload {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Audio received from a client, not yet on disk
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    /// Client-supplied filename; untrusted, only used as a readable suffix
    pub filename: Option<String>,
    pub data: Bytes,
}

impl UploadedAudio {
    pub fn new(filename: Option<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename,
            data: data.into(),
        }
    }
}

/// Directory that holds uploads for the duration of one request
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    /// Write `upload` to a fresh, uniquely named file
    ///
    /// On failure nothing is left behind: a partially written file is
    /// removed before the error is returned.
    pub async fn acquire(&self, upload: UploadedAudio) -> Result<StoredAudio, StorageError> {
        let token = Uuid::new_v4();
        let name = sanitize_filename(upload.filename.as_deref().unwrap_or_default());
        let path = self.dir.join(format!("{token}_{name}"));

        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        // From here on the guard owns the file and removes it if writing fails
        let stored = StoredAudio {
            path,
            token,
            released: false,
        };

        if let Err(source) = write_all(file, &upload.data).await {
            let path = stored.path.clone();
            stored.release().await;
            return Err(StorageError::Write { path, source });
        }

        tracing::debug!(
            request_id = %token,
            bytes = upload.data.len(),
            path = %stored.path.display(),
            "upload stored"
        );

        Ok(stored)
    }
}

async fn write_all(mut file: tokio::fs::File, data: &[u8]) -> io::Result<()> {
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

/// An upload on disk, deleted when released or dropped
///
/// Deletion happens exactly once. Failures are logged, never raised, so
/// cleanup cannot mask an earlier error.
#[derive(Debug)]
pub struct StoredAudio {
    path: PathBuf,
    token: Uuid,
    released: bool,
}

impl StoredAudio {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-request identifier, also used as the file prefix
    pub fn token(&self) -> Uuid {
        self.token
    }

    /// Delete the file without blocking the runtime
    pub async fn release(mut self) {
        self.released = true;
        log_removal(&self.path, tokio::fs::remove_file(&self.path).await);
    }
}

impl Drop for StoredAudio {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            log_removal(&self.path, std::fs::remove_file(&self.path));
        }
    }
}

fn log_removal(path: &Path, result: io::Result<()>) {
    match result {
        Ok(()) => tracing::debug!(path = %path.display(), "upload removed"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove upload"),
    }
}

/// Reduce a client filename to a safe single path component
fn sanitize_filename(name: &str) -> String {
    // Browsers on Windows may send the full path
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') || (!c.is_ascii() && c.is_alphanumeric()) {
                c
            } else {
                '_'
            }
        })
        .skip_while(|&c| c == '.')
        .take(MAX_NAME_LEN)
        .collect();

    if cleaned.is_empty() {
        FALLBACK_NAME.to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files_in(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect()
    }

    #[test]
    fn sanitize_keeps_readable_names() {
        assert_eq!(sanitize_filename("meeting-01.m4a"), "meeting-01.m4a");
        assert_eq!(sanitize_filename("주간 회의.wav"), "주간_회의.wav");
    }

    #[test]
    fn sanitize_strips_paths_and_hidden_prefixes() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\rec.mp3"), "rec.mp3");
        assert_eq!(sanitize_filename("..hidden"), "hidden");
        assert_eq!(sanitize_filename(""), "audio");
        assert_eq!(sanitize_filename("..."), "audio");
    }

    #[test]
    fn sanitize_caps_length() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_NAME_LEN);
    }

    #[tokio::test]
    async fn acquire_writes_bytes_under_unique_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let a = store
            .acquire(UploadedAudio::new(Some("rec.wav".to_owned()), &b"first"[..]))
            .await
            .unwrap();
        let b = store
            .acquire(UploadedAudio::new(Some("rec.wav".to_owned()), &b"second"[..]))
            .await
            .unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().file_name().unwrap().to_string_lossy().ends_with("_rec.wav"));
        assert!(a.path().starts_with(dir.path()));
        assert_eq!(std::fs::read(a.path()).unwrap(), b"first");
        assert_eq!(std::fs::read(b.path()).unwrap(), b"second");
    }

    #[tokio::test]
    async fn release_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let stored = store.acquire(UploadedAudio::new(None, &b"x"[..])).await.unwrap();
        assert_eq!(files_in(dir.path()).len(), 1);

        stored.release().await;
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn drop_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let stored = store.acquire(UploadedAudio::new(None, &b"x"[..])).await.unwrap();
        drop(stored);

        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn release_tolerates_already_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let stored = store.acquire(UploadedAudio::new(None, &b"x"[..])).await.unwrap();
        std::fs::remove_file(stored.path()).unwrap();

        stored.release().await;
    }

    #[tokio::test]
    async fn unwritable_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("uploads");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = UploadStore::new(&blocker);
        let err = store.acquire(UploadedAudio::new(None, &b"x"[..])).await.unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(files_in(dir.path()), vec![blocker]);
    }

    #[tokio::test]
    async fn ensure_dir_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("a/b/uploads"));

        store.ensure_dir().await.unwrap();

        assert!(store.dir().is_dir());
    }
}
