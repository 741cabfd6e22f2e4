//! Local-disk attachment store
//!
//! Files live under `{root}/{kind}/{uuid}-{sanitized name}`; the stored
//! reference is the relative path `{kind}/{file}`.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File too large. Maximum size is {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Empty file provided")]
    Empty,
    #[error("Invalid attachment path: {0}")]
    InvalidPath(String),
    #[error("Attachment not found: {0}")]
    NotFound(String),
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Attachment subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Receipt,
    Expense,
}

impl AttachmentKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Receipt => "receipts",
            Self::Expense => "expenses",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "receipts" => Some(Self::Receipt),
            "expenses" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// Replace every char outside `[A-Za-z0-9_.-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
    max_bytes: usize,
}

impl AttachmentStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Store an upload. Returns the reference to persist (`receipts/<file>`).
    pub async fn save(
        &self,
        kind: AttachmentKind,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        if data.is_empty() {
            return Err(StorageError::Empty);
        }
        if data.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let dir = self.root.join(kind.dir_name());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        tokio::fs::write(dir.join(&file_name), data).await?;

        let reference = format!("{}/{}", kind.dir_name(), file_name);
        tracing::info!(
            target: "attachments",
            reference = %reference,
            size = data.len(),
            sha256 = %calculate_hash(data),
            "Attachment stored"
        );
        Ok(reference)
    }

    /// Map a stored reference to a path under the root, rejecting anything
    /// that could escape it.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, StorageError> {
        let invalid = || StorageError::InvalidPath(reference.to_string());
        let (dir, name) = reference.split_once('/').ok_or_else(invalid)?;
        let kind = AttachmentKind::from_dir_name(dir).ok_or_else(invalid)?;
        if name.is_empty() || name.starts_with('.') || sanitize_file_name(name) != name {
            return Err(invalid());
        }
        Ok(self.root.join(kind.dir_name()).join(name))
    }

    /// Read a stored attachment with its guessed content type
    pub async fn read(&self, reference: &str) -> Result<(Vec<u8>, String), StorageError> {
        let path = self.resolve(reference)?;
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(reference.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let mime = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok((data, mime))
    }

    /// Best-effort removal; failures are logged only.
    pub async fn delete(&self, reference: &str) {
        let path = match self.resolve(reference) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(target: "attachments", error = %e, "Skipping attachment delete");
                return;
            }
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!(target: "attachments", reference = %reference, "Attachment deleted"),
            Err(e) => {
                tracing::warn!(target: "attachments", reference = %reference, error = %e, "Failed to delete attachment")
            }
        }
    }
}
