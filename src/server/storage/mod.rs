//! Storage for uploaded YAML files.
//!
//! Files are addressed by an opaque key of the form `<millis>_<nonce>_<basename>`. The key
//! is what entries persist in `yaml_file_path`.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use rand::Rng;
use tokio::sync::RwLock;

use crate::server::error::AppError;

const NONCE_LENGTH: usize = 8;
const NONCE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Upload store selected at startup.
///
/// Cloning is cheap. Clones of the in-memory variant share the same map.
#[derive(Clone)]
pub enum UploadStore {
    /// Files under `<DATA_DIR>/uploads`, used with the `prod` profile.
    FileSystem { root: PathBuf },
    /// Process-local map, emptied on restart.
    InMemory(Arc<RwLock<HashMap<String, Vec<u8>>>>),
}

impl UploadStore {
    /// Creates a file system store rooted at `<data_dir>/uploads`, creating the directory.
    ///
    /// # Returns
    /// - `Ok(UploadStore)` - Store ready for use
    /// - `Err(AppError::IoErr)` - The uploads directory could not be created
    pub async fn file_system(data_dir: &Path) -> Result<Self, AppError> {
        let root = data_dir.join("uploads");
        tokio::fs::create_dir_all(&root).await?;

        tracing::info!("Storing uploads in {}", root.display());

        Ok(Self::FileSystem { root })
    }

    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(RwLock::new(HashMap::new())))
    }

    /// Checks that an upload is a non-empty `.yaml` or `.yml` file.
    ///
    /// # Returns
    /// - `Ok(())` - Upload is acceptable
    /// - `Err(AppError::BadRequest)` - Wrong extension or empty content
    pub fn validate(original_filename: &str, bytes: &[u8]) -> Result<(), AppError> {
        let lower = original_filename.to_ascii_lowercase();
        if !(lower.ends_with(".yaml") || lower.ends_with(".yml")) {
            return Err(AppError::BadRequest("Only .yaml or .yml files are accepted".to_string()));
        }

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        Ok(())
    }

    /// Stores `bytes` under a freshly generated key and returns the key.
    ///
    /// # Returns
    /// - `Ok(String)` - Key of the stored file
    /// - `Err(AppError::BadRequest)` - Upload rejected by `validate`
    /// - `Err(AppError::IoErr)` - Writing to disk failed
    pub async fn save(&self, original_filename: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        Self::validate(original_filename, &bytes)?;

        let key = generate_key(original_filename);

        match self {
            Self::FileSystem { root } => {
                tokio::fs::write(root.join(&key), &bytes).await?;
            }
            Self::InMemory(files) => {
                files.write().await.insert(key.clone(), bytes);
            }
        }

        tracing::debug!("Stored upload {}", key);

        Ok(key)
    }

    /// Loads the file stored under `key`.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` - File content
    /// - `Ok(None)` - Nothing is stored under `key`
    /// - `Err(AppError::IoErr)` - Reading from disk failed
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        match self {
            Self::FileSystem { root } => {
                let Some(path) = resolve(root, key) else {
                    return Ok(None);
                };

                match tokio::fs::read(path).await {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
            Self::InMemory(files) => Ok(files.read().await.get(key).cloned()),
        }
    }

    /// Removes the file stored under `key`. Removing a missing file is not an error.
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        match self {
            Self::FileSystem { root } => {
                let Some(path) = resolve(root, key) else {
                    return Ok(());
                };

                match tokio::fs::remove_file(path).await {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(e.into()),
                }
            }
            Self::InMemory(files) => {
                files.write().await.remove(key);
                Ok(())
            }
        }
    }
}

/// Joins `key` onto `root`, refusing keys that could escape the uploads directory.
fn resolve(root: &Path, key: &str) -> Option<PathBuf> {
    if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
        return None;
    }

    Some(root.join(key))
}

fn generate_key(original_filename: &str) -> String {
    let mut rng = rand::rng();
    let nonce: String = (0..NONCE_LENGTH)
        .map(|_| NONCE_CHARSET[rng.random_range(0..NONCE_CHARSET.len())] as char)
        .collect();

    format!(
        "{}_{}_{}",
        Utc::now().timestamp_millis(),
        nonce,
        sanitize_basename(original_filename)
    )
}

/// Reduces a client supplied filename to a safe basename.
///
/// Directory components of either separator style are dropped and every character outside
/// `[A-Za-z0-9._-]` becomes `_`.
fn sanitize_basename(original_filename: &str) -> String {
    let basename = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let sanitized: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    sanitized.trim_start_matches('.').to_string()
}
