use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{repository::TodoRepository, todo::Todo};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to decode {}: {source}", path.display())]
    Decode { path: PathBuf, #[source] source: serde_json::Error },
    #[error("failed to encode todos for {}: {source}", path.display())]
    Encode { path: PathBuf, #[source] source: serde_json::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, #[source] source: std::io::Error },
}

/// Keeps the whole collection as one JSON array in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileTodoRepository {
    path: PathBuf,
}

impl JsonFileTodoRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    #[cfg(test)]
    fn path(&self) -> &Path { &self.path }
}

#[async_trait]
impl TodoRepository for JsonFileTodoRepository {
    async fn init(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Todo>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "store file missing, empty collection");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        // `null` is an empty collection as well
        let todos: Option<Vec<Todo>> = serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Decode { path: self.path.clone(), source })?;
        let todos = todos.unwrap_or_default();
        tracing::debug!(path = %self.path.display(), count = todos.len(), "loaded todos");
        Ok(todos)
    }

    async fn save(&self, todos: &[Todo]) -> Result<()> {
        let data = serde_json::to_vec(todos)
            .map_err(|source| StoreError::Encode { path: self.path.clone(), source })?;
        tokio::fs::write(&self.path, data)
            .await
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })?;
        tracing::debug!(path = %self.path.display(), count = todos.len(), "saved todos");
        Ok(())
    }
}
