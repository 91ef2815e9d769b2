//! Trait for fetching full file content at a revision.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching file content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The path does not exist at the requested revision.
    #[error("{path} not found at {revision}")]
    NotFound { revision: String, path: String },

    /// The underlying command or I/O failed.
    #[error("Failed to read file content: {0}")]
    Command(String),

    /// The content provider is not available.
    #[error("Content provider unavailable: {0}")]
    Unavailable(String),
}

/// Provides file content for context expansion.
///
/// Implement this trait to let context expansion read the file a diff
/// refers to, e.g. via `git show <revision>:<path>`.
///
/// # Example
///
/// ```ignore
/// struct GitShowProvider {
///     repo: PathBuf,
/// }
///
/// #[async_trait]
/// impl FileContentProvider for GitShowProvider {
///     async fn file_lines(&self, revision: &str, path: &str) -> Result<Vec<String>, ContentError> {
///         let output = Command::new("git")
///             .arg("show")
///             .arg(format!("{revision}:{path}"))
///             .current_dir(&self.repo)
///             .output()
///             .await
///             .map_err(|e| ContentError::Command(e.to_string()))?;
///
///         Ok(String::from_utf8_lossy(&output.stdout).lines().map(String::from).collect())
///     }
/// }
/// ```
#[async_trait]
pub trait FileContentProvider: Send + Sync {
    /// Fetch all lines of `path` at `revision`, without newline characters.
    async fn file_lines(&self, revision: &str, path: &str) -> Result<Vec<String>, ContentError>;
}

/// A content provider for when context expansion is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpContentProvider;

#[async_trait]
impl FileContentProvider for NoOpContentProvider {
    async fn file_lines(&self, _revision: &str, _path: &str) -> Result<Vec<String>, ContentError> {
        Err(ContentError::Unavailable(
            "Context expansion is disabled".to_string(),
        ))
    }
}

/// Serves content from memory, keyed by `(revision, path)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentProvider {
    files: std::collections::HashMap<(String, String), Vec<String>>,
}

impl InMemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content of `path` at `revision`.
    pub fn insert(&mut self, revision: impl Into<String>, path: impl Into<String>, content: &str) {
        self.files.insert(
            (revision.into(), path.into()),
            content.lines().map(String::from).collect(),
        );
    }
}

#[async_trait]
impl FileContentProvider for InMemoryContentProvider {
    async fn file_lines(&self, revision: &str, path: &str) -> Result<Vec<String>, ContentError> {
        self.files
            .get(&(revision.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                revision: revision.to_string(),
                path: path.to_string(),
            })
    }
}
