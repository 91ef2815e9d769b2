//! Thin wrappers around the `git` command line.

use crate::cli::DiffSource;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use hunkview::{ContentError, FileContentProvider};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

async fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    log::debug!("Running git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .await
        .context("Failed to run git")?;

    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Top level directory of the repository containing `dir`.
pub async fn repo_root(dir: &Path) -> Result<PathBuf> {
    let out = run_git(dir, &["rev-parse", "--show-toplevel"]).await?;
    Ok(PathBuf::from(out.trim()))
}

/// Get the raw unified diff text for `source`.
pub async fn read_diff(source: &DiffSource, repo: &Path) -> Result<String> {
    match source {
        DiffSource::Worktree => run_git(repo, &["diff", "--no-color", "--no-ext-diff"]).await,
        DiffSource::Staged => {
            run_git(repo, &["diff", "--staged", "--no-color", "--no-ext-diff"]).await
        }
        DiffSource::Commit(rev) => {
            run_git(repo, &["show", "--no-color", "--no-ext-diff", rev.as_str()]).await
        }
        DiffSource::Input(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read diff from stdin")?;
            Ok(text)
        }
        DiffSource::Input(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read diff from {}", path.display())),
    }
}

/// Reads file content through `git show <revision>:<path>`.
///
/// An empty revision reads the index (`git show :<path>`).
#[derive(Debug, Clone)]
pub struct GitShowProvider {
    repo: PathBuf,
}

impl GitShowProvider {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }
}

#[async_trait]
impl FileContentProvider for GitShowProvider {
    async fn file_lines(&self, revision: &str, path: &str) -> Result<Vec<String>, ContentError> {
        let object = format!("{revision}:{path}");
        let output = Command::new("git")
            .args(["show", "--no-color", object.as_str()])
            .current_dir(&self.repo)
            .output()
            .await
            .map_err(|e| ContentError::Command(e.to_string()))?;

        if !output.status.success() {
            return Err(ContentError::NotFound {
                revision: revision.to_string(),
                path: path.to_string(),
            });
        }
        Ok(split_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Reads file content from the working tree.
#[derive(Debug, Clone)]
pub struct WorktreeProvider {
    root: PathBuf,
}

impl WorktreeProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileContentProvider for WorktreeProvider {
    async fn file_lines(&self, revision: &str, path: &str) -> Result<Vec<String>, ContentError> {
        let bytes = tokio::fs::read(self.root.join(path))
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ContentError::NotFound {
                    revision: revision.to_string(),
                    path: path.to_string(),
                },
                _ => ContentError::Command(e.to_string()),
            })?;
        Ok(split_lines(&String::from_utf8_lossy(&bytes)))
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

/// Revision holding the new side of `source`, for context expansion.
///
/// `None` means the new side is the working tree.
pub fn new_side_revision(source: &DiffSource) -> Option<String> {
    match source {
        DiffSource::Worktree | DiffSource::Input(_) => None,
        DiffSource::Staged => Some(String::new()),
        DiffSource::Commit(rev) => Some(rev.clone()),
    }
}
