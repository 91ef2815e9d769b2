//! Command line arguments.

use clap::Parser;
use hunkview_config::{ViewConfig, ViewMode};
use std::path::PathBuf;

/// Render git diffs with word-level highlighting and expanded context
#[derive(Debug, Parser)]
#[command(name = "hunkview", version, about)]
pub struct Args {
    /// Show staged changes (`git diff --staged`)
    #[arg(long, conflicts_with_all = ["commit", "input"])]
    pub staged: bool,

    /// Show the changes of a commit (`git show <REV>`)
    #[arg(long, value_name = "REV", conflicts_with = "input")]
    pub commit: Option<String>,

    /// Read diff text from a file instead of running git ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Side-by-side layout
    #[arg(long, conflicts_with = "unified")]
    pub split: bool,

    /// Single column layout
    #[arg(long)]
    pub unified: bool,

    /// Reveal hidden context above and below every chunk
    #[arg(long)]
    pub expand: bool,

    /// Lines revealed per direction when expanding (overrides config)
    #[arg(long, value_name = "N")]
    pub expand_step: Option<u32>,

    /// Syntax theme (overrides config)
    #[arg(long)]
    pub theme: Option<String>,

    /// Disable word-level highlighting
    #[arg(long)]
    pub no_word_diff: bool,

    /// Plain output without ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Total output width for the split layout
    #[arg(long, default_value_t = 160)]
    pub width: usize,
}

/// Where the diff text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// `git diff`: working tree against the index
    Worktree,
    /// `git diff --staged`: index against HEAD
    Staged,
    /// `git show <rev>`
    Commit(String),
    /// A file, or stdin for `-`
    Input(PathBuf),
}

impl Args {
    pub fn source(&self) -> DiffSource {
        if let Some(path) = &self.input {
            DiffSource::Input(path.clone())
        } else if let Some(rev) = &self.commit {
            DiffSource::Commit(rev.clone())
        } else if self.staged {
            DiffSource::Staged
        } else {
            DiffSource::Worktree
        }
    }

    /// Apply command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut ViewConfig) {
        if self.split {
            config.view_mode = ViewMode::Split;
        } else if self.unified {
            config.view_mode = ViewMode::Unified;
        }
        if let Some(step) = self.expand_step.filter(|s| *s > 0) {
            config.expand_step = step;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if self.no_word_diff {
            config.word_diff.enabled = false;
        }
    }
}
