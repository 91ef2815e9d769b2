use anyhow::{Context, Result};
use clap::Parser;
use hunkview::{
    parse_unified_diff, split_rows, unified_rows, DiffFile, ExpandDirection, ExpansionState,
    FileContentProvider, HighlighterService, RenderOptions,
};
use hunkview_config::{ViewConfig, ViewMode};
use std::io::{IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

mod cli;
mod git;
mod logger;
mod print;

use cli::{Args, DiffSource};
use git::{GitShowProvider, WorktreeProvider};
use print::Printer;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let args = Args::parse();
    let mut config = ViewConfig::load();
    args.apply(&mut config);
    log::debug!("Effective config: {:?}", config);

    let color = !args.no_color && std::io::stdout().is_terminal();

    // Syntax sets load while git runs.
    let highlighter = Arc::new(HighlighterService::new(config.theme.clone()));
    let init = color.then(|| {
        let service = Arc::clone(&highlighter);
        service.on_ready(|| log::debug!("Syntax highlighting ready"));
        tokio::task::spawn_blocking(move || service.initialize())
    });

    let source = args.source();
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let repo = match &source {
        DiffSource::Input(_) => git::repo_root(&cwd).await.unwrap_or_else(|_| cwd.clone()),
        _ => git::repo_root(&cwd).await?,
    };

    let raw = git::read_diff(&source, &repo).await?;
    let files = parse_unified_diff(&raw);
    if files.is_empty() {
        println!("no differences");
        return Ok(());
    }
    log::info!("Parsed {} changed file(s)", files.len());

    let mut expansion = ExpansionState::new();
    if args.expand {
        expand_all(&files, &source, &repo, config.expand_step, &mut expansion).await;
    }

    if let Some(init) = init {
        init.await.context("Highlighter initialization panicked")?;
    }

    let options = RenderOptions {
        word_diff: config.word_diff.enabled,
        max_word_diff_cells: config.word_diff.max_cells,
    };

    let mut out = String::new();
    for file in &files {
        let printer = Printer::new(color.then_some(highlighter.as_ref()), color, file);
        printer.file_header(&mut out, file);

        let file_len = expansion.file_len(&file.path);
        match config.view_mode {
            ViewMode::Unified => {
                let rows = unified_rows(file, &expansion, file_len, &options);
                printer.unified(&mut out, &file.path, &rows);
            }
            ViewMode::Split => {
                let rows = split_rows(file, &expansion, file_len, &options);
                printer.split(&mut out, &file.path, &rows, args.width);
            }
        }
        out.push('\n');
    }

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(out.as_bytes()) {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("Failed to write output"),
    }
}

/// Reveal `step` lines above and below every chunk of every file.
async fn expand_all(
    files: &[DiffFile],
    source: &DiffSource,
    repo: &Path,
    step: u32,
    state: &mut ExpansionState,
) {
    let revision = git::new_side_revision(source);
    let provider: Box<dyn FileContentProvider> = match &revision {
        Some(_) => Box::new(GitShowProvider::new(repo)),
        None => Box::new(WorktreeProvider::new(repo)),
    };
    let revision = revision.unwrap_or_default();

    for file in files.iter().filter(|f| !f.chunks.is_empty()) {
        let lines = match provider.file_lines(&revision, &file.path).await {
            Ok(lines) => lines,
            Err(e) => {
                log::debug!("No context for {}: {}", file.path, e);
                continue;
            }
        };

        for chunk_index in 0..file.chunks.len() {
            for direction in [ExpandDirection::Up, ExpandDirection::Down] {
                hunkview::expansion::expand(file, chunk_index, direction, step, &lines, state);
            }
        }
    }
}
