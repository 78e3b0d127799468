//! Subcommand implementations. Each returns the text to print so the binary
//! stays a thin shell and the commands are testable.

use anyhow::{Context, Result, bail};
use mudz_common::{LineMap, Position};
use mudz_lsp::config::CONFIG_FILE_NAME;
use mudz_lsp::{
    CompletionOptions, Completions, FileResolver, FsLoader, LocatedDiagnostic, ProjectConfig,
    analyze, collect_diagnostics,
};
use mudz_scanner::{ScannerState, TokenValue};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::args::{CliArgs, Command};
use crate::reporter::Reporter;

/// File extensions picked up when `check` walks a directory.
const SOURCE_EXTENSIONS: &[&str] = &["c", "h", "lpc"];

/// What a command printed and whether it found problems.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub text: String,
    pub has_errors: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        CommandOutput {
            text,
            has_errors: false,
        }
    }
}

pub fn run(args: &CliArgs, cwd: &Path, color: bool) -> Result<CommandOutput> {
    let config = load_config(args, cwd)?;
    debug!(?config, "project configuration");

    match &args.command {
        Command::Tokens { file, comments } => {
            let source = read_source(&cwd.join(file))?;
            Ok(CommandOutput::ok(render_tokens(
                &source,
                *comments || config.emit_comments,
            )))
        }
        Command::Ast { file } => {
            let source = read_source(&cwd.join(file))?;
            let analyzed = analyze(&file.display().to_string(), &source);
            Ok(CommandOutput::ok(analyzed.arena.dump(analyzed.root)))
        }
        Command::Complete {
            file,
            offset,
            line,
            column,
            json,
        } => {
            let path = cwd.join(file);
            let source = read_source(&path)?;
            let cursor = match (offset, line, column) {
                (Some(offset), _, _) => *offset,
                (None, Some(line), Some(column)) => cursor_offset(&source, *line, *column)?,
                _ => source.len() as u32,
            };
            let text = complete(&config, &path, &source, cursor, *json)?;
            Ok(CommandOutput::ok(text))
        }
        Command::Check { paths, json } => {
            let roots: Vec<PathBuf> = paths.iter().map(|p| cwd.join(p)).collect();
            check(&roots, *json, color)
        }
    }
}

/// Project configuration from `--project` (a file or a directory) or the
/// working directory, with `-I` paths appended.
pub fn load_config(args: &CliArgs, cwd: &Path) -> Result<ProjectConfig> {
    let dir = match &args.project {
        Some(project) => {
            let project = cwd.join(project);
            if project.is_dir() {
                project
            } else if project.file_name().is_some_and(|name| name == CONFIG_FILE_NAME) {
                project
                    .parent()
                    .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf)
            } else {
                bail!(
                    "project path {} is not a directory or {CONFIG_FILE_NAME}",
                    project.display()
                );
            }
        }
        None => cwd.to_path_buf(),
    };

    let mut config = ProjectConfig::load(&dir)?;
    config
        .include_paths
        .extend(args.include.iter().map(|path| cwd.join(path)));
    Ok(config)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Convert a 1-based line/column pair into a byte offset.
pub fn cursor_offset(source: &str, line: u32, column: u32) -> Result<u32> {
    if line == 0 || column == 0 {
        bail!("line and column are 1-based");
    }
    let line_map = LineMap::build(source);
    line_map
        .position_to_offset(Position::new(line - 1, column - 1), source)
        .with_context(|| format!("line {line} is past the end of the file"))
}

/// One token per line: span, kind, then payload and flags when present.
pub fn render_tokens(source: &str, emit_comments: bool) -> String {
    let mut out = String::new();
    for token in ScannerState::new(source, emit_comments) {
        let _ = write!(out, "{}..{} {:?}", token.pos, token.end, token.kind);
        match &token.value {
            Some(TokenValue::Text(text)) => {
                let _ = write!(out, " {text:?}");
            }
            Some(TokenValue::Integer(value)) => {
                let _ = write!(out, " {value}");
            }
            Some(TokenValue::Char(ch)) => {
                let _ = write!(out, " {ch:?}");
            }
            None => {}
        }
        if !token.flags.is_empty() {
            let _ = write!(out, " {:?}", token.flags);
        }
        out.push('\n');
    }
    out
}

/// Suggestions at `cursor`. Dependencies are looked up next to the file and
/// in the configured include paths.
pub fn complete(
    config: &ProjectConfig,
    path: &Path,
    source: &str,
    cursor: u32,
    json: bool,
) -> Result<String> {
    let mut roots = Vec::new();
    if let Some(parent) = path.parent() {
        roots.push(parent.to_path_buf());
    }
    roots.extend(config.include_paths.iter().cloned());
    let resolver = FileResolver::new(Arc::new(FsLoader::new(roots)));

    let analyzed = analyze(&path.display().to_string(), source);
    let result = Completions::new(&analyzed)
        .with_resolver(&resolver)
        .with_options(CompletionOptions::from(&config.completion))
        .complete(cursor);

    if json {
        return serde_json::to_string_pretty(&result).context("failed to encode completions");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:?} (prefix {:?}, {} suggestions)",
        result.suggestion_type,
        result.prefix,
        result.suggestions.len()
    );
    for suggestion in &result.suggestions {
        let _ = write!(out, "  {:<24} {}", suggestion.insert_text, suggestion.description);
        if let Some(right_hand) = &suggestion.right_hand {
            let _ = write!(out, " : {right_hand}");
        }
        out.push('\n');
    }
    Ok(out)
}

/// Source files named directly or found under the given directories,
/// sorted and deduplicated.
pub fn collect_sources(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let is_source = entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
            if is_source {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

#[derive(Serialize)]
struct FileReport {
    file: String,
    diagnostics: Vec<LocatedDiagnostic>,
}

pub fn check(paths: &[PathBuf], json: bool, color: bool) -> Result<CommandOutput> {
    let files = collect_sources(paths);
    let analyzed: Vec<(String, String, Vec<LocatedDiagnostic>)> = files
        .par_iter()
        .map(|path| -> Result<_> {
            let source = read_source(path)?;
            let name = path.display().to_string();
            let diagnostics = collect_diagnostics(&analyze(&name, &source));
            Ok((name, source, diagnostics))
        })
        .collect::<Result<_>>()?;

    let error_count: usize = analyzed.iter().map(|(_, _, d)| d.len()).sum();
    info!(files = analyzed.len(), errors = error_count, "check finished");

    let text = if json {
        let reports: Vec<FileReport> = analyzed
            .into_iter()
            .map(|(file, _, diagnostics)| FileReport { file, diagnostics })
            .collect();
        serde_json::to_string_pretty(&reports).context("failed to encode diagnostics")?
    } else {
        let reporter = Reporter::new(color);
        let mut out = String::new();
        for (_, source, diagnostics) in &analyzed {
            if !diagnostics.is_empty() {
                out.push_str(&reporter.render(source, diagnostics));
                out.push('\n');
            }
        }
        let _ = writeln!(
            out,
            "Found {} error{} in {} file{}.",
            error_count,
            if error_count == 1 { "" } else { "s" },
            analyzed.len(),
            if analyzed.len() == 1 { "" } else { "s" }
        );
        out
    };

    Ok(CommandOutput {
        text,
        has_errors: error_count > 0,
    })
}
