//! Minimal Rego file reader.
//!
//! Extracts only what generation needs: the package clause, `data.*`
//! imports, `#` comment lines and whether a given rule is declared. The rule
//! bodies themselves are never interpreted.

use crate::error::{CreateError, Result};
use crate::models::rego::RegoFile;
use log::debug;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*package\s+([A-Za-z0-9_.]+)").expect("valid package regex"));

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+data\.([A-Za-z0-9_.]+)").expect("valid import regex"));

/// Remove every line whose first non-blank character is `#`.
///
/// Kept lines are emitted verbatim, each followed by a newline.
pub fn strip_comments(rego: &str) -> String {
    let mut out = String::with_capacity(rego.len());
    for line in rego.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Parse Rego source text into a `RegoFile`.
pub fn parse(path: &Path, contents: String) -> RegoFile {
    let mut package_name = String::new();
    let mut import_packages = Vec::new();
    let mut comments = Vec::new();
    for line in contents.lines() {
        let trimmed = line.trim_start();
        if let Some(text) = trimmed.strip_prefix('#') {
            comments.push(text.to_string());
            continue;
        }
        if package_name.is_empty() {
            if let Some(c) = PACKAGE_RE.captures(line) {
                package_name = c[1].to_string();
                continue;
            }
        }
        if let Some(c) = IMPORT_RE.captures(line) {
            import_packages.push(c[1].to_string());
        }
    }
    RegoFile {
        path: path.to_path_buf(),
        contents,
        package_name,
        import_packages,
        comments,
    }
}

/// Read and parse a single Rego file.
pub fn read_file(path: &Path) -> Result<RegoFile> {
    let contents = fs::read_to_string(path).map_err(|source| CreateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(path, contents))
}

/// Whether `contents` declares a rule named `rule`.
///
/// Rule heads may be indented and may carry a `default` keyword.
pub fn has_rule(contents: &str, rule: &str) -> bool {
    contents.lines().any(|line| {
        let head = line.trim_start();
        let head = head
            .strip_prefix("default")
            .filter(|rest| rest.starts_with([' ', '\t']))
            .map(str::trim_start)
            .unwrap_or(head);
        let Some(rest) = head.strip_prefix(rule) else {
            return false;
        };
        match rest.chars().next() {
            None => true,
            Some(c) => matches!(c, '[' | '{' | '=' | ':' | ' ' | '\t'),
        }
    })
}

fn is_rego_source(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.ends_with(".rego") && !name.ends_with("_test.rego")
}

/// Walk `root` in file-name order and parse every non-test `.rego` file.
///
/// `.git` directories are skipped entirely.
pub fn get_files(root: &Path) -> Result<Vec<RegoFile>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == ".git"));
    for entry in walker {
        let entry = entry.map_err(|source| CreateError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        if entry.file_type().is_file() && is_rego_source(entry.path()) {
            files.push(read_file(entry.path())?);
        }
    }
    debug!("found {} rego files under {}", files.len(), root.display());
    Ok(files)
}

/// Like `get_files`, keeping only files that declare `rule`.
pub fn get_files_with_rule(root: &Path, rule: &str) -> Result<Vec<RegoFile>> {
    let files = get_files(root)?;
    Ok(files
        .into_iter()
        .filter(|f| has_rule(&f.contents, rule))
        .collect())
}
