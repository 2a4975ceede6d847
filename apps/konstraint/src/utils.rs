//! Console helpers shared by the binary and the report printer.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are on unless `NO_COLOR` is set.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Path relative to the working directory when possible.
pub fn rel_to_wd(path: &Path) -> String {
    let rel = std::env::current_dir()
        .ok()
        .and_then(|wd| {
            let abs = if path.is_absolute() {
                path.to_path_buf()
            } else {
                wd.join(path)
            };
            pathdiff::diff_paths(abs, wd)
        })
        .unwrap_or_else(|| path.to_path_buf());
    rel.to_string_lossy().to_string()
}
