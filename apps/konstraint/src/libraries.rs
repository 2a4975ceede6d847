//! Shared library discovery and import resolution.
//!
//! Libraries live under the first directory named `lib`, `libs`, `util` or
//! `utils` found while walking the policy root in file-name order. Any later
//! directory with one of those names is ignored. Library contents are
//! comment-stripped once at load time so every embedded copy is clean.

use crate::error::{CreateError, Result};
use crate::models::rego::RegoFile;
use crate::rego;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names that mark the library root.
pub const LIBRARY_FOLDER_NAMES: [&str; 4] = ["lib", "libs", "util", "utils"];

/// Locate the library root under `root`, skipping `.git`.
pub fn get_library_path(root: &Path) -> Result<Option<PathBuf>> {
    let mut found: Option<PathBuf> = None;
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
        if !entry.file_type().is_dir() {
            continue;
        }
        let is_library_dir = entry
            .file_name()
            .to_str()
            .is_some_and(|n| LIBRARY_FOLDER_NAMES.contains(&n));
        if !is_library_dir {
            continue;
        }
        if let Some(first) = found.as_ref() {
            debug!(
                "ignoring library folder {} (using {})",
                entry.path().display(),
                first.display()
            );
        } else {
            found = Some(entry.path().to_path_buf());
        }
    }
    Ok(found)
}

/// Load every library under the library root with comments stripped.
///
/// A tree without a library folder has no libraries.
pub fn get_libraries(root: &Path) -> Result<Vec<RegoFile>> {
    let Some(library_path) = get_library_path(root)? else {
        debug!("no library folder under {}", root.display());
        return Ok(Vec::new());
    };
    let mut libraries = rego::get_files(&library_path)?;
    for library in &mut libraries {
        library.contents = rego::strip_comments(&library.contents);
    }
    debug!(
        "loaded {} libraries from {}",
        libraries.len(),
        library_path.display()
    );
    Ok(libraries)
}

/// Library bodies whose package matches one of `policy`'s imports, in import order.
pub fn get_matching_libraries(policy: &RegoFile, libraries: &[RegoFile]) -> Vec<String> {
    let mut libs = Vec::new();
    for import in &policy.import_packages {
        for library in libraries {
            if &library.package_name == import {
                libs.push(library.contents.clone());
            }
        }
    }
    libs
}

/// Resolve `policy`'s imports, failing unless each import produced exactly one body.
pub fn resolve_libraries(policy: &RegoFile, libraries: &[RegoFile]) -> Result<Vec<String>> {
    let libs = get_matching_libraries(policy, libraries);
    if libs.len() != policy.import_packages.len() {
        return Err(CreateError::MissingLibraries {
            policy: policy.path.clone(),
            expected: policy.import_packages.len(),
            found: libs.len(),
        });
    }
    Ok(libs)
}
