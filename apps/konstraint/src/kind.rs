//! Derive a Gatekeeper kind name from a policy's directory.

use std::path::Path;

/// Build the kind from the name of `path`'s parent directory.
///
/// The name is split on every character outside `[A-Za-z0-9]`, each piece
/// gets an uppercase first letter (the rest is left as written) and the
/// pieces are joined: `container-deny-latest-tag` becomes
/// `ContainerDenyLatestTag`. Non-ASCII letters count as separators.
///
/// Returns `None` when the parent has no name or the result does not start
/// with an ASCII letter.
///
/// Sibling trees using the same directory name produce the same kind.
pub fn kind_from_path(path: &Path) -> Option<String> {
    let dir = path.parent()?.file_name()?.to_str()?;
    let kind: String = dir
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(capitalize)
        .collect();
    if kind.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Some(kind)
    } else {
        None
    }
}

fn capitalize(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
