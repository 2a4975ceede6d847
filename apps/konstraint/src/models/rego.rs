//! Parsed Rego source file.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One Rego file as seen by the generator.
///
/// Policies and libraries share this shape; a policy additionally declares a
/// `violation` rule. `import_packages` only lists `data.*` imports, with the
/// `data.` prefix removed so they compare directly against `package_name`.
pub struct RegoFile {
    pub path: PathBuf,
    pub contents: String,
    pub package_name: String,
    pub import_packages: Vec<String>,
    pub comments: Vec<String>,
}
