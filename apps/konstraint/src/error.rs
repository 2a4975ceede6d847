//! Error types for discovery, resolution, synthesis and writing.
//!
//! Every variant is fatal for the run. Variants keep the originating cause
//! as `#[source]` so the binary can print the full chain.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CreateError>;

/// Which generated document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Template,
    Constraint,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Template => f.write_str("template"),
            Artifact::Constraint => f.write_str("constraint"),
        }
    }
}

/// Errors raised while generating Gatekeeper resources.
#[derive(Debug, Error)]
pub enum CreateError {
    /// Walking the policy tree failed.
    #[error("walk path {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A discovered Rego file could not be read.
    #[error("read rego file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The policy's parent directory does not yield a usable kind name.
    #[error("cannot derive a kind from the directory of {}", path.display())]
    KindUnresolved { path: PathBuf },

    /// Fewer or more library bodies resolved than the policy imports.
    #[error("missing imported libraries for {} (imports={expected} resolved={found})", policy.display())]
    MissingLibraries {
        policy: PathBuf,
        expected: usize,
        found: usize,
    },

    /// A generated document failed to serialize.
    #[error("marshal {document} for {}", policy.display())]
    Synthesis {
        document: Artifact,
        policy: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The output directory could not be created.
    #[error("create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a generated document failed.
    #[error("writing {artifact} {}", path.display())]
    Write {
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading `konstraint.toml|yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown report mode '{0}' (expected human|json)")]
    ReportMode(String),
}
