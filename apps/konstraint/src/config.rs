//! Configuration discovery and effective settings resolution.
//!
//! Konstraint reads `konstraint.toml|yaml|yml` from the policy root (or the
//! closest ancestor holding one, stopping at a `.git` boundary) and merges it
//! with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: unset (documents are written next to each policy)
//! - `dryrun`: false
//! - `report`: `human`
//!
//! Overrides precedence: CLI > config file > defaults. A relative `output`
//! from the config file is resolved against the file's directory.

use crate::error::ConfigError;
use crate::models::constraint::EnforcementAction;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILES: [&str; 3] = ["konstraint.toml", "konstraint.yaml", "konstraint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `konstraint.toml|yaml`.
pub struct KonstraintConfig {
    pub output: Option<String>,
    pub dryrun: Option<bool>,
    pub report: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// How the run summary is printed.
pub enum ReportMode {
    #[default]
    Human,
    Json,
}

impl FromStr for ReportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(ReportMode::Human),
            "json" => Ok(ReportMode::Json),
            other => Err(ConfigError::ReportMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Settings every synthesis and write step reads.
///
/// `output_dir` selects flat mode; `None` writes next to each policy.
pub struct GenerateConfig {
    pub output_dir: Option<PathBuf>,
    pub enforcement: Option<EnforcementAction>,
}

impl GenerateConfig {
    pub fn new(output_dir: Option<PathBuf>, dryrun: bool) -> Self {
        GenerateConfig {
            output_dir,
            enforcement: dryrun.then_some(EnforcementAction::Dryrun),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub dryrun: bool,
    pub report: ReportMode,
}

impl Effective {
    pub fn generate_config(&self) -> GenerateConfig {
        GenerateConfig::new(self.output_dir.clone(), self.dryrun)
    }
}

/// Walk upward from `start` looking for a config file.
///
/// The search stops at the first directory containing `.git`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = Some(start);
    while let Some(dir) = cur {
        for name in CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if dir.join(".git").exists() {
            return None;
        }
        cur = dir.parent();
    }
    None
}

/// Load `KonstraintConfig` from a TOML or YAML file.
pub fn load_config(path: &Path) -> Result<KonstraintConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    if is_toml {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_path: Option<&str>,
    cli_output: Option<&str>,
    cli_dryrun: Option<bool>,
    cli_report: Option<&str>,
) -> Result<Effective, ConfigError> {
    let root = PathBuf::from(cli_path.unwrap_or("."));
    let config_path = find_config(&root);
    let cfg = match config_path.as_deref() {
        Some(p) => load_config(p)?,
        None => KonstraintConfig::default(),
    };
    let config_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.clone());

    let output_dir = match cli_output {
        Some(o) => Some(PathBuf::from(o)),
        None => cfg.output.as_ref().map(|o| config_dir.join(o)),
    };
    let dryrun = cli_dryrun.or(cfg.dryrun).unwrap_or(false);
    let report = match cli_report.map(str::to_string).or(cfg.report) {
        Some(r) => r.parse()?,
        None => ReportMode::default(),
    };

    Ok(Effective {
        root,
        config_path,
        output_dir,
        dryrun,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, None).unwrap();
        assert!(eff.config_path.is_none());
        assert!(eff.output_dir.is_none());
        assert!(!eff.dryrun);
        assert_eq!(eff.report, ReportMode::Human);
        assert_eq!(eff.generate_config(), GenerateConfig::default());
    }

    #[test]
    fn test_load_toml_resolves_output_against_config_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("konstraint.toml"),
            "output = \"generated\"\ndryrun = true\nreport = \"json\"\n",
        )
        .unwrap();
        let eff = resolve_effective(root.to_str(), None, None, None).unwrap();
        assert_eq!(eff.output_dir, Some(root.join("generated")));
        assert!(eff.dryrun);
        assert_eq!(eff.report, ReportMode::Json);
        assert_eq!(
            eff.generate_config().enforcement,
            Some(EnforcementAction::Dryrun)
        );
    }

    #[test]
    fn test_yaml_config_found_in_ancestor() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("policies/pod")).unwrap();
        fs::write(root.join("konstraint.yaml"), "dryrun: true\n").unwrap();
        let start = root.join("policies");
        let eff = resolve_effective(start.to_str(), None, None, None).unwrap();
        assert_eq!(eff.config_path, Some(root.join("konstraint.yaml")));
        assert!(eff.dryrun);
    }

    #[test]
    fn test_git_boundary_stops_search() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("konstraint.toml"), "dryrun = true\n").unwrap();
        fs::create_dir_all(root.join("repo/.git")).unwrap();
        let eff = resolve_effective(root.join("repo").to_str(), None, None, None).unwrap();
        assert!(eff.config_path.is_none());
        assert!(!eff.dryrun);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("konstraint.toml"),
            "output = \"generated\"\ndryrun = true\n",
        )
        .unwrap();
        let eff =
            resolve_effective(root.to_str(), Some("elsewhere"), Some(false), Some("json")).unwrap();
        assert_eq!(eff.output_dir, Some(PathBuf::from("elsewhere")));
        assert!(!eff.dryrun);
        assert_eq!(eff.report, ReportMode::Json);
    }

    #[test]
    fn test_invalid_report_mode_is_rejected() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let err = resolve_effective(dir.path().to_str(), None, None, Some("xml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReportMode(ref m) if m == "xml"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("konstraint.toml"), "dryrun = [").unwrap();
        let err = resolve_effective(dir.path().to_str(), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }
}
