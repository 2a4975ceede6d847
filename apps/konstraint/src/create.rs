//! Generation driver for `konstraint create`.
//!
//! Discovers policies and libraries under a root, plans both documents for
//! every policy, and only then writes them. A failure anywhere in planning
//! leaves the file system untouched; a write failure stops the run at the
//! failing artifact.
//!
//! Output placement:
//! - co-located (no output dir): `template.yaml` and `constraint.yaml` next
//!   to the policy, so one policy per directory.
//! - flat (output dir): `template_<Kind>.yaml` and `constraint_<Kind>.yaml`
//!   in the shared directory. Policies deriving the same Kind overwrite each
//!   other; the later one in discovery order wins.

use crate::config::GenerateConfig;
use crate::error::{Artifact, CreateError, Result};
use crate::kind::kind_from_path;
use crate::libraries;
use crate::models::rego::RegoFile;
use crate::rego;
use crate::synth;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the rule that marks a Rego file as a policy.
pub const VIOLATION_RULE: &str = "violation";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Files written for one policy.
pub struct GeneratedPolicy {
    pub policy: PathBuf,
    pub kind: String,
    pub template: PathBuf,
    pub constraint: PathBuf,
}

struct PlannedPolicy {
    generated: GeneratedPolicy,
    output_dir: PathBuf,
    template_yaml: String,
    constraint_yaml: String,
}

/// Output directory and file names for a policy under `config`.
pub fn output_location(
    policy_path: &Path,
    kind: &str,
    config: &GenerateConfig,
) -> (PathBuf, String, String) {
    match config.output_dir.as_ref() {
        Some(dir) => (
            dir.clone(),
            format!("template_{}.yaml", kind),
            format!("constraint_{}.yaml", kind),
        ),
        None => (
            policy_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            "template.yaml".to_string(),
            "constraint.yaml".to_string(),
        ),
    }
}

fn plan_policy(
    policy: &RegoFile,
    libraries: &[RegoFile],
    config: &GenerateConfig,
) -> Result<PlannedPolicy> {
    let kind = kind_from_path(&policy.path).ok_or_else(|| CreateError::KindUnresolved {
        path: policy.path.clone(),
    })?;
    let libs = libraries::resolve_libraries(policy, libraries)?;
    debug!(
        "{}: kind={} libraries={}",
        policy.path.display(),
        kind,
        libs.len()
    );

    let template = synth::constraint_template(&kind, policy, libs);
    let template_yaml = synth::render(&template, Artifact::Template, &policy.path)?;
    let constraint = synth::constraint(&kind, policy, config);
    let constraint_yaml = synth::render(&constraint, Artifact::Constraint, &policy.path)?;

    let (output_dir, template_name, constraint_name) =
        output_location(&policy.path, &kind, config);
    Ok(PlannedPolicy {
        generated: GeneratedPolicy {
            policy: policy.path.clone(),
            template: output_dir.join(template_name),
            constraint: output_dir.join(constraint_name),
            kind,
        },
        output_dir,
        template_yaml,
        constraint_yaml,
    })
}

fn write_policy(planned: &PlannedPolicy) -> Result<()> {
    if !planned.output_dir.as_os_str().is_empty() && !planned.output_dir.exists() {
        fs::create_dir_all(&planned.output_dir).map_err(|source| CreateError::CreateDir {
            path: planned.output_dir.clone(),
            source,
        })?;
    }
    let generated = &planned.generated;
    fs::write(&generated.template, &planned.template_yaml).map_err(|source| {
        CreateError::Write {
            artifact: Artifact::Template,
            path: generated.template.clone(),
            source,
        }
    })?;
    fs::write(&generated.constraint, &planned.constraint_yaml).map_err(|source| {
        CreateError::Write {
            artifact: Artifact::Constraint,
            path: generated.constraint.clone(),
            source,
        }
    })?;
    info!(
        "generated {} from {}",
        generated.kind,
        generated.policy.display()
    );
    Ok(())
}

/// Generate a template and constraint for every policy under `root`.
pub fn run_create(root: &Path, config: &GenerateConfig) -> Result<Vec<GeneratedPolicy>> {
    let policies = rego::get_files_with_rule(root, VIOLATION_RULE)?;
    let libraries = libraries::get_libraries(root)?;
    debug!(
        "{} policies, {} libraries under {}",
        policies.len(),
        libraries.len(),
        root.display()
    );

    let planned = policies
        .iter()
        .map(|p| plan_policy(p, &libraries, config))
        .collect::<Result<Vec<_>>>()?;

    let mut seen: HashSet<&Path> = HashSet::new();
    for p in &planned {
        if !seen.insert(p.generated.template.as_path()) {
            warn!(
                "{} overwrites output of an earlier policy at {}",
                p.generated.policy.display(),
                p.generated.template.display()
            );
        }
    }

    for p in &planned {
        write_policy(p)?;
    }
    Ok(planned.into_iter().map(|p| p.generated).collect())
}
