//! Build the ConstraintTemplate and Constraint for one policy.
//!
//! Synthesis is a pure function of the policy, its resolved libraries and the
//! `GenerateConfig`. Rendering to YAML is the only fallible step.

use crate::config::GenerateConfig;
use crate::error::{Artifact, CreateError, Result};
use crate::matchers::get_matchers_from_comments;
use crate::models::constraint::{
    Constraint, ConstraintMatch, ConstraintSpec, CONSTRAINT_API_VERSION,
};
use crate::models::rego::RegoFile;
use crate::models::template::{
    ConstraintTemplate, Crd, CrdSpec, Metadata, Names, Target, TemplateSpec, ADMISSION_TARGET,
    TEMPLATE_API_VERSION, TEMPLATE_KIND,
};
use crate::rego::strip_comments;
use serde::Serialize;
use std::path::Path;

/// Template embedding the policy's comment-stripped Rego and its libraries.
///
/// `libraries` are embedded as given; they are stripped when loaded.
pub fn constraint_template(
    kind: &str,
    policy: &RegoFile,
    libraries: Vec<String>,
) -> ConstraintTemplate {
    ConstraintTemplate {
        api_version: TEMPLATE_API_VERSION.to_string(),
        kind: TEMPLATE_KIND.to_string(),
        metadata: Metadata {
            name: kind.to_lowercase(),
        },
        spec: TemplateSpec {
            crd: Crd {
                spec: CrdSpec {
                    names: Names {
                        kind: kind.to_string(),
                    },
                },
            },
            targets: vec![Target {
                target: ADMISSION_TARGET.to_string(),
                libs: libraries,
                rego: strip_comments(&policy.contents),
            }],
        },
    }
}

/// Constraint of kind `kind`, restricted by the policy's `@kinds` annotations.
pub fn constraint(kind: &str, policy: &RegoFile, config: &GenerateConfig) -> Constraint {
    let matchers = get_matchers_from_comments(&policy.comments);
    let matcher = if matchers.is_empty() {
        ConstraintMatch::Unrestricted
    } else {
        ConstraintMatch::Restricted {
            api_groups: matchers.api_groups(),
            kinds: matchers.kinds(),
        }
    };
    Constraint {
        api_version: CONSTRAINT_API_VERSION.to_string(),
        kind: kind.to_string(),
        metadata: Metadata {
            name: kind.to_lowercase(),
        },
        spec: ConstraintSpec {
            enforcement_action: config.enforcement,
            matcher,
        },
    }
}

/// Serialize a generated document to YAML.
pub fn render<T: Serialize>(doc: &T, document: Artifact, policy: &Path) -> Result<String> {
    serde_yaml::to_string(doc).map_err(|source| CreateError::Synthesis {
        document,
        policy: policy.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constraint::EnforcementAction;
    use serde_json::{json, Value as Json};
    use std::path::PathBuf;

    fn policy(comments: &[&str]) -> RegoFile {
        let mut contents = String::new();
        for c in comments {
            contents.push('#');
            contents.push_str(c);
            contents.push('\n');
        }
        contents.push_str("package pod_no_latest\n\nviolation[msg] {\n  msg := \"x\"\n}\n");
        RegoFile {
            path: PathBuf::from("policies/pod-no-latest/src.rego"),
            contents,
            package_name: "pod_no_latest".into(),
            import_packages: Vec::new(),
            comments: comments.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn to_json<T: Serialize>(doc: &T) -> Json {
        serde_json::to_value(doc).unwrap()
    }

    #[test]
    fn test_template_shape() {
        let p = policy(&[" @kinds core/Pod"]);
        let t = constraint_template("PodNoLatest", &p, vec!["package lib.core\n".into()]);
        let v = to_json(&t);
        assert_eq!(v["apiVersion"], "templates.gatekeeper.sh/v1beta1");
        assert_eq!(v["kind"], "ConstraintTemplate");
        assert_eq!(v["metadata"]["name"], "podnolatest");
        assert_eq!(v["spec"]["crd"]["spec"]["names"]["kind"], "PodNoLatest");
        let target = &v["spec"]["targets"][0];
        assert_eq!(target["target"], "admission.k8s.gatekeeper.sh");
        assert_eq!(target["libs"], json!(["package lib.core\n"]));
        let rego = target["rego"].as_str().unwrap();
        assert!(rego.starts_with("package pod_no_latest\n"));
        assert!(!rego.contains("@kinds"));
    }

    #[test]
    fn test_template_without_libraries_omits_libs() {
        let t = constraint_template("PodNoLatest", &policy(&[]), Vec::new());
        let v = to_json(&t);
        assert!(v["spec"]["targets"][0].get("libs").is_none());
    }

    #[test]
    fn test_constraint_without_matchers_or_dryrun_has_no_spec() {
        let c = constraint("PodNoLatest", &policy(&[" plain"]), &GenerateConfig::default());
        let v = to_json(&c);
        assert_eq!(v["apiVersion"], "constraints.gatekeeper.sh/v1beta1");
        assert_eq!(v["kind"], "PodNoLatest");
        assert_eq!(v["metadata"]["name"], "podnolatest");
        assert!(v.get("spec").is_none());
    }

    #[test]
    fn test_constraint_dryrun_without_matchers_has_no_match() {
        let cfg = GenerateConfig::new(None, true);
        let c = constraint("PodNoLatest", &policy(&[]), &cfg);
        assert_eq!(c.spec.enforcement_action, Some(EnforcementAction::Dryrun));
        let v = to_json(&c);
        assert_eq!(v["spec"], json!({"enforcementAction": "dryrun"}));
    }

    #[test]
    fn test_constraint_match_block_dedups_groups_only() {
        let p = policy(&[" @kinds apps/Deployment core/Pod apps/Deployment Namespace"]);
        let c = constraint("PodNoLatest", &p, &GenerateConfig::default());
        let v = to_json(&c);
        assert!(v["spec"].get("enforcementAction").is_none());
        assert_eq!(
            v["spec"]["match"]["kinds"],
            json!([{
                "apiGroups": ["apps", ""],
                "kinds": ["Deployment", "Pod", "Deployment", "Namespace"]
            }])
        );
    }

    #[test]
    fn test_render_yaml_is_stable() {
        let p = policy(&[" @kinds core/Pod"]);
        let cfg = GenerateConfig::new(None, true);
        let c = constraint("PodNoLatest", &p, &cfg);
        let first = render(&c, Artifact::Constraint, &p.path).unwrap();
        let second = render(&c, Artifact::Constraint, &p.path).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("apiVersion: constraints.gatekeeper.sh/v1beta1\n"));
        let parsed: Json = serde_yaml::from_str(&first).unwrap();
        assert_eq!(parsed, to_json(&c));
        assert_eq!(parsed["spec"]["match"]["kinds"][0]["apiGroups"], json!([""]));
    }
}
