//! ConstraintTemplate schema (`templates.gatekeeper.sh/v1beta1`).

use serde::Serialize;

pub const TEMPLATE_API_VERSION: &str = "templates.gatekeeper.sh/v1beta1";
pub const TEMPLATE_KIND: &str = "ConstraintTemplate";
/// Gatekeeper admission target every template is registered under.
pub const ADMISSION_TARGET: &str = "admission.k8s.gatekeeper.sh";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Root template document.
pub struct ConstraintTemplate {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: TemplateSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSpec {
    pub crd: Crd,
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crd {
    pub spec: CrdSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrdSpec {
    pub names: Names,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Names {
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Rego payload for one admission target.
pub struct Target {
    pub target: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub libs: Vec<String>,
    pub rego: String,
}
