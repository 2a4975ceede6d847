//! Constraint schema (`constraints.gatekeeper.sh/v1beta1`).
//!
//! The constraint's kind is the policy's derived Kind, so only the API
//! version is fixed here. `spec` is left out of the document when it carries
//! neither an enforcement action nor a match block.

use super::template::Metadata;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

pub const CONSTRAINT_API_VERSION: &str = "constraints.gatekeeper.sh/v1beta1";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Root constraint document.
pub struct Constraint {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "ConstraintSpec::is_empty")]
    pub spec: ConstraintSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforcement_action: Option<EnforcementAction>,
    #[serde(rename = "match", skip_serializing_if = "ConstraintMatch::is_unrestricted")]
    pub matcher: ConstraintMatch,
}

impl ConstraintSpec {
    pub fn is_empty(&self) -> bool {
        self.enforcement_action.is_none() && self.matcher.is_unrestricted()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Gatekeeper enforcement action override.
pub enum EnforcementAction {
    Dryrun,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Which resources a constraint applies to.
///
/// `Unrestricted` means no match block at all, which Gatekeeper reads as
/// "every resource". `Restricted` renders as a single `match.kinds` entry.
pub enum ConstraintMatch {
    #[default]
    Unrestricted,
    Restricted {
        api_groups: Vec<String>,
        kinds: Vec<String>,
    },
}

impl ConstraintMatch {
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, ConstraintMatch::Unrestricted)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KindsEntry<'a> {
    api_groups: &'a [String],
    kinds: &'a [String],
}

impl Serialize for ConstraintMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConstraintMatch::Unrestricted => serializer.serialize_map(Some(0))?.end(),
            ConstraintMatch::Restricted { api_groups, kinds } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("kinds", &[KindsEntry { api_groups, kinds }])?;
                map.end()
            }
        }
    }
}
