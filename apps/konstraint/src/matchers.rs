//! Kind matchers parsed from `@kinds` annotation comments.
//!
//! A policy restricts the resources its constraint applies to with one or
//! more comment lines such as:
//!
//! ```text
//! # @kinds apps/Deployment core/Pod
//! # @kinds Namespace
//! ```
//!
//! Each token is `<apiGroup>/<kind>`, or a bare `<kind>` which implies the
//! core group. The group is split off at the first `/`. Tokens with an empty
//! group or kind are skipped, as are all non-annotation comment lines.

/// Annotation that introduces a list of kind matchers.
pub const KINDS_MARKER: &str = "@kinds";
/// Sentinel group name for the core (empty) API group.
pub const CORE_GROUP: &str = "core";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMatcher {
    pub api_group: String,
    pub kind: String,
}

impl KindMatcher {
    fn parse(token: &str) -> Option<Self> {
        let (api_group, kind) = match token.split_once('/') {
            Some((group, kind)) => (group, kind),
            None => (CORE_GROUP, token),
        };
        if api_group.is_empty() || kind.is_empty() {
            return None;
        }
        Some(KindMatcher {
            api_group: api_group.to_string(),
            kind: kind.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Matchers in encounter order. Empty means "no restriction".
pub struct Matchers {
    pub kind_matchers: Vec<KindMatcher>,
}

impl Matchers {
    pub fn is_empty(&self) -> bool {
        self.kind_matchers.is_empty()
    }

    /// Distinct API groups in first-seen order, with `core` rendered as `""`.
    pub fn api_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for m in &self.kind_matchers {
            let group = if m.api_group == CORE_GROUP {
                ""
            } else {
                m.api_group.as_str()
            };
            if !groups.iter().any(|g| g == group) {
                groups.push(group.to_string());
            }
        }
        groups
    }

    /// Every kind in first-seen order; duplicates are kept.
    pub fn kinds(&self) -> Vec<String> {
        self.kind_matchers.iter().map(|m| m.kind.clone()).collect()
    }
}

/// Collect kind matchers from a policy's comment lines.
pub fn get_matchers_from_comments(comments: &[String]) -> Matchers {
    let mut kind_matchers = Vec::new();
    for comment in comments {
        let mut tokens = comment.split_whitespace();
        if tokens.next() != Some(KINDS_MARKER) {
            continue;
        }
        kind_matchers.extend(tokens.filter_map(KindMatcher::parse));
    }
    Matchers { kind_matchers }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn km(group: &str, kind: &str) -> KindMatcher {
        KindMatcher {
            api_group: group.into(),
            kind: kind.into(),
        }
    }

    #[test]
    fn test_no_markers_yields_empty_set() {
        let m = get_matchers_from_comments(&comments(&[" @title Something", " plain note"]));
        assert!(m.is_empty());
        assert!(m.api_groups().is_empty());
        assert!(m.kinds().is_empty());
    }

    #[test]
    fn test_group_and_bare_kind_forms() {
        let m = get_matchers_from_comments(&comments(&[" @kinds apps/Deployment Pod"]));
        assert_eq!(
            m.kind_matchers,
            vec![km("apps", "Deployment"), km("core", "Pod")]
        );
    }

    #[test]
    fn test_multiple_marker_lines_accumulate_in_order() {
        let m = get_matchers_from_comments(&comments(&[
            " @kinds core/Pod",
            " description in between",
            "@kinds   apps/StatefulSet\tapps/DaemonSet",
        ]));
        assert_eq!(m.kinds(), vec!["Pod", "StatefulSet", "DaemonSet"]);
    }

    #[test]
    fn test_marker_must_lead_the_comment() {
        let m = get_matchers_from_comments(&comments(&[" see @kinds apps/Deployment"]));
        assert!(m.is_empty());
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        let m = get_matchers_from_comments(&comments(&[" @kinds apps/ /Pod core/Pod"]));
        assert_eq!(m.kind_matchers, vec![km("core", "Pod")]);
    }

    #[test]
    fn test_api_groups_dedup_first_seen_and_core_rewrite() {
        let m = get_matchers_from_comments(&comments(&[
            " @kinds apps/Deployment core/Pod apps/StatefulSet Service networking.k8s.io/Ingress",
        ]));
        assert_eq!(m.api_groups(), vec!["apps", "", "networking.k8s.io"]);
        assert_eq!(
            m.kinds(),
            vec!["Deployment", "Pod", "StatefulSet", "Service", "Ingress"]
        );
    }

    #[test]
    fn test_duplicate_kinds_are_preserved() {
        let m = get_matchers_from_comments(&comments(&[" @kinds core/Pod core/Pod"]));
        assert_eq!(m.api_groups(), vec![""]);
        assert_eq!(m.kinds(), vec!["Pod", "Pod"]);
    }
}
