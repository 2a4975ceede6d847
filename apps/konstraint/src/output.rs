//! Run report rendering for `konstraint create`.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-policy fields and a top-level summary.

use crate::config::ReportMode;
use crate::create::GeneratedPolicy;
use crate::utils::{rel_to_wd, use_colors};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print the generated files in the requested mode.
pub fn print_report(generated: &[GeneratedPolicy], report: ReportMode) {
    match report {
        ReportMode::Json => {
            let out = compose_report_json(generated);
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
            }
        }
        ReportMode::Human => {
            let color = use_colors();
            for g in generated {
                for path in [&g.template, &g.constraint] {
                    let path = rel_to_wd(path);
                    if color {
                        println!("{} {} ({})", "generated:".green().bold(), path.bold(), g.kind);
                    } else {
                        println!("generated: {} ({})", path, g.kind);
                    }
                }
            }
            let summary = format!(
                "— Summary — policies={} files={}",
                generated.len(),
                generated.len() * 2
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the JSON report (pure) for testing purposes.
pub fn compose_report_json(generated: &[GeneratedPolicy]) -> JsonVal {
    let items: Vec<_> = generated
        .iter()
        .map(|g| {
            json!({
                "policy": g.policy.to_string_lossy(),
                "kind": g.kind,
                "template": g.template.to_string_lossy(),
                "constraint": g.constraint.to_string_lossy(),
            })
        })
        .collect();
    let summary = json!({
        "policies": generated.len(),
        "files": generated.len() * 2,
    });
    json!({"results": items, "summary": summary})
}
