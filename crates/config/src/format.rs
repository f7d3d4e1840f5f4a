use serde_json::json;

use crate::debug::DebugOutput;
use crate::explain::ExplainResult;
use crate::lint::LintFinding;

/// Human-readable rendering of `config debug`, with stable section
/// headers so output stays greppable.
pub fn debug_human(debug: &DebugOutput) -> String {
    let mut out = String::new();
    out.push_str("Config files:\n");
    for entry in &debug.config_files {
        out.push_str(&format!("  {:<8} {} ({})\n", entry.label, entry.path.display(), if entry.found { "found" } else { "not found" }));
    }
    out.push_str(&format!("\nActive profile: {}\n", debug.active_profile));
    if let Some(chain) = &debug.inherit_chain {
        out.push_str(&format!("Inherit chain: {}\n", chain.join(" -> ")));
    }
    out.push_str("\nEnvironment variables:\n");
    for var in &debug.env_vars {
        out.push_str(&format!("  {} ({})\n", var.name, if var.applied { "applied" } else { "ignored" }));
    }
    out.push_str("\nResolved Configuration:\n");
    for field in &debug.fields {
        out.push_str(&format!("  {} = {} [{}]\n", field.key, field.value, field.source));
    }
    out
}

pub fn debug_json(debug: &DebugOutput) -> String {
    let value = json!({
        "config_files": debug.config_files.iter().map(|e| json!({
            "label": e.label,
            "path": e.path.display().to_string(),
            "found": e.found,
        })).collect::<Vec<_>>(),
        "active_profile": debug.active_profile,
        "env_vars": debug.env_vars.iter().map(|e| json!({
            "name": e.name,
            "applied": e.applied,
        })).collect::<Vec<_>>(),
        "config": debug.fields.iter().map(|f| json!({
            "key": f.key,
            "value": f.value,
            "source": f.source,
        })).collect::<Vec<_>>(),
        "inherit_chain": debug.inherit_chain,
    });
    serde_json::to_string_pretty(&value).expect("debug output is always serializable")
}

pub fn explain_human(result: &ExplainResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Path: {}\n", result.path));
    out.push_str(&format!("Profile: {}\n", result.profile_name));
    out.push_str(&format!("Included: {}\n", result.included));
    out.push_str(&format!("Tier: {}\n", result.tier));
    if let Some(excluded_by) = &result.excluded_by {
        out.push_str(&format!("Excluded by: {excluded_by}\n"));
    }
    out.push_str("\nRule trace:\n");
    for step in &result.trace {
        out.push_str(&format!("  {}. {} -> {}\n", step.step, step.rule, step.outcome));
    }
    out
}

pub fn explain_json(result: &ExplainResult) -> String {
    let value = json!({
        "path": result.path,
        "profile": result.profile_name,
        "extends": result.extends_parent,
        "included": result.included,
        "tier": result.tier,
        "matched_tier_pattern": result.matched_tier_pattern,
        "excluded_by": result.excluded_by,
        "redaction_on": result.redaction_on,
        "is_priority": result.is_priority,
        "compression_hint": result.compression_hint,
        "trace": result.trace.iter().map(|t| json!({
            "step": t.step,
            "rule": t.rule,
            "outcome": t.outcome,
            "matched": t.matched,
        })).collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&value).expect("explain result is always serializable")
}

pub fn lint_human(findings: &[LintFinding]) -> String {
    if findings.is_empty() {
        return "No issues found.\n".to_string();
    }
    let mut out = String::new();
    for finding in findings {
        out.push_str(&format!("[{:?}] {}: {}\n", finding.severity, finding.field, finding.message));
        if let Some(fix) = &finding.suggested_fix {
            out.push_str(&format!("  suggestion: {fix}\n"));
        }
    }
    out
}

pub fn lint_json(findings: &[LintFinding]) -> String {
    let value: Vec<_> = findings
        .iter()
        .map(|f| {
            json!({
                "severity": f.severity,
                "field": f.field,
                "message": f.message,
                "suggested_fix": f.suggested_fix,
            })
        })
        .collect();
    serde_json::to_string_pretty(&value).expect("lint findings are always serializable")
}
