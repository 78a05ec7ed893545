//! Output Rendering
//!
//! Text and NDJSON renderers for run reports, check results, diffs and the
//! service listing. Renderers write to any `Write` so they can be tested
//! against a buffer.

use std::io::{self, Write};

use serde_json::{json, Value};

use crate::application::{ChangeType, CheckResult, CheckStatus, DiffResult};
use crate::domain::entities::{RowOutcome, RowResult, RunReport};
use crate::domain::services::ServiceCatalog;
use crate::domain::value_objects::ServiceId;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

const CHECK: &str = "✓";
const CROSS: &str = "✗";
const WRITE: &str = "→";
const SKIP: &str = "○";

/// Write a single NDJSON event
pub fn write_event(out: &mut impl Write, event: &Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")
}

fn row_event(result: &RowResult) -> Value {
    let mut event = json!({ "event": "row" });
    if let (Value::Object(map), Ok(Value::Object(fields))) =
        (&mut event, serde_json::to_value(result))
    {
        map.extend(fields);
    }
    event
}

/// Render the report of a generate run
pub fn render_run_report(
    out: &mut impl Write,
    report: &RunReport,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            for result in &report.results {
                write_event(out, &row_event(result))?;
            }
            write_event(
                out,
                &json!({
                    "event": "complete",
                    "succeeded": report.succeeded(),
                    "failed": report.failed(),
                    "interrupted": report.interrupted,
                }),
            )
        }
        OutputFormat::Text => {
            for result in &report.results {
                match &result.outcome {
                    RowOutcome::Success { locator, .. } => {
                        writeln!(out, "  {} {} {} {}", CHECK, result.task_id, WRITE, locator)?
                    }
                    RowOutcome::Failure { kind, message } => writeln!(
                        out,
                        "  {} {} (row {}): {}: {}",
                        CROSS, result.task_id, result.row, kind, message
                    )?,
                }
            }
            writeln!(out)?;
            let icon = if report.is_success() { CHECK } else { CROSS };
            write!(
                out,
                "{} {} succeeded, {} failed",
                icon,
                report.succeeded(),
                report.failed()
            )?;
            if report.interrupted {
                write!(out, " (interrupted)")?;
            }
            writeln!(out)
        }
    }
}

/// Render a preflight check
pub fn render_check(
    out: &mut impl Write,
    result: &CheckResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            for item in &result.items {
                let mut event = json!({ "event": "check" });
                if let (Value::Object(map), Ok(Value::Object(fields))) =
                    (&mut event, serde_json::to_value(item))
                {
                    map.extend(fields);
                }
                write_event(out, &event)?;
            }
            write_event(
                out,
                &json!({
                    "event": "complete",
                    "passed": result.passed,
                    "errors": result.errors,
                    "missing_payloads": result.missing_payloads,
                }),
            )
        }
        OutputFormat::Text => {
            for item in &result.items {
                match &item.status {
                    CheckStatus::Pass {
                        services,
                        fields_used,
                    } => {
                        let names: Vec<&str> = services.iter().map(ServiceId::as_str).collect();
                        write!(out, "  {} {}: {}", CHECK, item.task_id, names.join(", "))?;
                        if !fields_used.is_empty() {
                            write!(out, " [{}]", fields_used.join(", "))?;
                        }
                        writeln!(out)?;
                    }
                    CheckStatus::Error { kind, message } => writeln!(
                        out,
                        "  {} {} (row {}): {}: {}",
                        CROSS, item.task_id, item.row, kind, message
                    )?,
                }
            }
            if !result.missing_payloads.is_empty() {
                let names: Vec<&str> = result
                    .missing_payloads
                    .iter()
                    .map(ServiceId::as_str)
                    .collect();
                writeln!(out)?;
                writeln!(out, "  [!] no porting code for: {}", names.join(", "))?;
            }
            writeln!(out)?;
            let icon = if result.is_success() { CHECK } else { CROSS };
            writeln!(
                out,
                "{} {} passed, {} errors",
                icon, result.passed, result.errors
            )
        }
    }
}

/// Render a diff preview
pub fn render_diff(out: &mut impl Write, result: &DiffResult, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            for entry in &result.entries {
                let mut event = json!({
                    "event": "diff",
                    "row": entry.row,
                    "task_id": entry.task_id,
                    "artifact_name": entry.artifact_name,
                    "change": entry.change_type,
                });
                if let Some((kind, message)) = &entry.failure {
                    event["kind"] = json!(kind);
                    event["message"] = json!(message);
                }
                write_event(out, &event)?;
            }
            write_event(
                out,
                &json!({
                    "event": "complete",
                    "create": result.creates(),
                    "update": result.updates(),
                    "unchanged": result.unchanged(),
                    "failed": result.failures(),
                }),
            )
        }
        OutputFormat::Text => {
            for entry in &result.entries {
                match entry.change_type {
                    ChangeType::Create => writeln!(out, "  + {} (new)", entry.artifact_name)?,
                    ChangeType::Update => {
                        writeln!(out, "  ~ {}", entry.artifact_name)?;
                        if let Some(patch) = &entry.patch {
                            for line in patch.lines() {
                                writeln!(out, "      {}", line)?;
                            }
                        }
                    }
                    ChangeType::Unchanged => writeln!(out, "  {} {}", SKIP, entry.artifact_name)?,
                    ChangeType::Failed => {
                        let (kind, message) = entry
                            .failure
                            .as_ref()
                            .map(|(k, m)| (k.as_str(), m.as_str()))
                            .unwrap_or(("Error", ""));
                        writeln!(out, "  {} {}: {}: {}", CROSS, entry.task_id, kind, message)?
                    }
                }
            }
            writeln!(out)?;
            writeln!(
                out,
                "{} to create, {} to update, {} unchanged, {} failed",
                result.creates(),
                result.updates(),
                result.unchanged(),
                result.failures()
            )
        }
    }
}

/// Render the service catalog
pub fn render_services(
    out: &mut impl Write,
    catalog: &ServiceCatalog,
    format: OutputFormat,
) -> io::Result<()> {
    for spec in catalog.specs() {
        let requires: Vec<&str> = spec.requires.iter().map(ServiceId::as_str).collect();
        let synonyms = catalog.synonyms_of(spec.id);
        match format {
            OutputFormat::Json => write_event(
                out,
                &json!({
                    "event": "service",
                    "id": spec.id,
                    "package": spec.package,
                    "requires": requires,
                    "default_db": spec.default_db,
                    "required_inputs": spec.required_inputs,
                    "synonyms": synonyms,
                }),
            )?,
            OutputFormat::Text => {
                writeln!(out, "{} ({})", spec.id, spec.package)?;
                writeln!(out, "  synonyms: {}", synonyms.join(", "))?;
                if !requires.is_empty() {
                    writeln!(out, "  requires: {}", requires.join(", "))?;
                }
                if !spec.required_inputs.is_empty() {
                    writeln!(out, "  inputs:   {}", spec.required_inputs.join(", "))?;
                }
                writeln!(out, "  default:  {}", spec.default_db)?;
            }
        }
    }
    Ok(())
}
