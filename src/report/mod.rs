//! Printable report rendering
//!
//! Turns one inspection record into a Markdown document via an embedded
//! tera template. The record is the sole input; nothing else feeds reports.

use rust_embed::Embed;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::entities::record::InspectionRecord;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const REPORT_TEMPLATE: &str = "inspection_report.md.tera";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("embedded template missing: {0}")]
    MissingTemplate(&'static str),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Rendering options
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Inline photos and the signature as data URIs (large output)
    pub include_photos: bool,

    /// Company line shown next to the supervisor, when known
    pub company: Option<String>,
}

#[derive(Serialize)]
struct ReportDeviation {
    question_text: String,
    description: String,
    severity: String,
    action_taken: String,
    recorded_at: String,
    photo: String,
}

/// Render a record as printable Markdown
pub fn render_markdown(
    record: &InspectionRecord,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    let raw = EmbeddedTemplates::get(REPORT_TEMPLATE)
        .ok_or(ReportError::MissingTemplate(REPORT_TEMPLATE))?;
    let template = std::str::from_utf8(&raw.data)
        .map_err(|_| ReportError::MissingTemplate(REPORT_TEMPLATE))?;

    let mut tera = Tera::default();
    tera.add_raw_template(REPORT_TEMPLATE, template)?;

    let deviations: Vec<ReportDeviation> = record
        .deviations
        .iter()
        .map(|d| ReportDeviation {
            question_text: d.question_text.clone(),
            description: d.description.clone(),
            severity: d.severity.to_string(),
            action_taken: d.action_taken.to_string(),
            recorded_at: d.recorded_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            photo: if options.include_photos {
                data_uri(&d.photo)
            } else {
                String::new()
            },
        })
        .collect();

    let mut context = Context::new();
    context.insert("record_id", &record.id.to_string());
    context.insert("date", &record.date.format("%Y-%m-%d %H:%M UTC").to_string());
    context.insert("site_name", &record.site_name);
    context.insert("front_name", &record.front_name);
    context.insert("supervisor_name", &record.supervisor_name);
    context.insert("company", &options.company.clone().unwrap_or_default());
    context.insert("status", &record.status_result.to_string());
    context.insert("questions_checked", &record.questions_checked);
    context.insert("deviation_count", &record.deviations.len());
    context.insert("compliance", &record.compliance());
    context.insert("deviations", &deviations);
    context.insert(
        "signature",
        &if options.include_photos {
            data_uri(&record.signature)
        } else {
            String::new()
        },
    );

    Ok(tera.render(REPORT_TEMPLATE, &context)?)
}

/// Wrap a base64 payload as a data URI, sniffing the image type from its
/// base64 prefix
fn data_uri(b64: &str) -> String {
    let mime = if b64.starts_with("iVBORw0KGgo") {
        "image/png"
    } else if b64.starts_with("/9j/") {
        "image/jpeg"
    } else if b64.starts_with("R0lGOD") {
        "image/gif"
    } else {
        "application/octet-stream"
    };
    format!("data:{};base64,{}", mime, b64)
}
