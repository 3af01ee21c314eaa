//! HTML report rendering.
//!
//! The provider's Markdown reply is converted to HTML and inserted into a
//! fixed slot of the report template. Error sentences are plain prose, not
//! Markdown; they take the newline-to-`<br>` fallback layout instead and
//! land in the same slot inside an error panel.

use askama::Template;
use chrono::{DateTime, Utc};

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    query: String,
    generated_at: String,
    body: String,
    failed: bool,
}

impl ReportTemplate {
    /// Report for a successful search; `content` is the provider's reply.
    pub fn deals(content: &str, query: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            query: query.to_owned(),
            generated_at: format_timestamp(generated_at),
            body: markdown_to_html(content),
            failed: false,
        }
    }

    /// Report shell around a failed search. The page always comes back as a
    /// complete document; only the panel styling marks the failure.
    pub fn failure(message: &str, query: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            query: query.to_owned(),
            generated_at: format_timestamp(generated_at),
            body: newline_fallback(&format!("Error: {message}")),
            failed: true,
        }
    }
}

pub fn markdown_to_html(content: &str) -> String {
    markdown::to_html(content)
}

/// Plain-text layout fallback for bodies that are not Markdown.
pub fn newline_fallback(content: &str) -> String {
    content.replace('\n', "<br>")
}

fn format_timestamp(generated_at: DateTime<Utc>) -> String {
    generated_at.format("%B %d, %Y at %I:%M %p").to_string()
}
