use crate::report::ReportTemplate;
use crate::services::metrics::record_search;
use crate::services::DealQuery;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Form};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub item: String,
    pub budget: String,
    pub personality: String,
}

/// Run one deal search and respond with the full HTML report.
///
/// A failed search still answers 200 with a complete report page; the
/// failure is visible in the page itself. A missing form field never
/// reaches this handler (axum's form rejection).
pub async fn search(
    State(state): State<AppState>,
    Form(payload): Form<SearchRequest>,
) -> impl IntoResponse {
    let query = DealQuery {
        item: payload.item,
        budget: payload.budget,
        personality: payload.personality,
    };

    match state.deal_finder.find_deals(&query).await {
        Ok(content) => {
            record_search("ok");
            ReportTemplate::deals(&content, &query.item, Utc::now())
        }
        Err(err) => {
            record_search(err.outcome());
            tracing::warn!(item = %query.item, error = %err, "deal search failed");
            ReportTemplate::failure(&err.to_string(), &query.item, Utc::now())
        }
    }
}
