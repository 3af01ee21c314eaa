//! Prompt construction and the single outbound completion call.

use crate::services::providers::{ChatProvider, ProviderError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealError {
    #[error("Perplexity API Key not found. Please set the PERPLEXITY_API_KEY environment variable.")]
    MissingApiKey,

    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl DealError {
    /// Label for the `deal_searches_total` outcome dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            DealError::MissingApiKey => "missing_api_key",
            DealError::Provider(_) => "provider_error",
        }
    }
}

/// One shopping query as submitted through the form. All three fields are
/// opaque strings; the budget is never parsed numerically.
#[derive(Debug, Clone)]
pub struct DealQuery {
    pub item: String,
    pub budget: String,
    pub personality: String,
}

const SYSTEM_PROMPT: &str = "You are an expert deal hunter and shopping assistant. \
    Your goal is to find CURRENTLY ACTIVE sales and deals. \
    Do not list items at full price unless they are exceptionally good value. \
    You must verify that the deals are recent (from the last 7 days). \
    Format your response as a list of items. For each item, provide: \
    1. Product Name \
    2. Original Price vs Sale Price \
    3. A one-sentence reason why this fits the user's personality \
    4. A direct URL citation.";

/// Builds the fixed prompt pair and performs the one outbound call per
/// search. The credential is injected at construction; when it is absent
/// there is no provider and every search short-circuits before the network.
pub struct DealFinder {
    provider: Option<Arc<dyn ChatProvider>>,
}

impl DealFinder {
    pub fn new(provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self { provider }
    }

    /// Run one deal search. Exactly one outbound call; no retry, no backoff.
    pub async fn find_deals(&self, query: &DealQuery) -> Result<String, DealError> {
        let provider = self.provider.as_ref().ok_or(DealError::MissingApiKey)?;

        tracing::info!(
            item = %query.item,
            budget = %query.budget,
            personality = %query.personality,
            "scanning the web for deals"
        );

        let content = provider.complete(SYSTEM_PROMPT, &user_prompt(query)).await?;

        Ok(content)
    }
}

/// The query fields are interpolated verbatim.
fn user_prompt(query: &DealQuery) -> String {
    format!(
        "Find me 5 amazing gift ideas for someone who is into: {}. \
         They are looking for: {}. \
         My hard limit budget is BDT {}. \
         Focus on items that are currently on sale or have a price drop. \
         Provide the output in this specific format for each item:\n\n\
         ## [Product Name]\n\
         **Price:** [Sale Price] (Was [Original Price])\n\
         **Why:** [Reason]\n\
         **Link:** [URL]\n\n",
        query.personality, query.item, query.budget
    )
}
