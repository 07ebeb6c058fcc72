use super::error::ApiError;
use super::AppState;
use crate::model::Recipe;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub search_term: Option<String>,
}

/// `POST /scrape`: scrapes `searchTerm`, stores the recipes whose URL is new
/// and returns only those.
pub async fn scrape_recipes(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let term = match payload {
        Ok(Json(request)) => request.search_term.unwrap_or_default(),
        Err(rejection) => {
            warn!("Rejected scrape request: {}", rejection);
            return Err(ApiError::MissingSearchTerm);
        }
    };
    let term = term.trim();
    if term.is_empty() {
        return Err(ApiError::MissingSearchTerm);
    }

    let recipes = state
        .scraper
        .scrape(term)
        .await
        .map_err(ApiError::ScrapeFailed)?;

    let added = state.store.append_unique(recipes).await;
    info!("Stored {} new recipes for '{}'", added.len(), term);

    Ok(Json(added))
}
