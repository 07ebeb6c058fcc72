use super::AppState;
use crate::model::Recipe;
use axum::{
    extract::{Path, State},
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// `GET /recipes`: every stored recipe, no pagination.
pub async fn list_recipes(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    Json(state.store.read_all().await)
}

/// `DELETE /recipes/{id}`: succeeds whether or not the recipe existed.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeleteResponse> {
    if state.store.remove(&id).await {
        info!("Deleted recipe {}", id);
    }
    Json(DeleteResponse { success: true })
}
