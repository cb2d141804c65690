use axum::{extract::State, Json};
use std::sync::Arc;

use crate::routes::AppState;

/// Handler for the title list, in catalog order
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let titles = state
        .recommender
        .catalog()
        .all_titles()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(titles)
}
