//! Catalog home endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::AppResult, services::stats::CatalogStats, AppState};

/// Home page data bag: the five independent catalog counts
#[derive(Serialize)]
pub struct HomeView {
    pub title: String,
    pub data: CatalogStats,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Json<HomeView>> {
    let data = state.services.stats.catalog_stats().await?;
    Ok(Json(HomeView {
        title: "Local Library Home".to_string(),
        data,
    }))
}
