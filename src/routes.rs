use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};

use crate::{AppState, error::AppResult, models::ChartQuery, templates};

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ChartQuery>,
) -> AppResult<Html<String>> {
    let year = selected_year(&state, q.year);
    let counts = state.store.count_genres(year).await?;
    Ok(Html(templates::chart_page(year, state.config.years(), &counts)))
}

pub async fn genre_counts(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ChartQuery>,
) -> AppResult<Json<std::collections::BTreeMap<String, i64>>> {
    let year = selected_year(&state, q.year);
    Ok(Json(state.store.count_genres(year).await?))
}

// Years outside the ingested range would always chart as all zeros;
// fall back to the latest ingested year instead.
fn selected_year(state: &AppState, requested: Option<i16>) -> i16 {
    match requested {
        Some(year) if state.config.years().contains(&year) => year,
        _ => state.config.end_year,
    }
}
