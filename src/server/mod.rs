//! HTTP dashboard.
//!
//! Routes:
//! - `GET /`: server-rendered page (controls, summary cards, chart, table)
//! - `GET /api/options`: control options as JSON
//! - `GET /api/views`: chart spec, summary and sorted table (one page of it with `page`)
//! - `GET /chart.svg`: the chart for a selection as an SVG image
//!
//! Selection query parameters: `region`, `country`, `units` (comma list; empty means
//! none, absent means all), `from`, `to`, `sort` (e.g. `value:desc,year`), `page`.

mod page;

use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DashboardViews};
use crate::error::SelectionError;
use crate::models::{Selection, Unit, YearRange};
use crate::table::SortKey;
use crate::viz;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 500;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, config: DashboardConfig) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            config: Arc::new(config),
        }
    }
}

/// Selection as it arrives in a query string.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ViewQuery {
    pub region: Option<String>,
    pub country: Option<String>,
    pub units: Option<String>,
    /// Page form checkboxes; only read when `form` is present.
    pub unit_cars: Option<String>,
    pub unit_euro: Option<String>,
    pub unit_units: Option<String>,
    pub form: Option<String>,
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl ViewQuery {
    fn units(&self) -> Result<Option<BTreeSet<Unit>>, SelectionError> {
        if self.form.is_some() {
            let checked = [
                (Unit::Cars, &self.unit_cars),
                (Unit::Euro, &self.unit_euro),
                (Unit::Units, &self.unit_units),
            ];
            return Ok(Some(
                checked
                    .into_iter()
                    .filter(|(_, v)| v.is_some())
                    .map(|(u, _)| u)
                    .collect(),
            ));
        }
        self.units.as_deref().map(Unit::parse_list).transpose()
    }

    /// Build a selection on top of the dashboard defaults.
    pub fn selection(&self, dashboard: &Dashboard) -> Result<Selection, SelectionError> {
        let defaults = dashboard.default_selection();
        let region = self.region.clone().unwrap_or(defaults.region.clone());
        let mut selection = defaults.with_region(region);
        if let Some(country) = &self.country {
            selection = selection.with_country(country.clone());
        }
        if let Some(units) = self.units()? {
            selection.units = units;
        }
        selection.years = YearRange::new(
            self.from.unwrap_or(selection.years.start),
            self.to.unwrap_or(selection.years.end),
        );
        Ok(selection)
    }

    pub fn sort_keys(&self) -> Result<Vec<SortKey>, SelectionError> {
        SortKey::parse_list(self.sort.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadSelection(#[from] SelectionError),
    #[error("chart rendering failed: {0}")]
    Render(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadSelection(e) => {
                info!("rejected selection: {e}");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ApiError::Render(e) => {
                log::error!("chart rendering failed: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    pub selection: Selection,
    #[serde(flatten)]
    pub views: DashboardViews,
    /// Requested table page; `table.rows` then holds only that page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    pub page_count: usize,
}

/// Resolve and validate a selection, then recompute every view with the table sorted.
fn resolve(state: &AppState, query: &ViewQuery) -> Result<(Selection, DashboardViews), ApiError> {
    let selection = query.selection(&state.dashboard)?;
    state.dashboard.validate(&selection)?;
    let sort = query.sort_keys()?;
    let mut views = state.dashboard.views(&selection);
    views.table.sort_by(&sort);
    Ok((selection, views))
}

pub async fn index(State(state): State<AppState>, Query(mut query): Query<ViewQuery>) -> Result<Html<String>, ApiError> {
    // Like the country dropdown: a country from another region is dropped, not an error.
    if let Some(region) = &query.region {
        let in_region = state
            .dashboard
            .options()
            .countries_for(region)
            .is_some_and(|cs| query.country.as_ref().is_some_and(|c| cs.contains(c)));
        if !in_region {
            query.country = None;
        }
    }
    let (selection, views) = resolve(&state, &query)?;
    let svg = viz::render_chart_svg(
        &views.chart,
        CHART_WIDTH,
        CHART_HEIGHT,
        state.config.font_path.as_deref(),
    )
    .map_err(ApiError::Render)?;
    let sort = query.sort_keys()?;
    let html = page::render_page(&state, &selection, &views, &svg, &sort, query.page.unwrap_or(0));
    Ok(Html(html))
}

pub async fn options(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.options().clone())
}

pub async fn views(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Result<Json<ViewsResponse>, ApiError> {
    info!("GET /api/views - query: {:?}", query);
    let (selection, mut views) = resolve(&state, &query)?;
    let page_count = views.table.page_count();
    if let Some(n) = query.page {
        views.table.rows = views.table.page(n).to_vec();
    }
    Ok(Json(ViewsResponse {
        selection,
        views,
        page: query.page,
        page_count,
    }))
}

pub async fn chart_svg(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Result<Response, ApiError> {
    let (_, views) = resolve(&state, &query)?;
    let svg = viz::render_chart_svg(
        &views.chart,
        CHART_WIDTH,
        CHART_HEIGHT,
        state.config.font_path.as_deref(),
    )
    .map_err(ApiError::Render)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/options", get(options))
        .route("/api/views", get(views))
        .route("/chart.svg", get(chart_svg))
        .with_state(state)
}

/// Bind `addr` (`host:port`) and serve until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
