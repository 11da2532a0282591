//! Web API module for Courtboard.
//!
//! This module provides a REST API over the court layout, the weekly player
//! lists and the audit trail, so a browser frontend can drive the same
//! operations as the CLI.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/layout` - Full court layout document
//! - `GET /api/layout/summary` - Grid settings and progress
//! - `PUT /api/layout/grid` - Resize, rename, or retarget the layout
//! - `POST /api/layout/finalize` - Record the layout as finished
//! - `GET /api/layout/image.png` - Rendered layout (optional `?edit=true`)
//! - `POST /api/courts` - Add a court
//! - `PATCH /api/courts/{id}` - Rename or re-level a court
//! - `DELETE /api/courts/{id}` - Delete a court
//! - `POST /api/courts/{id}/move` - Move a court to an empty cell
//! - `POST /api/courts/swap` - Swap two courts
//! - `POST /api/courts/autofill` - Fill empty cells (optional `?target=N`)
//! - `POST /api/courts/reset` - Delete every court
//! - `GET /api/players/{day}` - A day's player list and waitlist
//! - `POST /api/players/{day}` - Sign a player up
//! - `DELETE /api/players/{day}/{name}` - Remove a player (optional `?waitlist=true`)
//! - `GET /api/audit` - Recent audit entries (optional `?limit=N`)
//! - `GET /api/stats` - Player and court totals
//!
//! Handlers never touch the filesystem on the async workers: every load,
//! save and render runs on tokio's blocking pool.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::models::{
    AuditEntry, Court, CourtLayout, DayRoster, GridError, GridPosition, ListKind, RosterError,
    SkillLevel, Weekday,
};
use crate::render::{default_export_filename, render_png, TextRenderer, ViewMode};
use crate::services::{AppData, ClubStats, DataStore, GridStore, LayoutSummary, RosterService};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Data files
    store: DataStore,
    /// Font used for layout images (resolved once at startup)
    text: Arc<TextRenderer>,
    /// Serializes load-mutate-save cycles; the owned guard travels into the
    /// blocking task so a dropped request cannot release it early
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new application state, discovering a font for rendering.
    #[must_use]
    pub fn new(config: Config, data_dir: PathBuf) -> Self {
        let text = TextRenderer::discover(config.render.font_path.as_deref());
        Self::with_text_renderer(config, data_dir, text)
    }

    /// Creates a state with an explicit text renderer.
    #[must_use]
    pub fn with_text_renderer(config: Config, data_dir: PathBuf, text: TextRenderer) -> Self {
        Self {
            config: Arc::new(config),
            store: DataStore::new(data_dir),
            text: Arc::new(text),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.store.dir()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Grid settings update; omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct GridUpdateRequest {
    /// New row count.
    pub rows: Option<u32>,
    /// New column count.
    pub cols: Option<u32>,
    /// New center name.
    pub center_name: Option<String>,
    /// New court target.
    pub total_courts: Option<u32>,
}

/// Query parameters for the layout image.
#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    /// Draw "+" markers in empty cells.
    #[serde(default)]
    pub edit: bool,
}

/// New court request.
#[derive(Debug, Deserialize)]
pub struct AddCourtRequest {
    /// Court name.
    pub name: String,
    /// Skill level (beginner, intermediate, advanced).
    pub level: String,
    /// Target cell; first free cell when omitted.
    pub position: Option<GridPosition>,
}

/// Court update request.
#[derive(Debug, Deserialize)]
pub struct UpdateCourtRequest {
    /// New name.
    pub name: Option<String>,
    /// New skill level.
    pub level: Option<String>,
}

/// Swap request.
#[derive(Debug, Deserialize)]
pub struct SwapRequest {
    /// First court id.
    pub first: u32,
    /// Second court id.
    pub second: u32,
}

/// Query parameters for auto-fill.
#[derive(Debug, Deserialize)]
pub struct AutofillQuery {
    /// Active court count to reach (defaults to the layout target).
    pub target: Option<u32>,
}

/// Result of a delete request.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    /// False when the court was already deleted.
    pub removed: bool,
}

/// Result of a bulk court operation.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    /// Number of courts affected.
    pub count: usize,
}

/// A day's lists.
#[derive(Debug, Serialize)]
pub struct DayResponse {
    /// Club day.
    pub day: Weekday,
    /// Main list capacity.
    pub max_players: usize,
    /// Waitlist capacity.
    pub max_waitlist: usize,
    /// Players and waitlist.
    #[serde(flatten)]
    pub lists: DayRoster,
}

/// Sign-up request.
#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    /// Player name.
    pub name: String,
    /// Skill level; beginner when omitted.
    pub level: Option<String>,
}

/// Sign-up result.
#[derive(Debug, Serialize)]
pub struct AddPlayerResponse {
    /// List the player landed on.
    pub list: ListKind,
}

/// Query parameters for player removal.
#[derive(Debug, Default, Deserialize)]
pub struct RemovePlayerQuery {
    /// Remove from the waitlist instead of the main list.
    #[serde(default)]
    pub waitlist: bool,
}

/// Query parameters for the audit trail.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    /// Maximum number of entries (default 50).
    pub limit: Option<usize>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiFailure = (StatusCode, Json<ApiError>);
type ApiResult<T> = Result<T, ApiFailure>;

const DEFAULT_AUDIT_LIMIT: usize = 50;

fn grid_failure(err: GridError) -> ApiFailure {
    let status = match err {
        GridError::DuplicateName(_)
        | GridError::PositionConflict { .. }
        | GridError::CapacityExceeded { .. } => StatusCode::CONFLICT,
        GridError::InvalidOperation(_) | GridError::UnknownLevel(_) => StatusCode::BAD_REQUEST,
        GridError::UnknownCourt(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(ApiError::new(err.to_string())))
}

fn roster_failure(err: RosterError) -> ApiFailure {
    let status = match err {
        RosterError::EmptyName => StatusCode::BAD_REQUEST,
        RosterError::DayFull { .. } => StatusCode::CONFLICT,
        RosterError::UnknownDay(_) | RosterError::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
    };
    (status, Json(ApiError::new(err.to_string())))
}

fn internal_failure(message: &str, err: &anyhow::Error) -> ApiFailure {
    error!("{message}: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(message, format!("{err:#}"))),
    )
}

fn parse_level(level: &str) -> ApiResult<SkillLevel> {
    level.parse().map_err(grid_failure)
}

fn parse_day(day: &str) -> ApiResult<Weekday> {
    day.parse().map_err(roster_failure)
}

// ============================================================================
// Data Access
// ============================================================================

/// Runs file I/O on the blocking pool.
async fn run_blocking<T, F>(work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!("Blocking task failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Background task failed", e.to_string())),
        )
    })?
}

fn load_from(store: &DataStore) -> ApiResult<AppData> {
    store
        .load()
        .map_err(|e| internal_failure("Failed to load data", &e))
}

impl AppState {
    async fn load(&self) -> ApiResult<AppData> {
        let store = self.store.clone();
        run_blocking(move || load_from(&store)).await
    }

    /// Runs one load-mutate-save cycle under the write lock.
    ///
    /// Nothing is written when `edit` fails.
    async fn mutate<T, F>(&self, edit: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut AppData) -> ApiResult<T> + Send + 'static,
    {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let store = self.store.clone();

        run_blocking(move || {
            let _guard = guard;
            let mut data = load_from(&store)?;
            let result = edit(&mut data)?;
            store
                .save(&data)
                .map_err(|e| internal_failure("Failed to save data", &e))?;
            Ok(result)
        })
        .await
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/layout - Full layout document, deleted courts included.
async fn get_layout(State(state): State<AppState>) -> ApiResult<Json<CourtLayout>> {
    Ok(Json(state.load().await?.layout))
}

/// GET /api/layout/summary
async fn get_summary(State(state): State<AppState>) -> ApiResult<Json<LayoutSummary>> {
    let data = state.load().await?;
    Ok(Json(LayoutSummary::of(&data.layout)))
}

/// PUT /api/layout/grid - Applies every provided setting or none of them.
async fn update_grid(
    State(state): State<AppState>,
    Json(request): Json<GridUpdateRequest>,
) -> ApiResult<Json<LayoutSummary>> {
    state
        .mutate(move |data| {
            let mut grid = GridStore::new(&mut data.layout, &mut data.audit);
            if request.rows.is_some() || request.cols.is_some() {
                let settings = &grid.layout().layout_settings;
                let rows = request.rows.unwrap_or(settings.rows);
                let cols = request.cols.unwrap_or(settings.cols);
                grid.resize_grid(rows, cols).map_err(grid_failure)?;
            }
            if let Some(name) = &request.center_name {
                grid.rename_center(name).map_err(grid_failure)?;
            }
            if let Some(total) = request.total_courts {
                grid.set_target_courts(total).map_err(grid_failure)?;
            }
            Ok(LayoutSummary::of(grid.layout()))
        })
        .await
        .map(Json)
}

/// POST /api/layout/finalize - Fails with 400 while courts are missing.
async fn finalize_layout(State(state): State<AppState>) -> ApiResult<Json<LayoutSummary>> {
    state
        .mutate(|data| {
            GridStore::new(&mut data.layout, &mut data.audit)
                .finalize_layout()
                .map_err(grid_failure)
        })
        .await
        .map(Json)
}

/// GET /api/layout/image.png
async fn get_layout_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store.clone();
    let text = Arc::clone(&state.text);
    let png = run_blocking(move || {
        let data = load_from(&store)?;
        render_png(&data.layout, ViewMode::from_edit_flag(query.edit), &text)
            .map_err(|e| internal_failure("Failed to render layout", &e))
    })
    .await?;

    let disposition = format!("inline; filename=\"{}\"", default_export_filename());
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        png,
    ))
}

/// POST /api/courts
async fn add_court(
    State(state): State<AppState>,
    Json(request): Json<AddCourtRequest>,
) -> ApiResult<(StatusCode, Json<Court>)> {
    let level = parse_level(&request.level)?;
    let court = state
        .mutate(move |data| {
            GridStore::new(&mut data.layout, &mut data.audit)
                .add_court(&request.name, level, request.position)
                .map_err(grid_failure)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(court)))
}

/// PATCH /api/courts/{id}
async fn update_court(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(request): Json<UpdateCourtRequest>,
) -> ApiResult<Json<Court>> {
    let level = request.level.as_deref().map(parse_level).transpose()?;
    state
        .mutate(move |data| {
            GridStore::new(&mut data.layout, &mut data.audit)
                .update_court(id, request.name.as_deref(), level)
                .map_err(grid_failure)
        })
        .await
        .map(Json)
}

/// DELETE /api/courts/{id}
async fn remove_court(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<RemoveResponse>> {
    let removed = state
        .mutate(move |data| {
            GridStore::new(&mut data.layout, &mut data.audit)
                .remove_court(id)
                .map_err(grid_failure)
        })
        .await?;
    Ok(Json(RemoveResponse { removed }))
}

/// POST /api/courts/{id}/move
async fn move_court(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(to): Json<GridPosition>,
) -> ApiResult<StatusCode> {
    state
        .mutate(move |data| {
            GridStore::new(&mut data.layout, &mut data.audit)
                .move_court(id, to)
                .map_err(grid_failure)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/courts/swap
async fn swap_courts(
    State(state): State<AppState>,
    Json(request): Json<SwapRequest>,
) -> ApiResult<StatusCode> {
    state
        .mutate(move |data| {
            GridStore::new(&mut data.layout, &mut data.audit)
                .swap_positions(request.first, request.second)
                .map_err(grid_failure)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/courts/autofill
async fn autofill_courts(
    State(state): State<AppState>,
    Query(query): Query<AutofillQuery>,
) -> ApiResult<Json<CountResponse>> {
    let count = state
        .mutate(move |data| {
            let mut grid = GridStore::new(&mut data.layout, &mut data.audit);
            let target = query
                .target
                .unwrap_or(grid.layout().layout_settings.total_courts);
            Ok(grid.auto_fill_empty(target))
        })
        .await?;
    Ok(Json(CountResponse { count }))
}

/// POST /api/courts/reset
async fn reset_courts(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state
        .mutate(|data| Ok(GridStore::new(&mut data.layout, &mut data.audit).reset_courts()))
        .await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/players/{day}
async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> ApiResult<Json<DayResponse>> {
    let day = parse_day(&day)?;
    let data = state.load().await?;
    let lists = data.roster.day(day).map_err(roster_failure)?.clone();
    Ok(Json(DayResponse {
        day,
        max_players: state.config.roster.max_players,
        max_waitlist: state.config.roster.max_waitlist,
        lists,
    }))
}

/// POST /api/players/{day}
async fn add_player(
    State(state): State<AppState>,
    Path(day): Path<String>,
    Json(request): Json<AddPlayerRequest>,
) -> ApiResult<(StatusCode, Json<AddPlayerResponse>)> {
    let day = parse_day(&day)?;
    let level = match request.level.as_deref() {
        Some(level) => parse_level(level)?,
        None => SkillLevel::Beginner,
    };
    let limits = state.config.roster;

    let list = state
        .mutate(move |data| {
            RosterService::new(&mut data.roster, limits, &mut data.audit)
                .add_player(day, &request.name, level)
                .map_err(roster_failure)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(AddPlayerResponse { list })))
}

/// DELETE /api/players/{day}/{name}
async fn remove_player(
    State(state): State<AppState>,
    Path((day, name)): Path<(String, String)>,
    Query(query): Query<RemovePlayerQuery>,
) -> ApiResult<StatusCode> {
    let day = parse_day(&day)?;
    let kind = if query.waitlist {
        ListKind::Waitlist
    } else {
        ListKind::Players
    };
    let limits = state.config.roster;

    state
        .mutate(move |data| {
            RosterService::new(&mut data.roster, limits, &mut data.audit)
                .remove_player(day, &name, kind)
                .map_err(roster_failure)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/audit
async fn list_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<Json<Vec<AuditEntry>>> {
    let data = state.load().await?;
    let limit = query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    Ok(Json(data.audit.recent(limit).to_vec()))
}

/// GET /api/stats
async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<ClubStats>> {
    let data = state.load().await?;
    Ok(Json(ClubStats::collect(&data.roster, &data.layout)))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server is meant to run next to a local frontend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Layout endpoints
        .route("/api/layout", get(get_layout))
        .route("/api/layout/summary", get(get_summary))
        .route("/api/layout/grid", put(update_grid))
        .route("/api/layout/finalize", post(finalize_layout))
        .route("/api/layout/image.png", get(get_layout_image))
        // Court endpoints
        .route("/api/courts", post(add_court))
        .route("/api/courts/swap", post(swap_courts))
        .route("/api/courts/autofill", post(autofill_courts))
        .route("/api/courts/reset", post(reset_courts))
        .route("/api/courts/{id}", patch(update_court).delete(remove_court))
        .route("/api/courts/{id}/move", post(move_court))
        // Roster endpoints
        .route("/api/players/{day}", get(get_day).post(add_player))
        .route("/api/players/{day}/{name}", delete(remove_player))
        // Audit and stats
        .route("/api/audit", get(list_audit))
        .route("/api/stats", get(get_stats))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `data_dir` - Directory containing the data files
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config, data_dir: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config, data_dir);
    let app = create_router(state);

    info!("Starting Courtboard web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
