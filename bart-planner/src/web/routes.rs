//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::pipeline::{TripError, TripReport, fetch_trip, prepare_trip};
use crate::query::TripQuery;
use crate::stations::{SearchError, search};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Header carrying the id of the browser tab that owns a trip board.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

const MAX_CLIENT_ID_LEN: usize = 64;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/:code", get(lookup_station))
        .route("/trip", post(submit_trip))
        .route("/trip/latest", get(latest_trip))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with login gate, trip form and station finder.
async fn index_page() -> Result<Html<String>, AppError> {
    let now = Local::now();
    let template = IndexTemplate {
        today: now.format("%Y-%m-%d").to_string(),
        now: now.format("%H:%M").to_string(),
    };
    render(&template).map(Html)
}

/// List every station in directory order.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let stations = state
        .directory
        .iter()
        .map(StationResult::from_station)
        .collect();
    Json(StationListResponse { stations })
}

/// Search stations by name.
async fn search_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<StationSearchRequest>,
) -> Result<Response, AppError> {
    let matches = search(&req.q, &state.directory)?;

    if accepts_html(&headers) {
        let html = render(&StationListTemplate { stations: matches })?;
        Ok(Html(html).into_response())
    } else {
        let stations = matches
            .into_iter()
            .map(StationResult::from_station)
            .collect();
        Ok(Json(StationListResponse { stations }).into_response())
    }
}

/// Look up a station by its code.
async fn lookup_station(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let name = state
        .directory
        .name_for(&code)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station code: {code}"),
        })?;

    Ok(Json(StationResult {
        name: name.to_string(),
        code,
    }))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Run a trip query and show its predictions and alerts.
async fn submit_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let query: TripQuery = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid trip request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let client = client_id(&headers)?;

    // Only valid queries take a ticket.
    let trip = prepare_trip(&state.directory, &query).map_err(TripError::from)?;

    let Some(client) = client else {
        let report = fetch_trip(state.bart.as_ref(), trip).await?;
        return respond_with_trip(&headers, &report);
    };

    let board = state.boards.for_client(&client).await;
    let ticket = board.begin();
    let report = Arc::new(fetch_trip(state.bart.as_ref(), trip).await?);

    if !board.publish(ticket, report.clone()).await {
        info!(
            client = client.as_str(),
            generation = ticket.generation(),
            "trip query superseded by a newer one"
        );
        return Err(AppError::Conflict {
            message: "A newer trip query has replaced this one".to_string(),
        });
    }

    respond_with_trip(&headers, &report)
}

/// Show the trip currently on the caller's board.
async fn latest_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let client = client_id(&headers)?.ok_or_else(|| AppError::BadRequest {
        message: format!("Missing {CLIENT_ID_HEADER} header"),
    })?;

    let report = match state.boards.existing(&client).await {
        Some(board) => board.current().await,
        None => None,
    };
    let report = report.ok_or_else(|| AppError::NotFound {
        message: "No trip has been planned yet".to_string(),
    })?;

    respond_with_trip(&headers, &report)
}

/// The calling tab's id, if it sent one.
fn client_id(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(value) = headers.get(CLIENT_ID_HEADER) else {
        return Ok(None);
    };

    let id = value.to_str().map(str::trim).unwrap_or_default();
    if id.is_empty() || id.len() > MAX_CLIENT_ID_LEN {
        return Err(AppError::BadRequest {
            message: format!("Invalid {CLIENT_ID_HEADER} header"),
        });
    }
    Ok(Some(id.to_string()))
}

/// Return HTML or JSON based on the Accept header.
fn respond_with_trip(headers: &HeaderMap, report: &TripReport) -> Result<Response, AppError> {
    if accepts_html(headers) {
        let html = render(&TripResultsTemplate { report })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(report).into_response())
    }
}

fn render(template: &impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        let message = e.to_string();
        match e {
            TripError::Validation(_) => AppError::BadRequest { message },
            TripError::Request(_) => AppError::BadGateway { message },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), message = message.as_str(), "request failed");
        } else {
            info!(status = status.as_u16(), message = message.as_str(), "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bart::{BartClient, BartConfig};
    use crate::stations::StationDirectory;
    use crate::testing::spawn_stub;
    use axum::routing::get;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Upstream stub whose predictions endpoint returns `predictions` with
    /// `status`, counting alerts requests in `alerts_hits`.
    async fn upstream(
        status: StatusCode,
        predictions: Value,
        alerts_hits: Arc<AtomicUsize>,
    ) -> String {
        slow_upstream(status, predictions, alerts_hits, Duration::ZERO).await
    }

    /// Like [`upstream`], but predictions take `delay` to arrive.
    async fn slow_upstream(
        status: StatusCode,
        predictions: Value,
        alerts_hits: Arc<AtomicUsize>,
        delay: Duration,
    ) -> String {
        let router = Router::new()
            .route(
                "/getPredictions/:code",
                get(move || {
                    let predictions = predictions.clone();
                    async move {
                        tokio::time::sleep(delay).await;
                        (status, Json(predictions))
                    }
                }),
            )
            .route(
                "/getAlerts",
                get(move || {
                    alerts_hits.fetch_add(1, Ordering::SeqCst);
                    async {
                        Json(json!({
                            "currentAlerts": ["Delays near <Concord>"],
                            "plannedAlerts": [],
                            "escalatorAlerts": [],
                            "elevatorAlerts": []
                        }))
                    }
                }),
            );
        spawn_stub(router).await
    }

    async fn app(upstream_base: String) -> String {
        let directory = Arc::new(StationDirectory::bart().unwrap());
        let bart = BartClient::new(BartConfig::new().with_base_url(upstream_base)).unwrap();
        let state = AppState::new(directory, bart);
        spawn_stub(create_router(state, "static")).await
    }

    fn ok_predictions() -> Value {
        json!({
            "estimates": [
                {"lineTerminus": "Richmond", "estimates": [
                    {"formatted": "5 min", "timeFormatted": "8:05 AM"}
                ]}
            ]
        })
    }

    fn trip_body() -> Value {
        json!({
            "origin": "ashby (berkeley)",
            "destination": "12TH ST. OAKLAND CITY CENTER",
            "date": "2024-01-01",
            "time": "08:00"
        })
    }

    fn trip_from(origin: &str, destination: &str) -> Value {
        json!({
            "origin": origin,
            "destination": destination,
            "date": "2024-01-01",
            "time": "08:00"
        })
    }

    async fn post_trip(base: &str, client: &str, body: Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{base}/trip"))
            .header(CLIENT_ID_HEADER, client)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn latest_for(base: &str, client: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{base}/trip/latest"))
            .header(CLIENT_ID_HEADER, client)
            .send()
            .await
            .unwrap()
    }

    /// App whose upstream takes 300ms to answer predictions.
    async fn app_with_slow_upstream() -> String {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = slow_upstream(
            StatusCode::OK,
            ok_predictions(),
            hits,
            Duration::from_millis(300),
        )
        .await;
        app(base).await
    }

    async fn app_with_ok_upstream() -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = upstream(StatusCode::OK, ok_predictions(), hits.clone()).await;
        (app(base).await, hits)
    }

    #[tokio::test]
    async fn health_check() {
        let (base, _) = app_with_ok_upstream().await;
        let body = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_page_has_login_gate() {
        let (base, _) = app_with_ok_upstream().await;
        let resp = reqwest::get(format!("{base}/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.text().await.unwrap();
        assert!(body.contains("id=\"login-form\""));
        assert!(body.contains("id=\"schedule-form\""));
    }

    #[tokio::test]
    async fn list_all_stations() {
        let (base, _) = app_with_ok_upstream().await;
        let resp: StationListResponse = reqwest::get(format!("{base}/api/stations"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(resp.stations.len(), 50);
        assert_eq!(resp.stations[0].code, "12th");
    }

    #[tokio::test]
    async fn search_json() {
        let (base, _) = app_with_ok_upstream().await;
        let resp: StationListResponse = reqwest::get(format!("{base}/api/stations/search?q=oak"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let codes: Vec<_> = resp.stations.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["12th", "19th", "ftvl", "lake", "mcar", "oakl", "rock", "woak"]
        );
    }

    #[tokio::test]
    async fn search_html_fragment() {
        let (base, _) = app_with_ok_upstream().await;
        let body = reqwest::Client::new()
            .get(format!("{base}/api/stations/search?q=merritt"))
            .header(header::ACCEPT, "text/html")
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("<li>Lake Merritt (Oakland) (lake)</li>"));
    }

    #[tokio::test]
    async fn empty_search_is_rejected() {
        let (base, _) = app_with_ok_upstream().await;
        let resp = reqwest::get(format!("{base}/api/stations/search?q=%20"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.error, "Please enter a station name");
    }

    #[tokio::test]
    async fn station_lookup_by_code() {
        let (base, _) = app_with_ok_upstream().await;

        let found: StationResult = reqwest::get(format!("{base}/api/stations/ashb"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(found.name, "Ashby (Berkeley)");

        let missing = reqwest::get(format!("{base}/api/stations/ASHB")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn trip_json_and_latest() {
        let (base, hits) = app_with_ok_upstream().await;

        let none = latest_for(&base, "tab-a").await;
        assert_eq!(none.status(), StatusCode::NOT_FOUND);

        let report: Value = post_trip(&base, "tab-a", trip_body())
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(report["origin"]["code"], "ashb");
        assert_eq!(report["destination"]["code"], "12th");
        assert_eq!(report["predictions"]["groups"][0]["terminus"], "Richmond");
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let latest: Value = latest_for(&base, "tab-a").await.json().await.unwrap();
        assert_eq!(latest["origin"]["name"], "Ashby (Berkeley)");

        // Another tab has nothing on its board.
        let other = latest_for(&base, "tab-b").await;
        assert_eq!(other.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn trip_without_client_id_is_not_published() {
        let (base, _) = app_with_ok_upstream().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/trip"))
            .json(&trip_body())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let latest = client.get(format!("{base}/trip/latest")).send().await.unwrap();
        assert_eq!(latest.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_client_id_is_rejected() {
        let (base, hits) = app_with_ok_upstream().await;
        let resp = post_trip(&base, " ", trip_body()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_clients_both_succeed() {
        let base = app_with_slow_upstream().await;

        let first = post_trip(&base, "tab-a", trip_from("Colma", "Daly City"));
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            post_trip(&base, "tab-b", trip_from("Ashby (Berkeley)", "Colma")).await
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);

        let a: Value = latest_for(&base, "tab-a").await.json().await.unwrap();
        let b: Value = latest_for(&base, "tab-b").await.json().await.unwrap();
        assert_eq!(a["origin"]["code"], "colm");
        assert_eq!(b["origin"]["code"], "ashb");
    }

    #[tokio::test]
    async fn newer_query_from_same_client_wins() {
        let base = app_with_slow_upstream().await;

        let first = post_trip(&base, "tab-a", trip_from("Colma", "Daly City"));
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            post_trip(&base, "tab-a", trip_from("Ashby (Berkeley)", "Colma")).await
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.status(), StatusCode::CONFLICT);
        assert_eq!(second.status(), StatusCode::OK);

        let latest: Value = latest_for(&base, "tab-a").await.json().await.unwrap();
        assert_eq!(latest["origin"]["code"], "ashb");
    }

    #[tokio::test]
    async fn invalid_query_does_not_supersede_one_in_flight() {
        let base = app_with_slow_upstream().await;

        let valid = post_trip(&base, "tab-a", trip_from("Colma", "Daly City"));
        let invalid = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let mut body = trip_from("Colma", "Daly City");
            body["date"] = json!("");
            post_trip(&base, "tab-a", body).await
        };
        let (valid, invalid) = tokio::join!(valid, invalid);

        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(valid.status(), StatusCode::OK);

        let latest: Value = latest_for(&base, "tab-a").await.json().await.unwrap();
        assert_eq!(latest["origin"]["code"], "colm");
    }

    #[tokio::test]
    async fn trip_html_is_escaped() {
        let (base, _) = app_with_ok_upstream().await;
        let body = reqwest::Client::new()
            .post(format!("{base}/trip"))
            .header(header::ACCEPT, "text/html")
            .json(&trip_body())
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("<li>5 min - 8:05 AM</li>"));
        assert!(body.contains("Delays near &lt;Concord&gt;"));
        assert!(body.contains("No planned alerts."));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (base, hits) = app_with_ok_upstream().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/trip"))
            .json(&json!({"origin": "Colma", "destination": "Daly City", "date": "", "time": "08:00"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(
            err.error,
            "Please enter pick-up and drop-off stations, date, and time"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_station_is_bad_request() {
        let (base, _) = app_with_ok_upstream().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/trip"))
            .json(&json!({"origin": "Nowhere Station", "destination": "Colma", "date": "2024-01-01", "time": "08:00"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.error, "Invalid station names");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (base, _) = app_with_ok_upstream().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/trip"))
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upstream_failure_skips_alerts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let upstream_base =
            upstream(StatusCode::INTERNAL_SERVER_ERROR, json!({}), hits.clone()).await;
        let base = app(upstream_base).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/trip"))
            .json(&trip_body())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert!(err.error.contains("Status: 500 - Internal Server Error"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn api_reported_error_skips_alerts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let upstream_base =
            upstream(StatusCode::OK, json!({"error": true, "message": "closed"}), hits.clone())
                .await;
        let base = app(upstream_base).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/trip"))
            .json(&trip_body())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.error, "closed");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
