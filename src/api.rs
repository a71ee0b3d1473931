//! HTTP routes over the export session

use crate::catalog::{self, Chapter};
use crate::error::ExporterError;
use crate::export::{ExportFormat, ExportPayload};
use crate::selection::SelectionQuery;
use crate::session::ExportPreview;
use crate::state::AppState;
use crate::transliteration::{ArabicLetter, TransliterationMap, ARABIC_LETTERS};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

// === Request/Response types ===

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct MappingResponse {
    mapping: TransliterationMap,
    use_custom_mapping: bool,
    saved: bool,
}

#[derive(Deserialize)]
struct MappingEntryRequest {
    value: String,
}

#[derive(Deserialize)]
struct CustomMappingRequest {
    enabled: bool,
}

#[derive(Serialize)]
struct UploadResponse {
    applied: usize,
    message: String,
}

#[derive(Serialize)]
struct ValidationResponse {
    error: Option<String>,
}

#[derive(Serialize)]
struct ProceedResponse {
    verse_count: usize,
}

#[derive(Deserialize)]
struct ExportQuery {
    format: Option<ExportFormat>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn error_response(e: ExporterError) -> ApiError {
    let status = match &e {
        ExporterError::EmptySelection | ExporterError::InvalidRange => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ExporterError::UnsavedMappingChanges => StatusCode::CONFLICT,
        ExporterError::NotFound(_) => StatusCode::NOT_FOUND,
        ExporterError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ExporterError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
        ExporterError::Export(_) | ExporterError::Database(_) | ExporterError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    // Failures outside the user's control get a generic message; details go to the log
    let message = match &e {
        ExporterError::SourceUnavailable(_) => {
            error!("{}", e);
            "An unexpected error occurred processing your request.".to_string()
        }
        ExporterError::Export(_) => {
            error!("{}", e);
            "Export failed. Please try again.".to_string()
        }
        _ if e.is_recoverable() => e.to_string(),
        _ => {
            warn!("{}", e);
            e.to_string()
        }
    };

    (status, Json(ErrorResponse { error: message }))
}

// === Handlers ===

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn list_chapters() -> Json<&'static [Chapter]> {
    Json(catalog::all())
}

async fn get_chapter(Path(id): Path<u32>) -> ApiResult<Chapter> {
    catalog::get(id)
        .copied()
        .map(Json)
        .ok_or_else(|| error_response(ExporterError::NotFound(format!("chapter {}", id))))
}

async fn list_letters() -> Json<&'static [ArabicLetter]> {
    Json(ARABIC_LETTERS)
}

async fn get_mapping(State(state): State<Arc<AppState>>) -> Json<MappingResponse> {
    let session = state.session.lock().await;
    Json(MappingResponse {
        mapping: session.mapping().clone(),
        use_custom_mapping: session.use_custom_mapping(),
        saved: session.is_mapping_saved(),
    })
}

async fn set_mapping_entry(
    State(state): State<Arc<AppState>>,
    Path(letter): Path<String>,
    Json(req): Json<MappingEntryRequest>,
) -> ApiResult<MappingResponse> {
    let mut session = state.session.lock().await;
    session.set_mapping_entry(&letter, &req.value).map_err(error_response)?;
    Ok(Json(MappingResponse {
        mapping: session.mapping().clone(),
        use_custom_mapping: session.use_custom_mapping(),
        saved: session.is_mapping_saved(),
    }))
}

async fn upload_mapping(
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<UploadResponse> {
    let mut session = state.session.lock().await;
    let applied = session.upload_key_file(&body).map_err(error_response)?;
    Ok(Json(UploadResponse {
        applied,
        message: "File loaded. Please save your key changes to confirm.".to_string(),
    }))
}

async fn reset_mapping(State(state): State<Arc<AppState>>) -> ApiResult<MappingResponse> {
    let mut session = state.session.lock().await;
    session.reset_mapping().map_err(error_response)?;
    Ok(Json(MappingResponse {
        mapping: session.mapping().clone(),
        use_custom_mapping: session.use_custom_mapping(),
        saved: session.is_mapping_saved(),
    }))
}

async fn save_mapping(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    let mut session = state.session.lock().await;
    session.save_mapping().map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_custom_mapping(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CustomMappingRequest>,
) -> Result<StatusCode, ApiError> {
    let mut session = state.session.lock().await;
    session
        .set_use_custom_mapping(req.enabled)
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_selection(State(state): State<Arc<AppState>>) -> Json<SelectionQuery> {
    Json(*state.session.lock().await.selection())
}

async fn set_selection(
    State(state): State<Arc<AppState>>,
    Json(selection): Json<SelectionQuery>,
) -> Json<SelectionQuery> {
    let mut session = state.session.lock().await;
    session.set_selection(selection);
    Json(*session.selection())
}

async fn set_start_chapter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<SelectionQuery> {
    let mut session = state.session.lock().await;
    session.set_start_chapter(id).map_err(error_response)?;
    Ok(Json(*session.selection()))
}

async fn set_end_chapter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<SelectionQuery> {
    let mut session = state.session.lock().await;
    session.set_end_chapter(id).map_err(error_response)?;
    Ok(Json(*session.selection()))
}

async fn validate_selection(State(state): State<Arc<AppState>>) -> ApiResult<ValidationResponse> {
    let session = state.session.lock().await;
    match session.validate().await {
        Ok(()) => Ok(Json(ValidationResponse { error: None })),
        Err(e) if e.is_recoverable() => Ok(Json(ValidationResponse {
            error: Some(e.to_string()),
        })),
        Err(e) => Err(error_response(e)),
    }
}

async fn proceed(State(state): State<Arc<AppState>>) -> ApiResult<ProceedResponse> {
    let mut session = state.session.lock().await;
    let verse_count = session.proceed().await.map_err(error_response)?;
    Ok(Json(ProceedResponse { verse_count }))
}

async fn export_preview(State(state): State<Arc<AppState>>) -> Json<ExportPreview> {
    Json(state.session.lock().await.preview())
}

async fn export_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format = params.format.unwrap_or_default();
    let payload = state
        .session
        .lock()
        .await
        .export(format)
        .map_err(error_response)?;
    attachment(payload).map_err(error_response)
}

/// Hand the payload to the client as a file download
fn attachment(payload: ExportPayload) -> Result<Response, ExporterError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, payload.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", payload.file_name),
        )
        .body(Body::from(payload.bytes))
        .map_err(|e| ExporterError::Export(e.to_string()))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chapters", get(list_chapters))
        .route("/chapters/:id", get(get_chapter))
        .route("/letters", get(list_letters))
        .route("/mapping", get(get_mapping))
        .route("/mapping/upload", post(upload_mapping))
        .route("/mapping/reset", post(reset_mapping))
        .route("/mapping/save", post(save_mapping))
        .route("/mapping/custom", put(set_custom_mapping))
        .route("/mapping/:letter", put(set_mapping_entry))
        .route("/selection", get(get_selection).put(set_selection))
        .route("/selection/start-chapter/:id", put(set_start_chapter))
        .route("/selection/end-chapter/:id", put(set_end_chapter))
        .route("/selection/validate", post(validate_selection))
        .route("/selection/proceed", post(proceed))
        .route("/export/preview", get(export_preview))
        .route("/export", get(export_file))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;
    use crate::session::ExportSession;
    use crate::test_support::sample_repository;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(dir: &TempDir) -> Router {
        let session = ExportSession::new(
            sample_repository(dir),
            Box::new(MemoryPreferences::default()),
        );
        router(Arc::new(AppState::new(session)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_chapters() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let response = send(&app, "GET", "/chapters", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 114);

        let response = send(&app, "GET", "/chapters/112", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["verse_count"], 4);

        let response = send(&app, "GET", "/chapters/200", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validate_reports_user_errors_in_body() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let selection = json!({
            "scope": "range",
            "start_chapter": 2, "start_verse": 5,
            "end_chapter": 1, "end_verse": 3
        });
        send(&app, "PUT", "/selection", Some(selection)).await;

        let response = send(&app, "POST", "/selection/validate", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["error"],
            "Start position must be before the end position."
        );

        let response = send(&app, "POST", "/selection/proceed", None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_proceed_then_download_csv() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let response = send(&app, "GET", "/export?format=csv", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let selection = json!({
            "scope": "range",
            "start_chapter": 1, "start_verse": 5,
            "end_chapter": 2, "end_verse": 3
        });
        send(&app, "PUT", "/selection", Some(selection)).await;
        let response = send(&app, "POST", "/selection/proceed", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["verse_count"], 6);

        let response = send(&app, "GET", "/export?format=csv", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Quran_Export_"));
        assert!(disposition.ends_with(".csv\""));

        let bytes = body_bytes(response).await;
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[tokio::test]
    async fn test_download_spreadsheet() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        send(&app, "POST", "/selection/proceed", None).await;

        let response = send(&app, "GET", "/export?format=xls", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.ms-excel"
        );
        let xml = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(xml.contains("ss:ReadingOrder=\"RightToLeft\""));
    }

    #[tokio::test]
    async fn test_unsaved_mapping_conflict() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        send(&app, "PUT", "/mapping/custom", Some(json!({ "enabled": true }))).await;
        // Percent-encoded ب
        let response = send(
            &app,
            "PUT",
            "/mapping/%D8%A8",
            Some(json!({ "value": "B" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["mapping"]["ب"], "B");
        assert_eq!(body["saved"], false);

        let response = send(&app, "POST", "/selection/proceed", None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = send(&app, "POST", "/mapping/save", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, "POST", "/selection/proceed", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "GET", "/export/preview", None).await;
        let preview = body_json(response).await;
        assert_eq!(preview["custom_mapping_applied"], true);
        assert_eq!(preview["rows"][0]["transliteration"], "Bsm allh alrhmn alrhym");
    }

    #[tokio::test]
    async fn test_upload_merges_key_file() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let request = Request::builder()
            .method("POST")
            .uri("/mapping/upload")
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from("ب,B\nت\tT\nbroken"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["applied"], 2);

        let mapping = body_json(send(&app, "GET", "/mapping", None).await).await;
        assert_eq!(mapping["mapping"]["ب"], "B");
        assert_eq!(mapping["mapping"]["ش"], "sh");
        assert_eq!(mapping["saved"], false);
    }

    #[tokio::test]
    async fn test_put_whole_chapter_selection() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let selection = json!({ "scope": "whole_chapter", "start_chapter": 2 });
        let response = send(&app, "PUT", "/selection", Some(selection)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["start_chapter"], 2);
        assert_eq!(body["start_verse"], 1);

        let response = send(&app, "POST", "/selection/proceed", None).await;
        assert_eq!(body_json(response).await["verse_count"], 286);
    }

    #[test]
    fn test_error_body_is_display_message() {
        let (status, Json(body)) = error_response(ExporterError::InvalidRange);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, ExporterError::InvalidRange.to_string());

        let (status, Json(body)) = error_response(ExporterError::NotFound("chapter 0".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Not found: chapter 0");
    }

    #[tokio::test]
    async fn test_chapter_pickers() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let response = send(&app, "PUT", "/selection/end-chapter/2", None).await;
        assert_eq!(body_json(response).await["end_verse"], 286);

        let response = send(&app, "PUT", "/selection/start-chapter/999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_source_failure_is_generic() {
        let dir = TempDir::new().unwrap();
        let session = ExportSession::new(
            crate::verses::VerseRepository::new(crate::verses::VerseSource::File(
                dir.path().join("missing.json"),
            )),
            Box::new(MemoryPreferences::default()),
        );
        let app = router(Arc::new(AppState::new(session)));

        let response = send(&app, "POST", "/selection/proceed", None).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().contains("missing.json"));
    }
}
