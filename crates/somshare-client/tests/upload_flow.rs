//! Upload and ledger calls against a loopback stub backend, including
//! the error-message extraction chain.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use somshare_client::posts::PostUpload;
use somshare_client::{ApiClient, ApiError};
use somshare_types::api::{HistoryKind, PostUpdateRequest, UploadCompleteRequest};

#[derive(Default)]
struct StubState {
    /// Content types seen on POST /api/posts.
    upload_content_types: Vec<String>,
    reject_uploads: bool,
}

type Shared = Arc<Mutex<StubState>>;

async fn create_post(
    State(stub): State<Shared>,
    headers: HeaderMap,
    // Drain the body so the connection isn't closed while the client is
    // still streaming the multipart payload.
    _body: axum::body::Bytes,
) -> impl IntoResponse {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let mut stub = stub.lock().unwrap();
    stub.upload_content_types.push(content_type);

    if stub.reject_uploads {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "이미 등록된 족보입니다." })),
        )
            .into_response();
    }
    Json(json!({ "earnedPoints": 100, "message": "업로드 성공!" })).into_response()
}

async fn raw_upload() -> impl IntoResponse {
    Json(json!({
        "originalName": "notes.pdf",
        "storedName": "a1b2c3.pdf",
        "url": "/files/a1b2c3.pdf",
        "size": 4,
    }))
}

async fn history() -> impl IntoResponse {
    Json(json!({
        "content": [
            { "id": 1, "amount": 100, "type": "EARN", "description": "족보 업로드", "createdAt": "2024-10-15T09:30:00Z" },
            { "id": 2, "amount": -50, "type": "USE", "description": "족보 다운로드", "createdAt": "2024-10-16T10:00:00Z" }
        ],
        "totalElements": 2,
        "totalPages": 1,
        "currentPage": 0,
    }))
}

async fn plain_text_error() -> impl IntoResponse {
    (StatusCode::FORBIDDEN, "Forbidden by policy")
}

async fn my_uploads() -> impl IntoResponse {
    Json(json!([
        { "id": 1, "title": "2024-2학기 중간고사 족보", "date": "2024-10-15", "points": 100 }
    ]))
}

async fn my_downloads() -> impl IntoResponse {
    Json(json!([]))
}

async fn start_stub() -> (SocketAddr, Shared) {
    let stub: Shared = Arc::new(Mutex::new(StubState::default()));
    let app = Router::new()
        .route("/api/posts", post(create_post))
        .route("/api/files/upload", post(raw_upload))
        .route("/api/points/history", get(history))
        .route("/api/points/upload-complete", post(|| async { StatusCode::OK }))
        .route("/api/points/balance", get(|| async { Json(json!(1000)) }))
        .route("/api/posts/99", axum::routing::delete(plain_text_error))
        .route("/api/users/me/uploads", get(my_uploads))
        .route("/api/users/me/downloads", get(my_downloads))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, stub)
}

fn temp_pdf(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("somshare_upload_test_{}.pdf", tag));
    std::fs::write(&path, b"%PDF").unwrap();
    path
}

fn client(addr: SocketAddr) -> ApiClient {
    ApiClient::with_token(format!("http://{}", addr), "test-token")
}

#[tokio::test]
async fn post_upload_is_multipart_and_reports_earned_points() {
    let (addr, stub) = start_stub().await;
    let resp = client(addr)
        .upload_post(PostUpload {
            file: temp_pdf("post"),
            title: "2024-2학기 중간고사 족보".into(),
            subject: "자료구조".into(),
            professor: "김교수".into(),
            major: "computer-science".into(),
        })
        .await
        .unwrap();

    assert_eq!(resp.earned_points, 100);
    assert_eq!(resp.message, "업로드 성공!");

    let types = stub.lock().unwrap().upload_content_types.clone();
    assert_eq!(types.len(), 1);
    assert!(types[0].starts_with("multipart/form-data"));
}

#[tokio::test]
async fn server_rejection_surfaces_the_message_field() {
    let (addr, stub) = start_stub().await;
    stub.lock().unwrap().reject_uploads = true;

    let err = client(addr)
        .upload_post(PostUpload {
            file: temp_pdf("reject"),
            title: "제목".into(),
            subject: "과목".into(),
            professor: "교수".into(),
            major: "english".into(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "이미 등록된 족보입니다.");
        }
        other => panic!("expected status error, got {:?}", other.user_message()),
    }
}

#[tokio::test]
async fn invalid_file_never_reaches_the_server() {
    let (addr, stub) = start_stub().await;
    let bad = std::env::temp_dir().join("somshare_upload_test_bad.docx");
    std::fs::write(&bad, b"not a pdf").unwrap();

    let err = client(addr)
        .upload_post(PostUpload {
            file: bad,
            title: "제목".into(),
            subject: "과목".into(),
            professor: "교수".into(),
            major: "english".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.user_message(), "PDF 파일만 업로드할 수 있어요.");
    assert!(stub.lock().unwrap().upload_content_types.is_empty());
}

#[tokio::test]
async fn raw_upload_and_ledger_round_trip() {
    let (addr, _stub) = start_stub().await;
    let api = client(addr);

    let result = api.upload_raw(&temp_pdf("raw")).await.unwrap();
    assert_eq!(result.stored_name, "a1b2c3.pdf");
    assert_eq!(result.size, 4);

    api.complete_upload(&UploadCompleteRequest {
        file_name: result.stored_name,
        original_name: result.original_name,
        file_size: result.size,
        description: "족보 업로드".into(),
    })
    .await
    .unwrap();

    assert_eq!(api.point_balance().await.unwrap(), 1000);
    let page = api.point_history(HistoryKind::All, 0, 20).await.unwrap();
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content.len(), 2);
}

#[tokio::test]
async fn edit_bounds_are_checked_before_the_request() {
    // base URL points nowhere: the length check must fail first
    let api = ApiClient::new("http://127.0.0.1:1");
    let err = api
        .update_post(
            1,
            &PostUpdateRequest {
                title: "ab".into(),
                subject: "자료구조".into(),
                professor: "김교수".into(),
                major: "computer-science".into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "제목은 3자 이상 100자 이하로 입력해 주세요.");
}

#[tokio::test]
async fn activity_lists_parse() {
    let (addr, _stub) = start_stub().await;
    let api = client(addr);

    let uploads = api.my_uploads().await.unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].points, 100);
    assert!(api.my_downloads().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_json_error_bodies_fall_back_to_raw_text() {
    let (addr, _stub) = start_stub().await;
    let err = client(addr).delete_post(99).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden by policy");
        }
        other => panic!("expected status error, got {:?}", other.user_message()),
    }
}
