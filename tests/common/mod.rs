//! In-process stand-in for the dashboard backend.
//!
//! Serves the same routes under `/api` with canned data, plus a few routes that
//! only exist to provoke specific failures. Bound to a random local port per test.

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Multipart, Path},
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::{any, get, post},
};
use scot_client::{ClientConfig, HTTPClient};
use futures::{StreamExt, stream};
use serde_json::{Value, json};
use std::convert::Infallible;
use std::time::Duration;
use tokio::net::TcpListener;

pub const CREATED_AT: &str = "2024-05-01T12:00:00.123456";
pub const PRD_DOCUMENT: &str = "{\n  \"id\": \"1\",\n  \"title\": \"Landing page\"\n}\n";
pub const ZIP_BYTES: &[u8] = &[0x50, 0x4b, 0x03, 0x04, 0x00, 0xff, 0xfe, 0x80, 0x0a, 0x0d, 0x00];
pub const SLOW_ROUTE_DELAY: Duration = Duration::from_secs(3);

pub fn app() -> Router {
    Router::new()
        .route("/api/inspect", any(inspect))
        .route("/api/inspect/{*rest}", any(inspect))
        .route("/api/upload/html", post(upload_html))
        .route("/api/upload/generate-prd", post(upload_generate_prd))
        .route("/api/upload/extract-knowledge", post(upload_extract_knowledge))
        .route("/api/upload/list", get(upload_list))
        .route("/api/prd", get(prd_list))
        .route("/api/prd/generate", post(prd_generate))
        .route("/api/prd/save", post(prd_save))
        .route("/api/prd/download/{id}", get(prd_download))
        .route("/api/prd/{id}", get(prd_get).delete(prd_delete))
        .route("/api/knowledge", get(knowledge_list))
        .route("/api/knowledge/extract", post(knowledge_extract))
        .route("/api/knowledge/save", post(knowledge_save))
        .route("/api/knowledge/download/{id}", get(knowledge_download))
        .route("/api/knowledge/{id}", get(knowledge_get).delete(knowledge_delete))
        .route("/api/learning/generate-knowledge-point", post(learning_content))
        .route("/api/test/generate-test-task", post(test_task))
        .route("/api/execute", post(execute))
        .route("/api/execute/status/{task_id}", get(task_status))
        .route("/api/execute/download/{task_id}", get(task_download))
        .route("/api/preview/{task_id}", get(preview))
        .route("/api/preview/file/{task_id}/{*file_path}", get(preview_file))
        .route("/api/logs", get(logs_list))
        .route("/api/logs/{task_id}", get(log_detail).delete(log_delete))
        .route("/api/fail/{status}", any(fail))
        .route("/api/plain-error", get(plain_error))
        .route("/api/validation", post(validation))
        .route("/api/slow", get(slow))
        .route("/api/broken-json", get(broken_json))
        .route("/api/stalled-download", get(stalled_download))
}

/// Starts the mock backend on a random port and returns its base URL.
pub async fn spawn() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app()).await.unwrap() });
    format!("http://{addr}")
}

pub async fn client() -> HTTPClient {
    HTTPClient::new(ClientConfig::default().with_base_url(&spawn().await)).unwrap()
}

pub fn client_for(config: ClientConfig) -> HTTPClient { HTTPClient::new(config).unwrap() }

/// A base URL nothing listens on.
pub fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

fn not_found(detail: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
}

async fn inspect(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "content_type": header_str(&headers, header::CONTENT_TYPE),
        "accept": header_str(&headers, header::ACCEPT),
        "x_client": headers.get("x-client").and_then(|v| v.to_str().ok()),
        "body": String::from_utf8_lossy(&body),
    }))
}

struct UploadedParts {
    file_name: Option<String>,
    file_content: Option<String>,
    url: Option<String>,
}

async fn read_parts(mut multipart: Multipart) -> UploadedParts {
    let mut parts = UploadedParts { file_name: None, file_content: None, url: None };
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("file") => {
                parts.file_name = field.file_name().map(str::to_owned);
                parts.file_content = Some(field.text().await.unwrap());
            }
            Some("url") => parts.url = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    parts
}

async fn upload_html(headers: HeaderMap, multipart: Multipart) -> Response {
    let content_type = header_str(&headers, header::CONTENT_TYPE).unwrap_or_default();
    let parts = read_parts(multipart).await;
    if parts.file_content.is_none() && parts.url.is_none() {
        return (StatusCode::BAD_REQUEST, Json(json!({"detail": "file or url required"})))
            .into_response();
    }
    let mut text_blocks = Vec::new();
    if let Some(content) = parts.file_content {
        text_blocks.push(content);
    }
    if let Some(url) = parts.url {
        text_blocks.push(format!("url:{url}"));
    }
    Json(json!({
        "title": parts.file_name.unwrap_or_else(|| String::from("page from url")),
        "structure": [{"tag": "html", "children": []}],
        "text_blocks": text_blocks,
        "message": content_type,
    }))
    .into_response()
}

async fn upload_generate_prd(multipart: Multipart) -> Json<Value> {
    let parts = read_parts(multipart).await;
    Json(json!({
        "prd_text": format!("PRD from {}", parts.file_name.unwrap_or_default()),
        "status": "success",
    }))
}

async fn upload_extract_knowledge(multipart: Multipart) -> Json<Value> {
    let parts = read_parts(multipart).await;
    Json(json!({
        "graph": {"nodes": [{"data": {"id": "file", "label": parts.file_name.unwrap_or_default()}}]},
        "status": "success",
    }))
}

async fn upload_list() -> Json<Value> {
    Json(json!({"files": [{"filename": "a.html", "size": 12, "modified": "2024-05-01T12:00:00"}]}))
}

async fn prd_list() -> Json<Value> {
    Json(json!({"prds": [
        {"id": "1", "title": "Older", "created_at": "2024-04-01T08:00:00"},
        {"id": "2", "title": "Newer", "created_at": CREATED_AT},
    ]}))
}

async fn prd_generate(Json(input): Json<Value>) -> Response {
    if let Some(url) = input.get("reference_url").and_then(Value::as_str) {
        return Json(json!({"prd_text": format!("PRD for {url}"), "status": "success"}))
            .into_response();
    }
    if let Some(title) = input.pointer("/reference_info/title").and_then(Value::as_str) {
        return Json(json!({"prd_text": format!("PRD for {title}"), "status": "success"}))
            .into_response();
    }
    if let Some(title) = input.get("title") {
        return Json(json!({"id": 1, "title": title})).into_response();
    }
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": "reference url or info required"})))
        .into_response()
}

async fn prd_save(Json(input): Json<Value>) -> Json<Value> {
    Json(json!({"id": "1", "title": input["title"], "created_at": CREATED_AT}))
}

async fn prd_get(Path(id): Path<String>) -> Response {
    if id != "1" {
        return not_found("not found");
    }
    Json(json!({"id": "1", "title": "Landing page", "content": "# Landing page", "created_at": CREATED_AT}))
        .into_response()
}

async fn prd_delete(Path(id): Path<String>) -> Response {
    if id != "1" {
        return not_found("not found");
    }
    Json(json!({"message": "PRD deleted"})).into_response()
}

async fn prd_download(Path(id): Path<String>) -> Response {
    if id != "1" {
        return not_found("not found");
    }
    ([(header::CONTENT_TYPE, "application/json")], PRD_DOCUMENT).into_response()
}

async fn knowledge_list() -> Json<Value> {
    Json(json!({"knowledge_graphs": [{"id": "k1", "name": "Basics", "created_at": CREATED_AT}]}))
}

async fn knowledge_extract(Json(input): Json<Value>) -> Json<Value> {
    let label = input["reference_url"].as_str().unwrap_or("reference").to_owned();
    Json(json!({
        "graph": {"nodes": [
            {"data": {"id": "chapter1", "label": label, "category": "media-block", "placementHint": "main-content"}}
        ]},
        "status": "success",
    }))
}

async fn knowledge_save(Json(input): Json<Value>) -> Json<Value> {
    let nodes = input.pointer("/graph/nodes").and_then(Value::as_array).map_or(0, Vec::len);
    Json(json!({"id": format!("k{nodes}"), "name": input["name"], "created_at": CREATED_AT}))
}

async fn knowledge_get(Path(id): Path<String>) -> Response {
    if id != "k1" {
        return not_found("知识图谱未找到");
    }
    Json(json!({
        "id": "k1",
        "name": "Basics",
        "graph": {"nodes": [{"data": {"id": "chapter1", "label": "Text basics"}}]},
        "created_at": CREATED_AT,
    }))
    .into_response()
}

async fn knowledge_delete(Path(id): Path<String>) -> Response {
    if id != "k1" {
        return not_found("知识图谱未找到");
    }
    Json(json!({"message": "knowledge graph deleted"})).into_response()
}

async fn knowledge_download(Path(id): Path<String>) -> Response {
    if id != "k1" {
        return not_found("知识图谱未找到");
    }
    ([(header::CONTENT_TYPE, "application/json")], "{\"id\": \"k1\"}").into_response()
}

async fn learning_content(Json(input): Json<Value>) -> Json<Value> {
    Json(json!({
        "topic_id": input["id"],
        "title": input["label"],
        "levels": [{"level": 1, "type": input["type"], "elements": input["select_element"]}],
    }))
}

async fn test_task(Json(input): Json<Value>) -> Json<Value> {
    Json(json!({
        "topic_id": input["topic_id"],
        "title": "Exercise",
        "description_md": if input.get("learning_content").is_some() { "# With content" } else { "# Plain" },
        "start_code": {"index.html": "<html></html>"},
        "checkpoints": [{"id": 1, "desc": "has h1"}],
        "answer": {"index.html": "<html><h1>Hi</h1></html>"},
    }))
}

async fn execute(Json(input): Json<Value>) -> Response {
    if input.pointer("/prd/title").is_none() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"type": "missing", "loc": ["body", "prd", "title"], "msg": "Field required"}]})),
        )
            .into_response();
    }
    Json(json!({"task_id": "task-42", "files": ["index.html", "style.css"], "status": "success"}))
        .into_response()
}

async fn task_status(Path(task_id): Path<String>) -> Response {
    if task_id != "task-42" {
        return not_found("任务未找到");
    }
    Json(json!({"task_id": task_id, "status": "success", "message": "done", "files": ["index.html"]}))
        .into_response()
}

async fn task_download(Path(task_id): Path<String>) -> Response {
    if task_id != "task-42" {
        return not_found("任务未找到");
    }
    ([(header::CONTENT_TYPE, "application/zip")], ZIP_BYTES).into_response()
}

async fn preview(Path(task_id): Path<String>) -> Html<String> {
    Html(format!("<html><body>{task_id}</body></html>"))
}

async fn preview_file(Path((task_id, file_path)): Path<(String, String)>) -> Response {
    ([(header::CONTENT_TYPE, "text/css")], format!("/* {task_id}:{file_path} */")).into_response()
}

fn log_entry(task_id: &str) -> Value {
    json!({"task_id": task_id, "timestamp": CREATED_AT, "files": ["index.html", "style.css"], "status": "success"})
}

async fn logs_list() -> Json<Value> {
    Json(json!({"logs": [log_entry("task-42"), log_entry("task-41")]}))
}

async fn log_detail(Path(task_id): Path<String>) -> Response {
    if task_id != "task-42" {
        return not_found("Log not found");
    }
    Json(log_entry(&task_id)).into_response()
}

async fn log_delete(Path(task_id): Path<String>) -> Response {
    if task_id != "task-42" {
        return not_found("Log not found");
    }
    Json(json!({"message": "Log deleted successfully"})).into_response()
}

async fn fail(Path(status): Path<u16>) -> Response {
    let status = StatusCode::from_u16(status).unwrap();
    (status, Json(json!({"detail": format!("failure {}", status.as_u16())}))).into_response()
}

async fn plain_error() -> Response {
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

async fn validation() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"detail": [{"type": "missing", "loc": ["body", "title"], "msg": "Field required", "input": {}}]})),
    )
        .into_response()
}

async fn slow() -> &'static str {
    tokio::time::sleep(SLOW_ROUTE_DELAY).await;
    "late"
}

async fn broken_json() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response()
}

/// Sends the first chunk of an archive, then stalls for [`SLOW_ROUTE_DELAY`].
async fn stalled_download() -> Response {
    let first = stream::once(async { Ok::<_, Infallible>(Bytes::from_static(b"partial")) });
    let rest = stream::once(async {
        tokio::time::sleep(SLOW_ROUTE_DELAY).await;
        Ok::<_, Infallible>(Bytes::from_static(b" rest"))
    });
    ([(header::CONTENT_TYPE, "application/zip")], Body::from_stream(first.chain(rest))).into_response()
}
