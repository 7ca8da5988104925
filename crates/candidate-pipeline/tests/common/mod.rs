#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

/// In-memory stand-in for the candidate backend and the outbound call service.
#[derive(Clone, Default)]
pub struct MockBackend {
    pub records: Arc<Mutex<Vec<Value>>>,
    pub put_bodies: Arc<Mutex<Vec<Value>>>,
    pub call_bodies: Arc<Mutex<Vec<Value>>>,
    pub list_status: Arc<Mutex<Option<StatusCode>>>,
    /// When set, the list route answers 200 with a plain-text body.
    pub list_plain_text: Arc<Mutex<bool>>,
    pub call_status: Arc<Mutex<Option<StatusCode>>>,
    /// When set, PUT responses report this id instead of the stored one.
    pub echo_id_override: Arc<Mutex<Option<Value>>>,
}

impl MockBackend {
    pub fn with_records(records: Vec<Value>) -> Self {
        let backend = Self::default();
        *backend.records.lock().expect("records mutex") = records;
        backend
    }

    pub fn fail_list_with(&self, status: StatusCode) {
        *self.list_status.lock().expect("status mutex") = Some(status);
    }

    pub fn serve_plain_text_list(&self) {
        *self.list_plain_text.lock().expect("list mutex") = true;
    }

    pub fn fail_calls_with(&self, status: StatusCode) {
        *self.call_status.lock().expect("status mutex") = Some(status);
    }

    pub fn echo_id(&self, id: Value) {
        *self.echo_id_override.lock().expect("override mutex") = Some(id);
    }

    pub fn put_bodies(&self) -> Vec<Value> {
        self.put_bodies.lock().expect("put mutex").clone()
    }

    pub fn call_bodies(&self) -> Vec<Value> {
        self.call_bodies.lock().expect("call mutex").clone()
    }

    pub async fn spawn(self) -> String {
        let app = Router::new()
            .route("/candidates/", get(list_handler))
            .route("/candidates/:id", get(get_handler).put(put_handler))
            .route("/outbound-call", post(call_handler))
            .with_state(self);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }
}

pub fn backend_record(id: u64, name: &str, position: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "summary": format!("{name} summary"),
        "position": position,
        "status": status,
        "phone_number": "+1 (555) 123-4567",
        "call_transcript": null
    })
}

/// Six candidates with statuses pending, pass, fail, pending, pass, pending.
pub fn six_candidates() -> Vec<Value> {
    vec![
        backend_record(1, "Ada Lovelace", "Frontend Developer", "pending"),
        backend_record(2, "Grace Hopper", "Data Scientist", "pass"),
        backend_record(3, "Alan Turing", "Frontend Developer", "fail"),
        backend_record(4, "Linus Torvalds", "Backend Developer", "pending"),
        backend_record(5, "Barbara Liskov", "Data Scientist", "pass"),
        backend_record(6, "Ken Thompson", "Product Manager", "pending"),
    ]
}

fn find_index(records: &[Value], id: &str) -> Option<usize> {
    records
        .iter()
        .position(|record| record["id"].to_string().trim_matches('"') == id)
}

async fn list_handler(State(backend): State<MockBackend>) -> Response {
    if let Some(status) = *backend.list_status.lock().expect("status mutex") {
        return (status, Json(json!({ "detail": "unavailable" }))).into_response();
    }
    if *backend.list_plain_text.lock().expect("list mutex") {
        return (StatusCode::OK, "service warming up").into_response();
    }
    let records = backend.records.lock().expect("records mutex").clone();
    Json(Value::Array(records)).into_response()
}

async fn get_handler(State(backend): State<MockBackend>, Path(id): Path<String>) -> Response {
    let records = backend.records.lock().expect("records mutex");
    match find_index(&records, &id) {
        Some(index) => Json(records[index].clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "not found" }))).into_response(),
    }
}

async fn put_handler(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    backend
        .put_bodies
        .lock()
        .expect("put mutex")
        .push(Value::Object(body.clone()));

    let mut records = backend.records.lock().expect("records mutex");
    let Some(index) = find_index(&records, &id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "not found" }))).into_response();
    };

    if let Some(record) = records[index].as_object_mut() {
        for (key, value) in body {
            record.insert(key, value);
        }
    }
    let mut response = records[index].clone();
    if let Some(id) = backend.echo_id_override.lock().expect("override mutex").clone() {
        response["id"] = id;
    }
    Json(response).into_response()
}

async fn call_handler(State(backend): State<MockBackend>, Json(body): Json<Value>) -> Response {
    backend.call_bodies.lock().expect("call mutex").push(body);
    match *backend.call_status.lock().expect("status mutex") {
        Some(status) => (status, Json(json!({ "success": false }))).into_response(),
        None => Json(json!({ "success": true })).into_response(),
    }
}
