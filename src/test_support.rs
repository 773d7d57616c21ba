//! In-process stand-in for the Strapi API, served by axum on an ephemeral
//! port. Only the routes and behaviors the client relies on are modeled.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::config::Config;

pub const STUB_JWT: &str = "stub-jwt";
pub const STUB_USERNAME: &str = "sam";
pub const STUB_PASSWORD: &str = "correct-horse";

#[derive(Clone, Default)]
pub struct StubState {
    pub hits: Arc<AtomicUsize>,
    pub entries: Arc<Mutex<Vec<Value>>>,
    pub last_body: Arc<Mutex<Option<Value>>>,
    pub last_query: Arc<Mutex<Option<String>>>,
    /// When set, `users/me` answers 500.
    pub fail_me: Arc<Mutex<bool>>,
    next_id: Arc<AtomicUsize>,
}

impl StubState {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn seed_entry(&self, note: &str, mood: &str, date: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        self.entries.lock().unwrap().push(json!({
            "id": id,
            "note": note,
            "mood": mood,
            "date": date,
            "createdAt": date,
            "updatedAt": date,
        }));
        id
    }

    pub fn stored_entries(&self) -> Vec<Value> {
        self.entries.lock().unwrap().clone()
    }

    pub fn set_fail_me(&self, fail: bool) {
        *self.fail_me.lock().unwrap() = fail;
    }
}

pub struct StubCms {
    pub config: Config,
    pub state: StubState,
}

pub async fn spawn_stub_cms() -> StubCms {
    let state = StubState::default();

    let app = Router::new()
        .route("/api/auth/local/register", post(register))
        .route("/api/auth/local", post(login))
        .route("/api/users/me", get(me))
        .route("/api/mood-entries", post(create_entry))
        .route("/api/mood-entries/:id", put(update_entry).delete(delete_entry))
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubCms {
        config: Config::new(format!("http://{}/api", addr)),
        state,
    }
}

async fn count_requests(State(state): State<StubState>, req: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = req.uri().query().map(str::to_string);
    next.run(req).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", STUB_JWT))
        .unwrap_or(false)
}

fn strapi_error(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "data": null,
        "error": { "status": status.as_u16(), "name": "ApplicationError", "message": message },
    });
    (status, Json(body)).into_response()
}

fn stub_user() -> Value {
    json!({
        "id": 1,
        "username": STUB_USERNAME,
        "email": "sam@example.com",
        "provider": "local",
        "confirmed": true,
        "blocked": false,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z",
    })
}

async fn register(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    *state.last_body.lock().unwrap() = Some(body.clone());
    if body["username"] == "taken" {
        return strapi_error(StatusCode::BAD_REQUEST, "Email or Username are already taken");
    }
    if body["password"].as_str().map(str::len).unwrap_or(0) < 6 {
        // no message: the client must fall back to its generic text
        return (StatusCode::BAD_REQUEST, "").into_response();
    }
    Json(json!({ "jwt": STUB_JWT, "user": stub_user() })).into_response()
}

async fn login(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    *state.last_body.lock().unwrap() = Some(body.clone());
    if body["identifier"] == STUB_USERNAME && body["password"] == STUB_PASSWORD {
        Json(json!({ "jwt": STUB_JWT, "user": stub_user() })).into_response()
    } else {
        strapi_error(StatusCode::BAD_REQUEST, "Invalid identifier or password")
    }
}

async fn me(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if *state.fail_me.lock().unwrap() {
        return strapi_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
    }
    if !authorized(&headers) {
        return strapi_error(StatusCode::UNAUTHORIZED, "Missing or invalid credentials");
    }
    let mut user = stub_user();
    if query.get("populate").map(String::as_str) == Some("mood_entries") {
        user["mood_entries"] = Value::Array(state.stored_entries());
    }
    Json(user).into_response()
}

async fn create_entry(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return strapi_error(StatusCode::FORBIDDEN, "Forbidden");
    }
    *state.last_body.lock().unwrap() = Some(body.clone());
    let data = &body["data"];
    if !matches!(data["mood"].as_str(), Some("happy" | "meh" | "sad")) {
        return strapi_error(StatusCode::BAD_REQUEST, "mood must be one of the following values: happy, meh, sad");
    }
    let id = state.seed_entry(
        data["note"].as_str().unwrap_or_default(),
        data["mood"].as_str().unwrap_or_default(),
        data["date"].as_str().unwrap_or_default(),
    );
    let created = state
        .stored_entries()
        .into_iter()
        .find(|e| e["id"] == id)
        .unwrap();
    Json(json!({ "data": created, "meta": {} })).into_response()
}

async fn update_entry(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return strapi_error(StatusCode::FORBIDDEN, "Forbidden");
    }
    *state.last_body.lock().unwrap() = Some(body.clone());
    let mut entries = state.entries.lock().unwrap();
    let Some(existing) = entries.iter_mut().find(|e| e["id"] == id) else {
        return strapi_error(StatusCode::NOT_FOUND, "Not Found");
    };
    for field in ["note", "mood", "date"] {
        existing[field] = body["data"][field].clone();
    }
    Json(json!({ "data": existing.clone(), "meta": {} })).into_response()
}

async fn delete_entry(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if !authorized(&headers) {
        return strapi_error(StatusCode::FORBIDDEN, "Forbidden");
    }
    let mut entries = state.entries.lock().unwrap();
    let before = entries.len();
    entries.retain(|e| e["id"] != id);
    if entries.len() == before {
        // bare 404 without a Strapi error body
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
