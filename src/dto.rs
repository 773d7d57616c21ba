//! # Mood Journal: CMS wire shapes
//!
//! Request and response bodies exchanged with the Strapi REST API.
//!
//! Conventions:
//! - `*Request`  → serialized into a request body
//! - `*Response` → deserialized from a response body
//! - Entry payloads always carry the backend mood keyword, never the emoji

use serde::{Deserialize, Serialize};

use crate::models::BackendMood;

// ============================================================================
// Common
// ============================================================================

/// Strapi wraps entry bodies in `{"data": ...}` both ways.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Strapi error envelope: `{"error": {"status", "name", "message"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Message from a Strapi error body, or `fallback` when the body is missing,
/// not JSON, or has no message.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

// ============================================================================
// Auth
// ============================================================================

/// POST auth/local/register
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// POST auth/local
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

// ============================================================================
// Mood entries
// ============================================================================

/// Body of POST mood-entries and PUT mood-entries/{id}, inside `data`.
#[derive(Debug, Serialize)]
pub struct EntryPayload<'a> {
    pub note: &'a str,
    pub mood: BackendMood,
    pub date: &'a str,
}
