pub mod clipboard;
pub mod health;
pub mod metrics;
pub mod notes;
pub mod todos;

use actix_web::{web, HttpResponse};

use crate::error::{HubError, HubResult};

/// Request bodies larger than this are rejected as malformed
const MAX_JSON_BODY: usize = 4 * 1024 * 1024;

/// JSON bodies are accepted whatever the Content-Type, and decode failures
/// come back as `{"error": ...}` with 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY)
        .content_type_required(false)
        .error_handler(|err, _req| HubError::BadRequest(err.to_string()).into())
}

/// Query strings that fail to decode get the same `{"error": ...}` 400
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| HubError::BadRequest(err.to_string()).into())
}

/// Fallback for write endpoints hit with the wrong method
async fn post_only() -> HubResult<HttpResponse> {
    Err(HubError::MethodNotAllowed("POST only".to_string()))
}
