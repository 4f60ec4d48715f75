//! Clipboard endpoints: drop text on one device, pick it up on another.

use actix_web::{web, HttpResponse};
use hub_types::{SetClipboardRequest, SetClipboardResponse};
use serde::Deserialize;

use super::post_only;
use crate::error::{HubError, HubResult};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/clipboard/set")
            .route(web::post().to(set_clipboard))
            .default_service(web::route().to(post_only)),
    )
    .service(web::resource("/clipboard/get").route(web::get().to(get_clipboard)));
}

async fn set_clipboard(
    state: web::Data<AppState>,
    body: web::Json<SetClipboardRequest>,
) -> HubResult<HttpResponse> {
    let req = body.into_inner();
    let id = state.clipboard.set(&req.content, req.ttl);
    log::debug!("[CLIPBOARD] Stored {} ({} bytes, ttl {}s)", id, req.content.len(), req.ttl);
    Ok(HttpResponse::Ok().json(SetClipboardResponse { id }))
}

#[derive(Debug, Deserialize)]
struct GetQuery {
    id: Option<String>,
}

async fn get_clipboard(
    state: web::Data<AppState>,
    query: web::Query<GetQuery>,
) -> HubResult<HttpResponse> {
    let id = query
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| HubError::BadRequest("id required".to_string()))?;

    match state.clipboard.get(id) {
        Some(item) => Ok(HttpResponse::Ok().json(item)),
        None => Err(HubError::NotFound("not found or expired".to_string())),
    }
}
