//! Notes REST API
//!
//! GET /notes lists every note (titles only), GET /notes?slug= reads one,
//! POST /notes/save creates or overwrites.

use actix_web::{web, HttpResponse};
use hub_types::SaveNoteRequest;
use serde::Deserialize;

use super::post_only;
use crate::error::HubResult;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/notes").route(web::get().to(list_or_read)))
        .service(
            web::resource("/notes/save")
                .route(web::post().to(save_note))
                .default_service(web::route().to(post_only)),
        );
}

#[derive(Debug, Deserialize)]
struct NotesQuery {
    slug: Option<String>,
}

async fn list_or_read(
    state: web::Data<AppState>,
    query: web::Query<NotesQuery>,
) -> HubResult<HttpResponse> {
    match query.slug.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => {
            let note = state.notes.get(slug)?;
            Ok(HttpResponse::Ok().json(note))
        }
        None => Ok(HttpResponse::Ok().json(state.notes.list())),
    }
}

async fn save_note(
    state: web::Data<AppState>,
    body: web::Json<SaveNoteRequest>,
) -> HubResult<HttpResponse> {
    let req = body.into_inner();
    let note = state.notes.save(req.slug.as_deref(), &req.title, &req.body)?;
    Ok(HttpResponse::Ok().json(note))
}
