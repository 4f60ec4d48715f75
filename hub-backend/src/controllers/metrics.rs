use actix_web::{web, HttpResponse, Responder};

use crate::metrics;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/metrics").route(web::get().to(get_metrics)));
}

async fn get_metrics() -> impl Responder {
    HttpResponse::Ok().json(metrics::snapshot())
}
