use crate::services::SearchService;
use actix_web::web::Data;
use actix_web::{HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct Health {
    version: &'static str,
    sessions: usize,
}

pub(crate) async fn health_check(search_service: Data<SearchService>) -> impl Responder {
    HttpResponse::Ok().json(Health {
        version: crate::VERSION,
        sessions: search_service.sessions_count(),
    })
}
