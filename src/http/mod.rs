mod health;
mod search;
mod views;

use actix_web::web;

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health::health_check)))
        .service(web::resource("/sessions").route(web::post().to(search::create_session)))
        .service(
            web::resource("/sessions/{session_id}")
                .route(web::get().to(search::get_session))
                .route(web::delete().to(search::delete_session)),
        )
        .service(
            web::resource("/sessions/{session_id}/search")
                .route(web::post().to(search::submit_search)),
        );
}

#[cfg(test)]
mod tests;
