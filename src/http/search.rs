use crate::http::views::SessionView;
use crate::services::{SearchService, SearchServiceError};
use crate::types::SessionId;
use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path};
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

impl ResponseError for SearchServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            SearchServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Serialize)]
struct CreatedSession {
    session_id: SessionId,
}

#[derive(Deserialize)]
pub(crate) struct SearchRequest {
    query: String,
}

pub(crate) async fn create_session(search_service: Data<SearchService>) -> HttpResponse {
    let session_id = search_service.create_session();

    HttpResponse::Created().json(CreatedSession { session_id })
}

pub(crate) async fn submit_search(
    search_service: Data<SearchService>,
    session_id: Path<Uuid>,
    request: Json<SearchRequest>,
) -> Result<HttpResponse, SearchServiceError> {
    let session_id = session_id.into_inner().into();
    let state = search_service
        .submit(&session_id, &request.query)
        .map_err(|error| {
            warn!(?error, "Unable to submit search");
            error
        })?;

    Ok(HttpResponse::Accepted().json(SessionView::from(&state)))
}

pub(crate) async fn get_session(
    search_service: Data<SearchService>,
    session_id: Path<Uuid>,
) -> Result<HttpResponse, SearchServiceError> {
    let state = search_service.state(&session_id.into_inner().into())?;

    Ok(HttpResponse::Ok().json(SessionView::from(&state)))
}

pub(crate) async fn delete_session(
    search_service: Data<SearchService>,
    session_id: Path<Uuid>,
) -> Result<HttpResponse, SearchServiceError> {
    search_service.close_session(&session_id.into_inner().into())?;

    Ok(HttpResponse::NoContent().finish())
}
