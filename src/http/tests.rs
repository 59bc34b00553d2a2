use super::configure;
use crate::http::views::NOTHING_FOUND;
use crate::services::SearchService;
use crate::types::SessionId;
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{test, App};
use async_trait::async_trait;
use itunes_catalog::Url;
use search_session::{CatalogFetcher, FetchError, SearchState};
use serde_json::{json, Value};
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const BEATLES_RESULTS: &str = r#"{
    "resultCount": 2,
    "results": [
        {"kind": "song", "trackName": "Yesterday", "artistName": "The Beatles",
         "trackPrice": 1.29, "currency": "USD", "primaryGenreName": "Rock",
         "trackViewUrl": "https://music.apple.com/us/album/yesterday/1",
         "artworkUrl60": "https://example.com/60.jpg", "artworkUrl100": "https://example.com/100.jpg"},
        {"kind": "album", "collectionName": "Abbey Road", "artistName": "The Beatles",
         "collectionPrice": 12.99, "currency": "USD",
         "collectionViewUrl": "https://music.apple.com/us/album/abbey-road/2"}
    ]
}"#;

struct CatalogMock;

#[async_trait]
impl CatalogFetcher for CatalogMock {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let term = url
            .query_pairs()
            .find(|(key, _)| key == "term")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        match term.as_str() {
            "beatles" => Ok(BEATLES_RESULTS.into()),
            "offline" => Err(FetchError(Box::new(Error::new(
                ErrorKind::TimedOut,
                "operation timed out",
            )))),
            _ => Ok(r#"{"resultCount":0,"results":[]}"#.into()),
        }
    }
}

fn search_service_with_ttl(session_ttl: Duration) -> Data<SearchService> {
    Data::new(SearchService::new(
        Arc::new(CatalogMock),
        Url::parse("https://itunes.apple.com/search").unwrap(),
        session_ttl,
    ))
}

fn search_service() -> Data<SearchService> {
    search_service_with_ttl(Duration::from_secs(1800))
}

async fn settled_state(search_service: &SearchService, session_id: &SessionId) -> SearchState {
    for _ in 0..100 {
        let state = search_service.state(session_id).unwrap();
        if !state.is_loading() {
            return state;
        }
        actix_rt::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("Search did not complete in time");
}

#[actix_web::test]
async fn should_report_health() {
    let search_service = search_service();
    search_service.create_session();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(json!(1), body["sessions"]);
}

#[actix_web::test]
async fn should_create_idle_session() {
    let search_service = search_service();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    let req = test::TestRequest::post().uri("/sessions").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::CREATED, resp.status());

    let body: Value = test::read_body_json(resp).await;
    let session_id = body["session_id"].as_str().expect("Expected session id");

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{}", session_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(json!({"status": "idle", "rows": []}), body);
}

#[actix_web::test]
async fn should_ignore_blank_query() {
    let search_service = search_service();
    let session_id = search_service.create_session();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{}/search", session_id))
        .set_json(json!({"query": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(StatusCode::ACCEPTED, resp.status());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(json!("idle"), body["status"]);
    assert_eq!(SearchState::Idle, search_service.state(&session_id).unwrap());
}

#[actix_web::test]
async fn should_render_populated_rows_in_name_order() {
    let search_service = search_service();
    let session_id = search_service.create_session();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{}/search", session_id))
        .set_json(json!({"query": "beatles"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json!("loading"), body["status"]);
    assert_eq!(json!("beatles"), body["query"]);

    settled_state(&search_service, &session_id).await;

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{}", session_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(json!("populated"), body["status"]);
    assert_eq!(
        json!({
            "name": "Abbey Road",
            "artist": "The Beatles",
            "type": "Album",
            "price": 12.99,
            "currency": "USD",
            "genre": "",
            "store_url": "https://music.apple.com/us/album/abbey-road/2",
            "image_small": "",
            "image_large": "",
            "selectable": true
        }),
        body["rows"][0]
    );
    assert_eq!(json!("Yesterday"), body["rows"][1]["name"]);
    assert_eq!(json!("Song"), body["rows"][1]["type"]);
    assert_eq!(json!("Rock"), body["rows"][1]["genre"]);
    assert_eq!(json!("https://example.com/60.jpg"), body["rows"][1]["image_small"]);
}

#[actix_web::test]
async fn should_render_nothing_found_row_for_empty_results() {
    let search_service = search_service();
    let session_id = search_service.create_session();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{}/search", session_id))
        .set_json(json!({"query": "zzzznonexistentzzzz"}))
        .to_request();
    test::call_service(&app, req).await;

    settled_state(&search_service, &session_id).await;

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{}", session_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(json!("empty"), body["status"]);
    assert_eq!(1, body["rows"].as_array().unwrap().len());
    assert_eq!(json!(NOTHING_FOUND), body["rows"][0]["name"]);
    assert_eq!(json!(""), body["rows"][0]["artist"]);
    assert_eq!(json!(false), body["rows"][0]["selectable"]);
}

#[actix_web::test]
async fn should_render_generic_message_on_failure() {
    let search_service = search_service();
    let session_id = search_service.create_session();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{}/search", session_id))
        .set_json(json!({"query": "offline"}))
        .to_request();
    test::call_service(&app, req).await;

    settled_state(&search_service, &session_id).await;

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{}", session_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        json!({
            "status": "failed",
            "query": "offline",
            "rows": [],
            "message": "Could not complete the search. Please try again."
        }),
        body
    );
}

#[actix_web::test]
async fn should_answer_not_found_for_unknown_session() {
    let search_service = search_service();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;
    let unknown = Uuid::new_v4();

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{}", unknown))
        .to_request();
    assert_eq!(StatusCode::NOT_FOUND, test::call_service(&app, req).await.status());

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{}/search", unknown))
        .set_json(json!({"query": "beatles"}))
        .to_request();
    assert_eq!(StatusCode::NOT_FOUND, test::call_service(&app, req).await.status());
}

#[actix_web::test]
async fn should_close_session() {
    let search_service = search_service();
    let session_id = search_service.create_session();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/sessions/{}", session_id))
        .to_request();
    assert_eq!(StatusCode::NO_CONTENT, test::call_service(&app, req).await.status());

    let req = test::TestRequest::delete()
        .uri(&format!("/sessions/{}", session_id))
        .to_request();
    assert_eq!(StatusCode::NOT_FOUND, test::call_service(&app, req).await.status());
    assert_eq!(0, search_service.sessions_count());
}

#[actix_web::test]
async fn should_answer_not_found_for_expired_session() {
    let search_service = search_service_with_ttl(Duration::from_millis(50));
    let session_id = search_service.create_session();
    let app =
        test::init_service(App::new().app_data(search_service.clone()).configure(configure)).await;

    actix_rt::time::sleep(Duration::from_millis(150)).await;

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{}", session_id))
        .to_request();
    assert_eq!(StatusCode::NOT_FOUND, test::call_service(&app, req).await.status());

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{}/search", session_id))
        .set_json(json!({"query": "beatles"}))
        .to_request();
    assert_eq!(StatusCode::NOT_FOUND, test::call_service(&app, req).await.status());
    assert_eq!(0, search_service.sessions_count());
}

#[actix_web::test]
async fn should_drop_expired_sessions_when_creating_new_ones() {
    let search_service = search_service_with_ttl(Duration::from_millis(50));
    search_service.create_session();
    search_service.create_session();

    actix_rt::time::sleep(Duration::from_millis(150)).await;

    let session_id = search_service.create_session();

    assert_eq!(1, search_service.sessions_count());
    assert_eq!(SearchState::Idle, search_service.state(&session_id).unwrap());
}

#[actix_web::test]
async fn should_keep_session_alive_while_it_is_used() {
    let search_service = search_service_with_ttl(Duration::from_millis(600));
    let session_id = search_service.create_session();

    for _ in 0..3 {
        actix_rt::time::sleep(Duration::from_millis(300)).await;
        assert!(search_service.state(&session_id).is_ok());
    }

    assert_eq!(1, search_service.sessions_count());
}
