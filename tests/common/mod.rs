#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE, header::USER_AGENT},
    response::{IntoResponse, Response},
    routing::get,
};
use http_body_util::BodyExt;
use reelrank::{
    AppState, db, models::NewMovie, store::MovieStore, tmdb::TmdbClient,
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";
pub const IMAGE_BASE_URL: &str = "https://images.test/t/p/original";

/// A router wired to an in-memory store and a local stand-in for TMDB.
pub struct TestApp {
    pub router: Router,
    pub store: MovieStore,
    pub tmdb: FakeTmdb,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_api_key(API_KEY).await
    }

    /// Any key other than [`API_KEY`] makes the fake TMDB answer 401.
    pub async fn with_api_key(api_key: &str) -> Self {
        let store = memory_store().await;
        let tmdb = FakeTmdb::spawn().await;

        let client = tmdb.client(api_key);
        let router =
            reelrank::router(Arc::new(AppState { store: store.clone(), tmdb: client }));

        Self { router, store, tmdb }
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }
}

pub async fn memory_store() -> MovieStore {
    let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    MovieStore::new(db)
}

pub fn new_movie(title: &str, rating: f64) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: Some(2000),
        release_date: "2000-01-01".to_string(),
        description: format!("About {title}"),
        rating,
        img_url: format!("{IMAGE_BASE_URL}/{title}.jpg"),
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers().get("location").unwrap().to_str().unwrap()
}

/// Serves `/search/movie` and `/movie/{id}` from a fixed catalog, counting
/// accepted searches and remembering the last caller's user agent.
pub struct FakeTmdb {
    pub base_url: String,
    seen: Arc<Seen>,
}

#[derive(Default)]
struct Seen {
    searches: AtomicUsize,
    user_agent: Mutex<Option<String>>,
}

impl FakeTmdb {
    pub async fn spawn() -> Self {
        let seen = Arc::new(Seen::default());
        let app = Router::new()
            .route("/search/movie", get(search))
            .route("/movie/{id}", get(details))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{addr}"), seen }
    }

    pub fn client(&self, api_key: &str) -> TmdbClient {
        TmdbClient::new(
            reelrank::http_client().unwrap(),
            api_key.to_string(),
            self.base_url.clone(),
            IMAGE_BASE_URL.to_string(),
            100,
        )
    }

    pub fn searches(&self) -> usize {
        self.seen.searches.load(Ordering::SeqCst)
    }

    pub fn last_user_agent(&self) -> Option<String> {
        self.seen.user_agent.lock().unwrap().clone()
    }
}

fn catalog() -> Vec<Value> {
    vec![
        json!({
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "overview": "A ticking-time-bomb insomniac and a soap salesman.",
            "vote_average": 8.433,
            "poster_path": "/fight.jpg"
        }),
        json!({
            "id": 42,
            "title": "X",
            "release_date": "2022-03-18",
            "overview": "A film crew rents a farmhouse.",
            "vote_average": 8.25,
            "poster_path": "/x.jpg"
        }),
        json!({
            "id": 13,
            "title": "Forrest Gump",
            "release_date": "1994-06-23",
            "overview": "Life is like a box of chocolates.",
            "vote_average": 8.5,
            "poster_path": null
        }),
    ]
}

fn unauthorized(params: &HashMap<String, String>) -> Option<Response> {
    (params.get("api_key").map(String::as_str) != Some(API_KEY)).then(|| {
        (StatusCode::UNAUTHORIZED, Json(json!({ "status_message": "Invalid API key" })))
            .into_response()
    })
}

fn record_user_agent(seen: &Seen, headers: &HeaderMap) {
    let agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok()).map(str::to_string);
    *seen.user_agent.lock().unwrap() = agent;
}

async fn search(
    State(seen): State<Arc<Seen>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record_user_agent(&seen, &headers);
    if let Some(resp) = unauthorized(&params) {
        return resp;
    }
    seen.searches.fetch_add(1, Ordering::SeqCst);

    let query = params.get("query").cloned().unwrap_or_default().to_lowercase();
    let results: Vec<Value> = catalog()
        .into_iter()
        .filter(|m| m["title"].as_str().unwrap_or_default().to_lowercase().contains(&query))
        .collect();

    Json(json!({ "page": 1, "total_results": results.len(), "results": results }))
        .into_response()
}

async fn details(
    State(seen): State<Arc<Seen>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record_user_agent(&seen, &headers);
    if let Some(resp) = unauthorized(&params) {
        return resp;
    }

    match catalog().into_iter().find(|m| m["id"] == id) {
        Some(movie) => Json(movie).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status_message": "The resource you requested could not be found." })),
        )
            .into_response(),
    }
}
