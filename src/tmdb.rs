use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::debug;

use crate::{error::AppResult, models::NewMovie};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Client for the TMDB v3 API. The API key travels in the query string, so
/// every error is stripped of its URL before it leaves this module.
pub struct TmdbClient {
    client: wreq::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: wreq::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
        rps: u32,
    ) -> Self {
        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, api_key, base_url, image_base_url, limiter }
    }

    pub async fn search_movies(&self, title: &str) -> AppResult<Vec<SearchResult>> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        debug!(title = %title, "searching TMDB");

        let resp: SearchResponse = async {
            self.client
                .get(url)
                .query(&[("api_key", self.api_key.as_str()), ("query", title)])
                .send()
                .await?
                .error_for_status()?
                .json::<SearchResponse>()
                .await
        }
        .await
        .map_err(wreq::Error::without_uri)?;

        debug!(title = %title, count = resp.results.len(), "TMDB search finished");
        Ok(resp.results)
    }

    pub async fn movie_details(&self, tmdb_id: i32) -> AppResult<MovieDetails> {
        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        debug!(tmdb_id = tmdb_id, "fetching TMDB movie details");

        let details = async {
            self.client
                .get(url)
                .query(&[("api_key", self.api_key.as_str())])
                .send()
                .await?
                .error_for_status()?
                .json::<MovieDetails>()
                .await
        }
        .await
        .map_err(wreq::Error::without_uri)?;

        Ok(details)
    }

    pub fn to_new_movie(&self, details: MovieDetails) -> NewMovie {
        new_movie(details, &self.image_base_url)
    }
}

pub fn new_movie(details: MovieDetails, image_base_url: &str) -> NewMovie {
    let release_date = details.release_date.unwrap_or_default();
    NewMovie {
        img_url: poster_url(image_base_url, details.poster_path.as_deref()),
        title: details.title,
        year: parse_year(&release_date),
        release_date,
        description: details.overview.unwrap_or_default(),
        rating: round_rating(details.vote_average),
    }
}

/// Joins the CDN base with a poster path. A missing path is not an error; it
/// just yields a URL with nothing to show.
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> String {
    format!("{}{}", image_base_url.trim_end_matches('/'), poster_path.unwrap_or_default())
}

/// Rounds `vote_average * 10` to the nearest integer and scales back, giving
/// one decimal place (8.25 -> 8.3). Ties resolve away from zero, but only
/// values whose tenfold is an exact binary half are true ties.
pub fn round_rating(vote_average: f64) -> f64 {
    (vote_average * 10.0).round() / 10.0
}

/// Year of a `YYYY-MM-DD` release date; TMDB sends an empty string when the
/// date is unknown.
pub fn parse_year(release_date: &str) -> Option<i32> {
    release_date.trim().parse::<jiff::civil::Date>().ok().map(|d| i32::from(d.year()))
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResult {
    pub id: i32,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

impl SearchResult {
    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub poster_path: Option<String>,
}
