use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::AppResult, genres::UNDEFINED_GENRE_ID, models::Movie};

/// Only well-rated movies are pulled in; this keeps the per-year result
/// sets small enough for the whole-file cache to stay reasonable.
const MIN_VOTE_AVERAGE: &str = "8.5";

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_pages: u32,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        rps: u32,
        max_pages: u32,
    ) -> Self {
        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, max_pages: max_pages.max(1), limiter }
    }

    /// Fetches every page of discover results for one year, in ascending
    /// page order, so the concatenated list keeps TMDB's popularity
    /// ranking. Any transport or parse failure propagates; there is no
    /// retry, only the shared client's request timeout.
    pub async fn discover_year(&self, year: i16) -> AppResult<Vec<Movie>> {
        let url = format!("{}/discover/movie", self.base_url.trim_end_matches('/'));

        let mut movies = Vec::new();
        let mut page: u32 = 1;

        loop {
            self.limiter.until_ready().await;

            let resp: DiscoverResponse = self
                .client
                .get(&url)
                .query(&[
                    ("api_key", self.api_key.as_str()),
                    ("language", "en-US"),
                    ("sort_by", "popularity.desc"),
                    ("include_adult", "false"),
                    ("include_video", "true"),
                    ("vote_average.gte", MIN_VOTE_AVERAGE),
                ])
                .query(&[("page", page)])
                .query(&[("year", year)])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let total_pages = resp.total_pages;
            movies.extend(resp.results.into_iter().map(Movie::from));
            debug!(year, page, total_pages, fetched = movies.len(), "fetched discover page");

            if page >= total_pages {
                break;
            }
            if page >= self.max_pages {
                warn!(year, total_pages, max_pages = self.max_pages, "stopping at page cap");
                break;
            }
            page += 1;
        }

        Ok(movies)
    }
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    results: Vec<DiscoverMovie>,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct DiscoverMovie {
    id: i64,
    title: String,
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    genre_ids: Vec<i32>,
    #[serde(default)]
    overview: String,
}

impl From<DiscoverMovie> for Movie {
    fn from(m: DiscoverMovie) -> Self {
        // Only the primary genre is kept; no genre at all maps to the
        // "Undefined" sentinel.
        let genre_id = m.genre_ids.first().copied().unwrap_or(UNDEFINED_GENRE_ID);
        Movie {
            id: m.id,
            title: m.title,
            release_date: m.release_date,
            genre_id,
            overview: m.overview,
        }
    }
}
