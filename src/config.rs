use std::{net::SocketAddr, ops::RangeInclusive};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub database_url: String,
    pub cache_file: String,
    pub start_year: i16,
    pub end_year: i16,
    pub tmdb_rps: u32,
    pub tmdb_max_pages: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let tmdb_api_key = std::env::var("TMDB_API_KEY").context("TMDB_API_KEY")?;
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let cache_file =
            std::env::var("CACHE_FILE").unwrap_or_else(|_| "movies_cache.json".to_string());

        let start_year: i16 =
            std::env::var("START_YEAR").ok().and_then(|s| s.parse().ok()).unwrap_or(2016);
        let end_year: i16 =
            std::env::var("END_YEAR").ok().and_then(|s| s.parse().ok()).unwrap_or(2020);
        anyhow::ensure!(start_year <= end_year, "START_YEAR must not exceed END_YEAR");

        let tmdb_rps: u32 =
            std::env::var("TMDB_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(4);

        // TMDB itself never serves more than 500 pages per query.
        let tmdb_max_pages: u32 =
            std::env::var("TMDB_MAX_PAGES").ok().and_then(|s| s.parse().ok()).unwrap_or(500);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            tmdb_base_url,
            database_url,
            cache_file,
            start_year,
            end_year,
            tmdb_rps,
            tmdb_max_pages,
        })
    }

    pub fn years(&self) -> RangeInclusive<i16> {
        self.start_year..=self.end_year
    }
}
