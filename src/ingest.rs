use std::{ops::RangeInclusive, path::Path};

use tracing::{debug, info};

use crate::{cache::MovieCache, error::AppResult, genres, store::MovieStore, tmdb::TmdbClient};

/// Runs the fetch → cache → persist pipeline for every year in the range,
/// strictly sequentially. Cached years skip the network entirely; fetched
/// years are written to the cache file before they are persisted. Any
/// failure aborts the remaining years.
pub async fn ingest_years(
    tmdb: &TmdbClient,
    store: &MovieStore,
    cache_path: &Path,
    years: RangeInclusive<i16>,
) -> AppResult<()> {
    let mut cache = MovieCache::open(cache_path);
    debug!(entries = cache.len(), "opened cache file");

    for year in years {
        let movies = match cache.get(year) {
            Some(cached) => {
                info!(year, count = cached.len(), "using cached movies");
                cached.to_vec()
            },
            None => {
                info!(year, "fetching movies from TMDB");
                let fetched = tmdb.discover_year(year).await?;
                cache.insert(year, fetched.clone());
                cache.save(cache_path)?;
                fetched
            },
        };

        if let Some(first) = movies.first() {
            debug!(
                year,
                sample = %first.summary(),
                genre = ?genres::name_for(first.genre_id),
                "first result for year"
            );
        }

        store.upsert_movies(&movies).await?;
        info!(year, count = movies.len(), "persisted movies");
    }

    Ok(())
}
