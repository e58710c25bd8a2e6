use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{error::AppResult, models::Movie};

const CACHE_VERSION: u32 = 1;

/// On-disk cache of discover results, one entry per year. The whole file
/// is loaded and rewritten wholesale; entries are never updated in place.
#[derive(Debug, Serialize, Deserialize)]
pub struct MovieCache {
    version: u32,
    years: BTreeMap<String, Vec<Movie>>,
}

impl Default for MovieCache {
    fn default() -> Self {
        Self { version: CACHE_VERSION, years: BTreeMap::new() }
    }
}

impl MovieCache {
    /// Loads the cache from disk. A missing, unreadable, corrupt or
    /// version-mismatched file yields an empty cache; cache misses are
    /// never an error, only a reason to hit the network again.
    pub fn open(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str::<MovieCache>(&contents) {
            Ok(cache) if cache.version == CACHE_VERSION => cache,
            Ok(cache) => {
                warn!(
                    found = cache.version,
                    expected = CACHE_VERSION,
                    "cache version mismatch, starting empty"
                );
                Self::default()
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable cache file, starting empty");
                Self::default()
            },
        }
    }

    /// Serializes the whole cache and atomically replaces the file.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn get(&self, year: i16) -> Option<&[Movie]> {
        self.years.get(&year.to_string()).map(|v| v.as_slice())
    }

    pub fn insert(&mut self, year: i16, movies: Vec<Movie>) {
        self.years.insert(year.to_string(), movies);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }
}
