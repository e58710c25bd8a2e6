use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A single movie as returned by the TMDB discover endpoint. Immutable
/// after construction; the same shape is used for the cache file and as
/// the source of the relational rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: String,
    pub genre_id: i32,
    pub overview: String,
}

impl Movie {
    /// Short human-readable form for logs: `title (release_date) genre_id`.
    pub fn summary(&self) -> String {
        format!("{} ({}) {}", self.title, self.release_date, self.genre_id)
    }

    /// Year component of the release date, parsed as a calendar date.
    /// TMDB occasionally returns an empty or partial date; those yield `None`.
    pub fn release_year(&self) -> Option<i16> {
        self.release_date.parse::<Date>().ok().map(|d| d.year())
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub year: Option<i16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(release_date: &str) -> Movie {
        Movie {
            id: 603,
            title: "The Matrix".to_string(),
            release_date: release_date.to_string(),
            genre_id: 878,
            overview: "A hacker learns the truth.".to_string(),
        }
    }

    #[test]
    fn summary_format() {
        assert_eq!(movie("1999-03-31").summary(), "The Matrix (1999-03-31) 878");
    }

    #[test]
    fn release_year_parses_full_dates() {
        assert_eq!(movie("1999-03-31").release_year(), Some(1999));
    }

    #[test]
    fn release_year_rejects_empty_and_partial_dates() {
        assert_eq!(movie("").release_year(), None);
        assert_eq!(movie("1999").release_year(), None);
        assert_eq!(movie("not a date").release_year(), None);
    }
}
