/// Genre id used when a movie arrives with no genres at all.
pub const UNDEFINED_GENRE_ID: i32 = 0;

/// The fixed genre dimension: TMDB's nineteen movie genres plus the
/// "Undefined" sentinel. Every movie row is expected to carry one of
/// these ids; the aggregation initializes its counts from this table.
pub const GENRES: [(i32, &str); 20] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
    (UNDEFINED_GENRE_ID, "Undefined"),
];

pub fn name_for(id: i32) -> Option<&'static str> {
    GENRES.iter().find(|(gid, _)| *gid == id).map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn dimension_has_twenty_distinct_ids() {
        let ids: HashSet<i32> = GENRES.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn known_ids_resolve() {
        assert_eq!(name_for(18), Some("Drama"));
        assert_eq!(name_for(878), Some("Science Fiction"));
        assert_eq!(name_for(UNDEFINED_GENRE_ID), Some("Undefined"));
    }

    #[test]
    fn unknown_id_is_none() {
        assert_eq!(name_for(424242), None);
    }
}
