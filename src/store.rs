use std::collections::BTreeMap;

use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};
use tracing::warn;

use crate::{
    entities::{genre, movie},
    error::AppResult,
    genres::GENRES,
    models::Movie,
};

/// Relational store for movies and the genre dimension.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Upserts the given movies keyed by id. Re-running for an already
    /// persisted year rewrites identical rows, so ingestion is idempotent.
    pub async fn upsert_movies(&self, movies: &[Movie]) -> AppResult<()> {
        if movies.is_empty() {
            return Ok(());
        }

        let rows = movies.iter().map(|m| movie::ActiveModel {
            id: Set(m.id),
            title: Set(m.title.clone()),
            genre_id: Set(m.genre_id),
            release_date: Set(m.release_date.clone()),
            overview: Set(m.overview.clone()),
        });

        movie::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::column(movie::Column::Id)
                    .update_columns([
                        movie::Column::Title,
                        movie::Column::GenreId,
                        movie::Column::ReleaseDate,
                        movie::Column::Overview,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    /// Counts movies per genre name for one release year. Every genre in
    /// the dimension is present in the result, zero included, so the
    /// chart always shows all twenty bars. The year comes from the parsed
    /// release date, not from a substring match over the raw text.
    pub async fn count_genres(&self, year: i16) -> AppResult<BTreeMap<String, i64>> {
        let mut counts: BTreeMap<String, i64> =
            GENRES.iter().map(|(_, name)| (name.to_string(), 0)).collect();

        let rows = movie::Entity::find().find_also_related(genre::Entity).all(&self.db).await?;

        for (movie, genre) in rows {
            let record = Movie {
                id: movie.id,
                title: movie.title,
                release_date: movie.release_date,
                genre_id: movie.genre_id,
                overview: movie.overview,
            };
            if record.release_year() != Some(year) {
                continue;
            }
            let Some(genre) = genre else {
                // No matching dimension row; the join would undercount
                // silently, so at least leave a trace.
                warn!(movie_id = record.id, genre_id = record.genre_id, "movie references unknown genre");
                continue;
            };
            if let Some(count) = counts.get_mut(&genre.name) {
                *count += 1;
            } else {
                warn!(movie_id = record.id, genre = %genre.name, "genre outside the fixed dimension");
            }
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_and_migrate;
    use sea_orm::PaginatorTrait;

    async fn test_store() -> MovieStore {
        MovieStore::new(connect_and_migrate("sqlite::memory:").await.unwrap())
    }

    fn movie(id: i64, title: &str, release_date: &str, genre_id: i32) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            release_date: release_date.to_string(),
            genre_id,
            overview: format!("Overview of {title}."),
        }
    }

    #[tokio::test]
    async fn counts_cover_the_whole_dimension() {
        let store = test_store().await;
        store
            .upsert_movies(&[
                movie(1, "A Drama", "2020-04-04", 18),
                movie(2, "Genreless", "2020-11-11", 0),
            ])
            .await
            .unwrap();

        let counts = store.count_genres(2020).await.unwrap();
        assert_eq!(counts.len(), 20);
        assert_eq!(counts["Drama"], 1);
        assert_eq!(counts["Undefined"], 1);
        assert_eq!(counts.values().sum::<i64>(), 2);
        assert!(counts.values().all(|&c| c >= 0));
    }

    #[tokio::test]
    async fn year_filter_uses_the_parsed_date() {
        let store = test_store().await;
        store
            .upsert_movies(&[
                // Title mentions 2020, released 1999; must not count for 2020.
                movie(1, "Vision 2020", "1999-01-01", 53),
                movie(2, "Actually 2020", "2020-03-15", 53),
                movie(3, "Dateless", "", 53),
            ])
            .await
            .unwrap();

        let counts = store.count_genres(2020).await.unwrap();
        assert_eq!(counts["Thriller"], 1);
        assert_eq!(counts.values().sum::<i64>(), 1);
    }

    #[tokio::test]
    async fn upsert_is_idempotent_and_replaces_by_id() {
        let store = test_store().await;
        let first = vec![movie(1, "Old Title", "2018-02-02", 35)];
        store.upsert_movies(&first).await.unwrap();
        store.upsert_movies(&first).await.unwrap();

        assert_eq!(movie::Entity::find().count(store.db()).await.unwrap(), 1);

        store.upsert_movies(&[movie(1, "New Title", "2018-02-02", 35)]).await.unwrap();
        let row = movie::Entity::find_by_id(1).one(store.db()).await.unwrap().unwrap();
        assert_eq!(row.title, "New Title");
        assert_eq!(movie::Entity::find().count(store.db()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_genre_id_is_excluded_from_counts() {
        let store = test_store().await;
        store.upsert_movies(&[movie(1, "Mystery Meat", "2017-07-07", 424242)]).await.unwrap();

        let counts = store.count_genres(2017).await.unwrap();
        assert_eq!(counts.values().sum::<i64>(), 0);
        assert_eq!(counts.len(), 20);
    }
}
