use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Set, Statement,
    sea_query::OnConflict,
};

use crate::{entities::genre, error::AppResult, genres::GENRES};

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA journal_mode=WAL".to_string(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA synchronous=NORMAL".to_string(),
    ))
    .await?;

    run_sql(&db, MIGRATION_001).await?;
    seed_genres(&db).await?;
    Ok(db)
}

async fn run_sql(db: &DatabaseConnection, sql: &str) -> AppResult<()> {
    for stmt in sql.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        db.execute(Statement::from_string(db.get_database_backend(), stmt.to_string())).await?;
    }
    Ok(())
}

/// The genre dimension is closed, so the rows are seeded from the in-code
/// table rather than fetched from TMDB's genre endpoint. Existing rows
/// are left untouched.
async fn seed_genres(db: &DatabaseConnection) -> AppResult<()> {
    let rows = GENRES.iter().map(|(id, name)| genre::ActiveModel {
        id: Set(*id),
        name: Set(name.to_string()),
    });

    genre::Entity::insert_many(rows)
        .on_conflict(OnConflict::column(genre::Column::Id).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

    Ok(())
}
