use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Language, NewLanguage, UpdateLanguage};

/// Rows inserted the first time the `languages` table is found empty
pub const SEED_LANGUAGES: [(&str, &str); 7] = [
    ("Python", "4F75A1"),
    ("JavaScript", "F1DC5D"),
    ("Swift", "EB735F"),
    ("Rust", "8E6CE1"),
    ("Kotlin", "8E6CE1"),
    ("Dart", "74B8DF"),
    ("Go", "6BAFC6"),
];

/// SQLite-backed store for language records.
///
/// Cloning is cheap and shares the underlying pool. Every operation checks
/// out its own connection and hands it back when the guard drops.
#[derive(Clone)]
pub struct LanguageStore {
    pool: SqlitePool,
}

impl LanguageStore {
    /// Open the store described by `config` and make sure it is ready to serve
    pub async fn open(config: &Config) -> Result<Self> {
        let store = Self::connect(&config.database_path, config.max_connections).await?;
        store.init().await?;
        Ok(store)
    }

    /// Open (creating if missing) the database file. Does not touch the schema.
    pub async fn connect(database_path: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context(format!("Failed to open database at {}", database_path))?;

        Ok(Self { pool })
    }

    /// Create the table if needed and seed it when empty.
    ///
    /// Safe to run on every startup. Returns whether seed rows were inserted.
    pub async fn init(&self) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS languages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                color TEXT NOT NULL
            )",
        )
        .execute(&mut *tx)
        .await
        .context("Failed to create languages table")?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(&mut *tx)
            .await
            .context("Failed to count languages")?;

        if count > 0 {
            tx.commit().await?;
            debug!("languages table already holds {} rows, skipping seed", count);
            return Ok(false);
        }

        for (name, color) in SEED_LANGUAGES {
            sqlx::query("INSERT INTO languages (name, color) VALUES (?1, ?2)")
                .bind(name)
                .bind(color)
                .execute(&mut *tx)
                .await
                .context("Failed to insert seed language")?;
        }

        tx.commit().await.context("Failed to commit seed data")?;
        info!("Seeded {} languages", SEED_LANGUAGES.len());

        Ok(true)
    }

    /// All languages in insertion order
    pub async fn list(&self) -> sqlx::Result<Vec<Language>> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Language>("SELECT id, name, color FROM languages ORDER BY id")
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn get(&self, id: i64) -> sqlx::Result<Option<Language>> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Language>("SELECT id, name, color FROM languages WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a language and return it with its assigned id
    pub async fn create(&self, new: &NewLanguage) -> sqlx::Result<Language> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("INSERT INTO languages (name, color) VALUES (?1, ?2)")
            .bind(&new.name)
            .bind(&new.color)
            .execute(&mut *conn)
            .await?;

        Ok(Language {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            color: new.color.clone(),
        })
    }

    /// Merge `update` into the row with `id`.
    ///
    /// Fields left as `None` keep their stored value. Returns `None` when no
    /// row matched. Existence check and write are one statement.
    pub async fn update(&self, id: i64, update: &UpdateLanguage) -> sqlx::Result<Option<Language>> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Language>(
            "UPDATE languages
             SET name = COALESCE(?1, name), color = COALESCE(?2, color)
             WHERE id = ?3
             RETURNING id, name, color",
        )
        .bind(update.name.as_deref())
        .bind(update.color.as_deref())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Remove the row with `id`. Returns false if nothing was deleted.
    pub async fn delete(&self, id: i64) -> sqlx::Result<bool> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM languages WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Round trip a trivial statement to prove the database is reachable
    pub async fn ping(&self) -> sqlx::Result<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    #[cfg(test)]
    pub async fn count(&self) -> sqlx::Result<i64> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(&mut *conn)
            .await
    }
}
