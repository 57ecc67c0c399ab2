//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use cafe_types::{title_case, Cafe, NewCafe};
use rand::Rng;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Failures surfaced by record store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cafe name already taken: {0}")]
    DuplicateName(String),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Column a listing is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CafeOrder {
    Id,
    Name,
}

const CAFE_COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
     has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Relative paths like "cafes.db" have an empty parent
        if let Some(parent) = Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tracing::info!("Creating parent directory: {}", parent.display());
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, creating schema...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to create database schema")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Private in-memory database, used by tests.
    ///
    /// A single connection keeps every query on the same memory database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("Invalid in-memory SQLite options")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to create database schema")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cafes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(250) UNIQUE NOT NULL,
                map_url VARCHAR(250) NOT NULL,
                img_url VARCHAR(250) NOT NULL,
                location VARCHAR(250) NOT NULL,
                seats VARCHAR(250) NOT NULL,
                has_toilet BOOLEAN NOT NULL,
                has_wifi BOOLEAN NOT NULL,
                has_sockets BOOLEAN NOT NULL,
                can_take_calls BOOLEAN NOT NULL,
                coffee_price VARCHAR NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn insert_cafe(&self, cafe: &NewCafe) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO cafes (name, map_url, img_url, location, seats,
                               has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&cafe.name)
        .bind(&cafe.map_url)
        .bind(&cafe.img_url)
        .bind(&cafe.location)
        .bind(&cafe.seats)
        .bind(cafe.has_toilet)
        .bind(cafe.has_wifi)
        .bind(cafe.has_sockets)
        .bind(cafe.can_take_calls)
        .bind(&cafe.coffee_price)
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                StoreError::DuplicateName(cafe.name.clone())
            } else {
                StoreError::Sqlx(e)
            }
        })?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_cafe(&self, id: i64) -> StoreResult<Option<Cafe>> {
        let row: Option<CafeRow> =
            sqlx::query_as(&format!("SELECT {CAFE_COLUMNS} FROM cafes WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&*self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    pub async fn list_cafes(&self, order: CafeOrder) -> StoreResult<Vec<Cafe>> {
        let order_by = match order {
            CafeOrder::Id => "id",
            CafeOrder::Name => "name",
        };

        let rows: Vec<CafeRow> = sqlx::query_as(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafes ORDER BY {order_by}"
        ))
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Cafes whose title-cased location equals `location`, ordered by id.
    ///
    /// `location` is expected to be trimmed and title-cased already. Stored
    /// locations keep their original spelling, so the comparison is a table
    /// scan normalizing each one the same way.
    pub async fn find_by_location(&self, location: &str) -> StoreResult<Vec<Cafe>> {
        let cafes = self.list_cafes(CafeOrder::Id).await?;

        Ok(cafes
            .into_iter()
            .filter(|cafe| title_case(cafe.location.trim()) == location)
            .collect())
    }

    pub async fn count_cafes(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cafes")
            .fetch_one(&*self.pool)
            .await?;

        Ok(count)
    }

    /// Uniformly random cafe among the rows that exist right now
    pub async fn random_cafe(&self) -> StoreResult<Option<Cafe>> {
        let mut tx = self.pool.begin().await?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cafes")
            .fetch_one(&mut *tx)
            .await?;

        if count == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..count);
        let row: Option<CafeRow> = sqlx::query_as(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafes ORDER BY id LIMIT 1 OFFSET ?1"
        ))
        .bind(offset)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.map(Into::into))
    }

    /// Returns false when no cafe has that id
    pub async fn update_coffee_price(&self, id: i64, price: &str) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE cafes SET coffee_price = ?1 WHERE id = ?2
            "#,
        )
        .bind(price)
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no cafe has that id
    pub async fn delete_cafe(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM cafes WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct CafeRow {
    id: i64,
    name: String,
    map_url: String,
    img_url: String,
    location: String,
    seats: String,
    has_toilet: bool,
    has_wifi: bool,
    has_sockets: bool,
    can_take_calls: bool,
    coffee_price: String,
}

impl From<CafeRow> for Cafe {
    fn from(r: CafeRow) -> Self {
        Cafe {
            id: r.id,
            name: r.name,
            map_url: r.map_url,
            img_url: r.img_url,
            location: r.location,
            seats: r.seats,
            has_toilet: r.has_toilet,
            has_wifi: r.has_wifi,
            has_sockets: r.has_sockets,
            can_take_calls: r.can_take_calls,
            coffee_price: r.coffee_price,
        }
    }
}
