use crate::db::models::{DartsInput, DartsRecord, DartsUpdate, now_utc};
use crate::db::repository::{DartsRepository, Pagination};
use crate::db::schema::{DARTS_COLUMNS, SQLITE_INIT};
use crate::error::DartsError;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite, SqliteConnection};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// Open a pool for `database_url`, creating the database file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DartsError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    info!(max_connections, "database pool ready");
    Ok(pool)
}

#[derive(Clone)]
pub struct DartsStorage {
    pool: SqlitePool,
}

impl DartsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), DartsError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<DartsRecord, DartsError> {
        let row = sqlx::query(&format!("SELECT {DARTS_COLUMNS} FROM darts WHERE id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or(DartsError::NotFound(id))?;
        Self::row_to_model(row)
    }

    fn row_to_model(row: SqliteRow) -> Result<DartsRecord, DartsError> {
        let create_str: String = row.try_get("create_date")?;
        let update_str: String = row.try_get("update_date")?;

        Ok(DartsRecord {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            game: row.try_get("game")?,
            game_type: row.try_get("game_type")?,
            throws: row.try_get("throws")?,
            score: row.try_get("score")?,
            max_score: row.try_get("max_score")?,
            create_date: parse_timestamp(&create_str)?,
            update_date: parse_timestamp(&update_str)?,
        })
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DartsError> {
    let ts = DateTime::parse_from_rfc3339(s)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);
    Ok(ts)
}

impl DartsRepository for DartsStorage {
    async fn list(&self, page: Pagination) -> Result<Vec<DartsRecord>, DartsError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(&format!(
            "SELECT {DARTS_COLUMNS} FROM darts ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;
        debug!(page = page.page, limit = page.limit, count = rows.len(), "listed darts");
        rows.into_iter().map(Self::row_to_model).collect()
    }

    async fn create(&self, input: DartsInput) -> Result<DartsRecord, DartsError> {
        let now = format_timestamp(now_utc());
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!(
            r#"INSERT INTO darts (
                username, game, game_type, throws, score, max_score,
                create_date, update_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {DARTS_COLUMNS}"#
        ))
        .bind(input.username)
        .bind(input.game)
        .bind(input.game_type)
        .bind(input.throws)
        .bind(input.score)
        .bind(input.max_score)
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;
        let record = Self::row_to_model(row)?;
        tx.commit().await?;
        info!(record = %record, "created darts record");
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<DartsRecord, DartsError> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch(&mut *conn, id).await
    }

    async fn update(&self, id: i64, update: DartsUpdate) -> Result<DartsRecord, DartsError> {
        // Take the write lock before reading; a deferred read-then-write
        // transaction fails with SQLITE_BUSY instead of waiting.
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        // NotFound drops `tx`, which rolls back an empty transaction.
        let mut record = Self::fetch(&mut *tx, id).await?;
        record.apply(update);

        let row = sqlx::query(&format!(
            r#"UPDATE darts SET
                username = ?,
                game = ?,
                game_type = ?,
                throws = ?,
                score = ?,
                max_score = ?,
                update_date = ?
              WHERE id = ?
              RETURNING {DARTS_COLUMNS}"#
        ))
        .bind(&record.username)
        .bind(&record.game)
        .bind(&record.game_type)
        .bind(record.throws)
        .bind(record.score)
        .bind(record.max_score)
        .bind(format_timestamp(record.update_date))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        let record = Self::row_to_model(row)?;
        tx.commit().await?;
        info!(record = %record, "updated darts record");
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<(), DartsError> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        let result = sqlx::query("DELETE FROM darts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DartsError::NotFound(id));
        }
        tx.commit().await?;
        info!(id, "deleted darts record");
        Ok(())
    }
}
