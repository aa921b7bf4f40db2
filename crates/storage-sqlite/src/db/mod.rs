use log::{debug, error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;
use diesel::{QueryableByName, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use stockfetch_core::errors::{DatabaseError, Error, Result};

use crate::errors::IntoCore;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

/// Applied to every pooled connection on acquire.
const CONNECTION_PRAGMAS: &str = "
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 30000;
    PRAGMA synchronous = NORMAL;
";

/// Prepare the database file at `db_path` and switch it to WAL mode.
///
/// Creates missing parent directories. Returns the path unchanged.
pub fn init(db_path: &str) -> Result<String> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir)?;
        }
    }

    // journal_mode is persistent, so one connection is enough
    let mut conn = SqliteConnection::establish(db_path).into_core()?;
    conn.batch_execute("PRAGMA journal_mode = WAL;").into_core()?;
    conn.batch_execute(CONNECTION_PRAGMAS).into_core()?;

    Ok(db_path.to_string())
}

/// Pool used by the fetch side: reads plus the connection handed to the writer.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    build_pool(db_path, 8, ConnectionCustomizer { query_only: false })
}

/// Pool for processes that only observe the store.
///
/// Does not touch the journal mode or the schema, and every connection refuses
/// writes with `PRAGMA query_only`.
pub fn create_read_only_pool(db_path: &str) -> Result<Arc<DbPool>> {
    build_pool(db_path, 2, ConnectionCustomizer { query_only: true })
}

fn build_pool(
    db_path: &str,
    max_size: u32,
    customizer: ConnectionCustomizer,
) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .min_idle(Some(1))
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(customizer))
        .build(manager)
        .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;
    Ok(Arc::new(pool))
}

/// Create the price and status tables if they are missing.
///
/// Safe to call on every start; existing data is never touched.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut connection = get_connection(pool)?;

    let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::Database(DatabaseError::MigrationFailed(e.to_string()))
    })?;

    if applied.is_empty() {
        debug!("Schema is up to date");
    } else {
        for version in &applied {
            info!("Applied migration {}", version);
        }
    }

    Ok(())
}

/// Gets a connection from the pool
pub fn get_connection(pool: &Pool<ConnectionManager<SqliteConnection>>) -> Result<DbConnection> {
    pool.get().into_core()
}

#[derive(QueryableByName)]
struct TableCount {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

/// Whether `table` exists in the schema of the connected database.
pub fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool> {
    let count: TableCount = diesel::sql_query(
        "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind::<Text, _>(table)
    .get_result(conn)
    .into_core()?;
    Ok(count.n > 0)
}

#[derive(Debug)]
struct ConnectionCustomizer {
    query_only: bool,
}

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(diesel::r2d2::Error::QueryError)?;
        if self.query_only {
            conn.batch_execute("PRAGMA query_only = ON;")
                .map_err(diesel::r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(QueryableByName)]
    struct JournalMode {
        #[diesel(sql_type = Text)]
        journal_mode: String,
    }

    #[derive(QueryableByName)]
    struct RowCount {
        #[diesel(sql_type = BigInt)]
        n: i64,
    }

    #[test]
    fn test_init_creates_parent_directories_and_enables_wal() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("data").join("stock.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let returned = init(&db_path_str).unwrap();
        assert_eq!(returned, db_path_str);
        assert!(db_path.exists());

        let pool = create_pool(&db_path_str).unwrap();
        let mut conn = get_connection(&pool).unwrap();
        let mode: JournalMode = diesel::sql_query("PRAGMA journal_mode")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(mode.journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_run_migrations_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("stock.db").to_string_lossy().to_string();
        init(&db_path).unwrap();
        let pool = create_pool(&db_path).unwrap();

        run_migrations(&pool).unwrap();
        {
            let mut conn = get_connection(&pool).unwrap();
            diesel::sql_query(
                "INSERT INTO price_bars (symbol, date, open, high, low, close, volume)
                 VALUES ('AAA', '2024-01-02', 1.0, 2.0, 0.5, 1.5, 100)",
            )
            .execute(&mut conn)
            .unwrap();
        }
        run_migrations(&pool).unwrap();

        // A fresh pool against the same file, as on the next process start.
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = get_connection(&pool).unwrap();
        let count: RowCount = diesel::sql_query("SELECT COUNT(*) AS n FROM price_bars")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count.n, 1);
    }

    #[test]
    fn test_read_only_pool_sees_schema_and_rejects_writes() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("stock.db").to_string_lossy().to_string();
        init(&db_path).unwrap();
        run_migrations(&create_pool(&db_path).unwrap()).unwrap();

        let pool = create_read_only_pool(&db_path).unwrap();
        let mut conn = get_connection(&pool).unwrap();

        assert!(table_exists(&mut conn, "run_status").unwrap());
        assert!(table_exists(&mut conn, "price_bars").unwrap());
        assert!(!table_exists(&mut conn, "accounts").unwrap());

        let result = diesel::sql_query("INSERT INTO run_status (id) VALUES (1)").execute(&mut conn);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_only_pool_leaves_fresh_file_unmigrated() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("fresh.db").to_string_lossy().to_string();

        let pool = create_read_only_pool(&db_path).unwrap();
        let mut conn = get_connection(&pool).unwrap();

        assert!(!table_exists(&mut conn, "run_status").unwrap());
        let mode: JournalMode = diesel::sql_query("PRAGMA journal_mode")
            .get_result(&mut conn)
            .unwrap();
        assert_ne!(mode.journal_mode.to_lowercase(), "wal");
    }
}
