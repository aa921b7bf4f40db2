use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::info;
use std::sync::Arc;

use stockfetch_core::errors::DatabaseError;
use stockfetch_core::progress::{RunStatus, RunStatusReader, RunStatusStore, StatusDelta};
use stockfetch_core::Result;

use super::model::RunStatusDB;
use crate::db::{get_connection, table_exists, WriteHandle};
use crate::errors::StorageError;
use crate::schema::run_status;

/// Primary key of the one and only status row.
pub const RUN_STATUS_ID: i32 = 1;

#[derive(Clone)]
pub struct RunStatusRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RunStatusRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RunStatusStore for RunStatusRepository {
    async fn ensure_run_status(&self) -> Result<RunStatus> {
        self.writer
            .exec(|conn| {
                let inserted = diesel::insert_or_ignore_into(run_status::table)
                    .values(RunStatusDB {
                        id: RUN_STATUS_ID,
                        total_tasks: 0,
                        completed_tasks: 0,
                        failed_tasks: 0,
                    })
                    .execute(conn)
                    .map_err(StorageError::from)?;

                if inserted > 0 {
                    info!("Created run status row");
                }

                let row = run_status::table
                    .find(RUN_STATUS_ID)
                    .select(RunStatusDB::as_select())
                    .first::<RunStatusDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(RunStatus::from(row))
            })
            .await
    }

    async fn increment_status(&self, delta: StatusDelta) -> Result<RunStatus> {
        self.writer
            .exec(move |conn| {
                // Column arithmetic in a single UPDATE, no read-modify-write.
                let row = diesel::update(run_status::table.find(RUN_STATUS_ID))
                    .set((
                        run_status::total_tasks.eq(run_status::total_tasks + delta.total),
                        run_status::completed_tasks
                            .eq(run_status::completed_tasks + delta.completed),
                        run_status::failed_tasks.eq(run_status::failed_tasks + delta.failed),
                    ))
                    .returning(RunStatusDB::as_returning())
                    .get_result::<RunStatusDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                match row {
                    Some(row) => Ok(RunStatus::from(row)),
                    None => Err(DatabaseError::NotFound(
                        "run status row missing; ensure_run_status was never called".to_string(),
                    )
                    .into()),
                }
            })
            .await
    }
}

impl RunStatusReader for RunStatusRepository {
    fn read_run_status(&self) -> Result<Option<RunStatus>> {
        let mut conn = get_connection(&self.pool)?;
        load_run_status(&mut conn)
    }
}

/// Read-only access to the status row for observer processes.
///
/// Holds no writer and never migrates. A database the fetcher has not
/// initialized yet reads as "no status".
#[derive(Clone)]
pub struct RunStatusView {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl RunStatusView {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl RunStatusReader for RunStatusView {
    fn read_run_status(&self) -> Result<Option<RunStatus>> {
        let mut conn = get_connection(&self.pool)?;
        if !table_exists(&mut conn, "run_status")? {
            return Ok(None);
        }
        load_run_status(&mut conn)
    }
}

fn load_run_status(conn: &mut SqliteConnection) -> Result<Option<RunStatus>> {
    let row = run_status::table
        .find(RUN_STATUS_ID)
        .select(RunStatusDB::as_select())
        .first::<RunStatusDB>(conn)
        .optional()
        .map_err(StorageError::from)?;

    Ok(row.map(RunStatus::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, create_read_only_pool, init, run_migrations, spawn_writer};
    use stockfetch_core::Error;
    use tempfile::tempdir;

    fn create_test_repository() -> (RunStatusRepository, String, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        init(&db_path_str).expect("Failed to init database");
        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone()).expect("Failed to start writer");

        let repo = RunStatusRepository::new(Arc::clone(&pool), writer);
        (repo, db_path_str, temp_dir)
    }

    #[tokio::test]
    async fn test_read_before_ensure_is_absent() {
        let (repo, _path, _temp_dir) = create_test_repository();
        assert_eq!(repo.read_run_status().unwrap(), None);
    }

    #[tokio::test]
    async fn test_increment_before_ensure_is_not_found() {
        let (repo, _path, _temp_dir) = create_test_repository();

        let result = repo.increment_status(StatusDelta::COMPLETED).await;

        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
        assert_eq!(repo.read_run_status().unwrap(), None);
    }

    #[tokio::test]
    async fn test_ensure_creates_zeroed_row_once() {
        let (repo, _path, _temp_dir) = create_test_repository();

        let created = repo.ensure_run_status().await.unwrap();
        assert_eq!(created, RunStatus::default());

        repo.increment_status(StatusDelta::new(5, 2, 1)).await.unwrap();
        let again = repo.ensure_run_status().await.unwrap();

        assert_eq!(
            again,
            RunStatus {
                total: 5,
                completed: 2,
                failed: 1,
            }
        );
        assert_eq!(repo.read_run_status().unwrap(), Some(again));
    }

    #[tokio::test]
    async fn test_increment_returns_updated_row() {
        let (repo, _path, _temp_dir) = create_test_repository();
        repo.ensure_run_status().await.unwrap();

        let status = repo.increment_status(StatusDelta::total(3)).await.unwrap();
        assert_eq!(status.total, 3);
        let status = repo.increment_status(StatusDelta::FAILED).await.unwrap();
        assert_eq!(status.failed, 1);
        assert_eq!(status.completed, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let (repo, _path, _temp_dir) = create_test_repository();
        repo.ensure_run_status().await.unwrap();

        let tasks: Vec<_> = (0..500)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_status(StatusDelta::COMPLETED).await })
            })
            .collect();
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let status = repo.read_run_status().unwrap().unwrap();
        assert_eq!(status.completed, 500);
        assert_eq!(status.total, 0);
        assert_eq!(status.failed, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_increments_from_two_writers_on_one_file_compose() {
        let (first, db_path, _temp_dir) = create_test_repository();
        first.ensure_run_status().await.unwrap();

        // A second pool and writer on the same file, like a second process.
        let pool = create_pool(&db_path).unwrap();
        let second = RunStatusRepository::new(
            Arc::clone(&pool),
            spawn_writer((*pool).clone()).unwrap(),
        );

        let mut tasks = Vec::new();
        for i in 0..200 {
            let repo = if i % 2 == 0 { first.clone() } else { second.clone() };
            tasks.push(tokio::spawn(async move {
                repo.increment_status(StatusDelta::FAILED).await
            }));
        }
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(first.read_run_status().unwrap().unwrap().failed, 200);
        assert_eq!(second.read_run_status().unwrap().unwrap().failed, 200);
    }

    #[tokio::test]
    async fn test_view_follows_writer_updates() {
        let (repo, db_path, _temp_dir) = create_test_repository();
        let view = RunStatusView::new(create_read_only_pool(&db_path).unwrap());
        assert_eq!(view.read_run_status().unwrap(), None);

        repo.ensure_run_status().await.unwrap();
        repo.increment_status(StatusDelta::new(3, 1, 1)).await.unwrap();

        assert_eq!(
            view.read_run_status().unwrap(),
            Some(RunStatus {
                total: 3,
                completed: 1,
                failed: 1,
            })
        );
    }

    #[test]
    fn test_view_on_unmigrated_file_is_absent() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("not-yet-fetched.db");

        let view =
            RunStatusView::new(create_read_only_pool(&db_path.to_string_lossy()).unwrap());

        assert_eq!(view.read_run_status().unwrap(), None);
    }
}
