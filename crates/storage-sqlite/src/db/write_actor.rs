use super::{get_connection, DbPool};
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::{debug, error};
use std::any::Any;
use std::thread;
use stockfetch_core::errors::{DatabaseError, Error, Result};
use tokio::sync::{mpsc, oneshot};

// A write job runs against the writer's connection inside one IMMEDIATE
// transaction and reports a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Jobs run one at a time in submission order, each in its own
    /// transaction. An error returned by the job rolls its transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("the writer actor stopped accepting jobs"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("the writer actor dropped the reply"))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| writer_gone("unexpected result type from the writer actor"))
    }
}

fn writer_gone(message: &str) -> Error {
    Error::Database(DatabaseError::Internal(message.to_string()))
}

/// Starts the single database writer on a dedicated OS thread.
///
/// The thread owns one pooled connection for its whole life and exits once
/// every `WriteHandle` has been dropped. Blocking SQLite work never runs on
/// the async runtime's worker threads.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    // Bounded; senders wait when the writer falls behind.
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    let mut conn = get_connection(&pool)?;

    thread::Builder::new()
        .name("sqlite-writer".to_string())
        .spawn(move || {
            debug!("SQLite writer started");
            while let Some((job, reply_tx)) = rx.blocking_recv() {
                let result: Result<Box<dyn Any + Send + 'static>> = conn
                    .immediate_transaction::<_, StorageError, _>(|c| {
                        job(c).map_err(StorageError::from)
                    })
                    .map_err(|e: StorageError| e.into());

                if let Err(e) = &result {
                    error!("Write job failed: {}", e);
                }

                // The caller may have gone away; nothing to report to then.
                let _ = reply_tx.send(result);
            }
            debug!("SQLite writer stopped");
        })?;

    Ok(WriteHandle { tx })
}
