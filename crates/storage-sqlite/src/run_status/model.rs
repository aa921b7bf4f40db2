//! Database model for the run status row.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use stockfetch_core::progress::RunStatus;

/// Database model for the singleton run status row
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    Insertable,
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
)]
#[diesel(table_name = crate::schema::run_status)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct RunStatusDB {
    pub id: i32,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub failed_tasks: i64,
}

impl From<RunStatusDB> for RunStatus {
    fn from(db: RunStatusDB) -> Self {
        RunStatus {
            total: db.total_tasks,
            completed: db.completed_tasks,
            failed: db.failed_tasks,
        }
    }
}
