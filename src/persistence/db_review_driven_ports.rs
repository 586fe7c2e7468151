use crate::domain;
use crate::domain::review::Verdict;
use crate::domain::task::Task;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use uuid::Uuid;

use super::db_task_driven_ports::{TASK_COLUMNS, TaskRow};

pub struct DbReviewQueue;

impl domain::review::driven_ports::ReviewQueue for DbReviewQueue {
    async fn pending_tasks(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Task>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let tasks: Vec<Task> = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM todos \
             WHERE completed = true AND evidence IS NOT NULL \
             AND verification_pending = true AND verified = false \
             AND deleted = false"
        ))
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch the pending review queue")?
        .into_iter()
        .map(Task::from)
        .collect();

        Ok(tasks)
    }

    async fn task_by_id(
        &self,
        task_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Task>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let task = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM todos WHERE id = $1 AND deleted = false"
        ))
        .bind(task_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a task for review")?
        .map(Task::from);

        Ok(task)
    }
}

pub struct DbVerdictWriter;

impl domain::review::driven_ports::VerdictWriter for DbVerdictWriter {
    async fn record_verdict(
        &self,
        task_id: Uuid,
        verdict: Verdict,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        sqlx::query("UPDATE todos SET verified = $1, verification_pending = false WHERE id = $2")
            .bind(verdict == Verdict::Approved)
            .bind(task_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to record a review verdict")?;

        Ok(())
    }
}
