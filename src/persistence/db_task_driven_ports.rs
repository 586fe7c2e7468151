use crate::domain;
use crate::domain::task::{NewTask, Task};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Columns read back for every task query. The `deleted` bookkeeping columns
/// stay in the database; domain reads never see them.
pub(super) const TASK_COLUMNS: &str =
    "id, user_id, task, deadline, stake, completed, evidence, verification_pending, verified, group_id";

#[derive(FromRow)]
pub(super) struct TaskRow {
    id: Uuid,
    user_id: Uuid,
    task: String,
    deadline: DateTime<Utc>,
    stake: f64,
    completed: bool,
    evidence: Option<String>,
    verification_pending: bool,
    verified: bool,
    group_id: Option<i32>,
}

impl From<TaskRow> for Task {
    fn from(value: TaskRow) -> Self {
        Task {
            id: value.id,
            owner_user_id: value.user_id,
            description: value.task,
            deadline: value.deadline,
            stake: value.stake,
            completed: value.completed,
            evidence: value.evidence,
            verification_pending: value.verification_pending,
            verified: value.verified,
            group_id: value.group_id,
        }
    }
}

#[derive(FromRow)]
struct NewTaskId {
    id: Uuid,
}

pub struct DbTaskReader;

impl domain::task::driven_ports::TaskReader for DbTaskReader {
    async fn tasks_for_user(
        &self,
        owner_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Task>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let tasks: Vec<Task> = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM todos WHERE user_id = $1 AND deleted = false"
        ))
        .bind(owner_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch tasks for a user")?
        .into_iter()
        .map(Task::from)
        .collect();

        Ok(tasks)
    }

    async fn user_task_by_id(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Task>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let task = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM todos WHERE user_id = $1 AND id = $2 AND deleted = false"
        ))
        .bind(owner_id)
        .bind(task_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a task by ID")?
        .map(Task::from);

        Ok(task)
    }
}

pub struct DbTaskWriter;

impl domain::task::driven_ports::TaskWriter for DbTaskWriter {
    async fn create_task_for_user(
        &self,
        owner_id: Uuid,
        new_task: &NewTask,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Uuid, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let new_id = sqlx::query_as::<_, NewTaskId>(
            "INSERT INTO todos(user_id, task, deadline, stake, group_id, \
             completed, verification_pending, verified, deleted) \
             VALUES ($1, $2, $3, $4, $5, false, false, false, false) \
             RETURNING id",
        )
        .bind(owner_id)
        .bind(&new_task.description)
        .bind(new_task.deadline)
        .bind(new_task.stake)
        .bind(new_task.group_id)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new task into the database")?;

        Ok(new_id.id)
    }

    async fn set_completed(
        &self,
        task_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        sqlx::query("UPDATE todos SET completed = true WHERE id = $1")
            .bind(task_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to mark a task complete")?;

        Ok(())
    }

    async fn set_evidence(
        &self,
        task_id: Uuid,
        evidence_url: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        sqlx::query(
            "UPDATE todos SET evidence = $1, verification_pending = true WHERE id = $2",
        )
        .bind(evidence_url)
        .bind(task_id)
        .execute(cxn.borrow_connection())
        .await
        .context("trying to attach evidence to a task")?;

        Ok(())
    }

    async fn set_review_pending(
        &self,
        task_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        sqlx::query("UPDATE todos SET verification_pending = true WHERE id = $1")
            .bind(task_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to submit a task for review")?;

        Ok(())
    }

    async fn soft_delete_task(
        &self,
        task_id: Uuid,
        deleted_at: DateTime<Utc>,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        sqlx::query("UPDATE todos SET deleted = true, deleted_at = $1 WHERE id = $2")
            .bind(deleted_at)
            .bind(task_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to soft-delete a task")?;

        Ok(())
    }
}
