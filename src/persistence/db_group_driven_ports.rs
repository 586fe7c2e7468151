use crate::domain;
use crate::domain::group::{NewGroup, TaskGroup};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
struct GroupRow {
    id: i32,
    user_id: Uuid,
    name: String,
}

impl From<GroupRow> for TaskGroup {
    fn from(value: GroupRow) -> Self {
        TaskGroup {
            id: value.id,
            owner_user_id: value.user_id,
            name: value.name,
        }
    }
}

#[derive(FromRow)]
struct NewGroupId {
    id: i32,
}

pub struct DbGroupReader;

impl domain::group::driven_ports::GroupReader for DbGroupReader {
    async fn groups_for_user(
        &self,
        owner_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<TaskGroup>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let groups: Vec<TaskGroup> = sqlx::query_as::<_, GroupRow>(
            "SELECT id, user_id, name FROM task_groups WHERE user_id = $1 AND deleted = false",
        )
        .bind(owner_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch task groups for a user")?
        .into_iter()
        .map(TaskGroup::from)
        .collect();

        Ok(groups)
    }

    async fn user_group_by_id(
        &self,
        owner_id: Uuid,
        group_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TaskGroup>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let group = sqlx::query_as::<_, GroupRow>(
            "SELECT id, user_id, name FROM task_groups \
             WHERE user_id = $1 AND id = $2 AND deleted = false",
        )
        .bind(owner_id)
        .bind(group_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a task group by ID")?
        .map(TaskGroup::from);

        Ok(group)
    }
}

pub struct DbGroupWriter;

impl domain::group::driven_ports::GroupWriter for DbGroupWriter {
    async fn create_group_for_user(
        &self,
        owner_id: Uuid,
        new_group: &NewGroup,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i32, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let new_id = sqlx::query_as::<_, NewGroupId>(
            "INSERT INTO task_groups(user_id, name, deleted) VALUES ($1, $2, false) RETURNING id",
        )
        .bind(owner_id)
        .bind(&new_group.name)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new task group into the database")?;

        Ok(new_id.id)
    }

    async fn soft_delete_group(
        &self,
        group_id: i32,
        deleted_at: DateTime<Utc>,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        sqlx::query("UPDATE task_groups SET deleted = true, deleted_at = $1 WHERE id = $2")
            .bind(deleted_at)
            .bind(group_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to soft-delete a task group")?;

        Ok(())
    }
}
