use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user-defined named collection of tasks. Tasks reference a group by ID;
/// membership is resolved by the caller matching the foreign key.
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TaskGroup {
    pub id: i32,
    pub owner_user_id: Uuid,
    pub name: String,
}

#[cfg_attr(test, derive(Clone, Debug, PartialEq, Eq))]
pub struct NewGroup {
    pub name: String,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait GroupReader {
        /// Fetches every non-deleted group owned by [owner_id]
        async fn groups_for_user(
            &self,
            owner_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TaskGroup>, anyhow::Error>;

        async fn user_group_by_id(
            &self,
            owner_id: Uuid,
            group_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TaskGroup>, anyhow::Error>;
    }

    pub trait GroupWriter {
        async fn create_group_for_user(
            &self,
            owner_id: Uuid,
            new_group: &NewGroup,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i32, anyhow::Error>;

        async fn soft_delete_group(
            &self,
            group_id: i32,
            deleted_at: DateTime<Utc>,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum GroupError {
        #[error("The specified group did not exist.")]
        NotFound,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait GroupPort {
        async fn groups_for_user(
            &self,
            owner_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
            group_read: &impl driven_ports::GroupReader,
        ) -> Result<Vec<TaskGroup>, anyhow::Error>;

        async fn create_group(
            &self,
            owner_id: Uuid,
            new_group: &NewGroup,
            ext_cxn: &mut impl ExternalConnectivity,
            group_write: &impl driven_ports::GroupWriter,
        ) -> Result<i32, anyhow::Error>;

        async fn delete_group(
            &self,
            owner_id: Uuid,
            group_id: i32,
            now: DateTime<Utc>,
            ext_cxn: &mut impl ExternalConnectivity,
            group_read: &impl driven_ports::GroupReader,
            group_write: &impl driven_ports::GroupWriter,
        ) -> Result<(), GroupError>;
    }
}

use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use driving_ports::GroupError;

pub struct GroupService {}

impl driving_ports::GroupPort for GroupService {
    async fn groups_for_user(
        &self,
        owner_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
        group_read: &impl driven_ports::GroupReader,
    ) -> Result<Vec<TaskGroup>, anyhow::Error> {
        let groups = group_read
            .groups_for_user(owner_id, &mut *ext_cxn)
            .await
            .context("fetching groups for a user")?;

        Ok(groups)
    }

    async fn create_group(
        &self,
        owner_id: Uuid,
        new_group: &NewGroup,
        ext_cxn: &mut impl ExternalConnectivity,
        group_write: &impl driven_ports::GroupWriter,
    ) -> Result<i32, anyhow::Error> {
        let created_group_id = group_write
            .create_group_for_user(owner_id, new_group, &mut *ext_cxn)
            .await
            .context("creating a task group")?;

        Ok(created_group_id)
    }

    async fn delete_group(
        &self,
        owner_id: Uuid,
        group_id: i32,
        now: DateTime<Utc>,
        ext_cxn: &mut impl ExternalConnectivity,
        group_read: &impl driven_ports::GroupReader,
        group_write: &impl driven_ports::GroupWriter,
    ) -> Result<(), GroupError> {
        let group = group_read
            .user_group_by_id(owner_id, group_id, &mut *ext_cxn)
            .await
            .context("resolving a group for its owner")?;
        if group.is_none() {
            return Err(GroupError::NotFound);
        }

        group_write
            .soft_delete_group(group_id, now, &mut *ext_cxn)
            .await
            .context("soft-deleting a task group")?;

        Ok(())
    }
}

#[cfg(test)]
mod group_service_tests {
    use super::driving_ports::GroupPort;
    use super::test_util::*;
    use super::*;
    use crate::external_connections;
    use chrono::Utc;
    use speculoos::prelude::*;
    use std::sync::RwLock;

    #[tokio::test]
    async fn create_then_list_returns_owned_groups_only() {
        let owner = Uuid::new_v4();
        let group_persist = InMemoryGroupPersistence::new_locked();
        let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();
        let service = GroupService {};

        let created = service
            .create_group(
                owner,
                &NewGroup {
                    name: "Fitness".to_owned(),
                },
                &mut ext_cxn,
                &group_persist,
            )
            .await;
        assert_that!(created).is_ok_containing(1);

        let other_created = service
            .create_group(
                Uuid::new_v4(),
                &NewGroup {
                    name: "Chores".to_owned(),
                },
                &mut ext_cxn,
                &group_persist,
            )
            .await;
        assert_that!(other_created).is_ok();

        let groups = service
            .groups_for_user(owner, &mut ext_cxn, &group_persist)
            .await;
        assert_that!(groups).is_ok().matches(|groups| {
            matches!(groups.as_slice(), [TaskGroup { id: 1, name, .. }] if name == "Fitness")
        });
    }

    #[tokio::test]
    async fn delete_group_hides_it_from_listings() {
        let owner = Uuid::new_v4();
        let group_persist = RwLock::new(InMemoryGroupPersistence::new_with_groups(&[TaskGroup {
            id: 1,
            owner_user_id: owner,
            name: "Fitness".to_owned(),
        }]));
        let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();
        let service = GroupService {};

        let delete_result = service
            .delete_group(owner, 1, Utc::now(), &mut ext_cxn, &group_persist, &group_persist)
            .await;
        assert_that!(delete_result).is_ok();

        let groups = service
            .groups_for_user(owner, &mut ext_cxn, &group_persist)
            .await;
        assert_that!(groups).is_ok().matches(Vec::is_empty);

        // Still present in storage for audit
        let stored = group_persist.read().expect("group persist rw lock poisoned");
        assert_eq!(1, stored.groups.len());
        assert!(stored.groups[0].deleted);
    }

    #[tokio::test]
    async fn delete_rejects_groups_owned_by_others() {
        let group_persist = RwLock::new(InMemoryGroupPersistence::new_with_groups(&[TaskGroup {
            id: 1,
            owner_user_id: Uuid::new_v4(),
            name: "Fitness".to_owned(),
        }]));
        let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

        let delete_result = GroupService {}
            .delete_group(
                Uuid::new_v4(),
                1,
                Utc::now(),
                &mut ext_cxn,
                &group_persist,
                &group_persist,
            )
            .await;
        let Err(GroupError::NotFound) = delete_result else {
            panic!("expected a not-found error, got {delete_result:#?}");
        };
    }
}
