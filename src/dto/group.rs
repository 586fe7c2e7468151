use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for creating a new task group
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewGroup {
    #[validate(length(min = 1))]
    #[schema(example = "Fitness goals")]
    pub name: String,
}

impl From<NewGroup> for domain::group::NewGroup {
    fn from(value: NewGroup) -> Self {
        domain::group::NewGroup { name: value.name }
    }
}

/// DTO for a task group returned on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct GroupView {
    pub id: i32,
    #[schema(example = "Fitness goals")]
    pub name: String,
}

impl From<domain::group::TaskGroup> for GroupView {
    fn from(value: domain::group::TaskGroup) -> Self {
        GroupView {
            id: value.id,
            name: value.name,
        }
    }
}

/// DTO for a newly created task group
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct InsertedGroup {
    pub id: i32,
}
