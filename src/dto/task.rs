use crate::domain;
use crate::domain::task::{TaskBuckets, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// DTO for creating a new task via the API
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTask {
    #[validate(length(min = 1))]
    #[schema(example = "Run a 5k")]
    pub description: String,
    pub deadline: DateTime<Utc>,
    #[validate(range(min = 0.0))]
    #[schema(example = 25.0)]
    pub stake: f64,
    pub group_id: Option<i32>,
}

impl From<NewTask> for domain::task::NewTask {
    fn from(value: NewTask) -> Self {
        domain::task::NewTask {
            description: value.description,
            deadline: value.deadline,
            stake: value.stake,
            group_id: value.group_id,
        }
    }
}

/// DTO for a returned task on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq))]
pub struct TaskView {
    pub id: Uuid,
    #[schema(example = "Run a 5k")]
    pub description: String,
    pub deadline: DateTime<Utc>,
    #[schema(example = 25.0)]
    pub stake: f64,
    pub completed: bool,
    pub evidence: Option<String>,
    pub verification_pending: bool,
    pub verified: bool,
    pub group_id: Option<i32>,
    /// Derived lifecycle state, one of: current, past_due, awaiting_evidence,
    /// in_review, approved, rejected
    #[schema(example = "current")]
    pub status: String,
}

impl TaskView {
    /// Builds the API view of a task, deriving its status at instant [now]
    pub fn derive(task: domain::task::Task, now: DateTime<Utc>) -> TaskView {
        let status = TaskStatus::of(&task, now).to_string();
        TaskView {
            id: task.id,
            description: task.description,
            deadline: task.deadline,
            stake: task.stake,
            completed: task.completed,
            evidence: task.evidence,
            verification_pending: task.verification_pending,
            verified: task.verified,
            group_id: task.group_id,
            status,
        }
    }
}

/// DTO for a user's tasks partitioned into the six lifecycle buckets
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq))]
pub struct TaskSummary {
    pub current: Vec<TaskView>,
    pub past_due: Vec<TaskView>,
    pub awaiting_evidence: Vec<TaskView>,
    pub in_review: Vec<TaskView>,
    pub approved: Vec<TaskView>,
    pub rejected: Vec<TaskView>,
}

impl TaskSummary {
    pub fn derive(buckets: TaskBuckets, now: DateTime<Utc>) -> TaskSummary {
        let views = |tasks: Vec<domain::task::Task>| -> Vec<TaskView> {
            tasks
                .into_iter()
                .map(|task| TaskView::derive(task, now))
                .collect()
        };

        TaskSummary {
            current: views(buckets.current),
            past_due: views(buckets.past_due),
            awaiting_evidence: views(buckets.awaiting_evidence),
            in_review: views(buckets.in_review),
            approved: views(buckets.approved),
            rejected: views(buckets.rejected),
        }
    }
}

/// DTO for a newly created task
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct InsertedTask {
    pub id: Uuid,
}

/// DTO returned after an evidence upload succeeds
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct EvidenceUploaded {
    #[schema(example = "https://storage.example.com/object/public/evidence/user/task-1a2b3c4d.png")]
    pub evidence_url: String,
}
