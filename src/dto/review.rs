use crate::domain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// DTO for a task awaiting an administrator verdict. Unlike [super::task::TaskView],
/// this view crosses user boundaries and carries the owner's ID so the reviewer
/// knows whose task they are judging.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq))]
pub struct PendingTaskView {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    #[schema(example = "Run a 5k")]
    pub description: String,
    pub deadline: DateTime<Utc>,
    #[schema(example = 25.0)]
    pub stake: f64,
    #[schema(
        example = "https://storage.example.com/object/public/evidence/user/task-1a2b3c4d.png"
    )]
    pub evidence: Option<String>,
}

impl From<domain::task::Task> for PendingTaskView {
    fn from(value: domain::task::Task) -> Self {
        PendingTaskView {
            id: value.id,
            owner_user_id: value.owner_user_id,
            description: value.description,
            deadline: value.deadline,
            stake: value.stake,
            evidence: value.evidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::test_util::task_due_in;
    use chrono::Duration;

    #[test]
    fn evidence_maps_through_unchanged() {
        let mut task = task_due_in(Duration::days(1));
        task.evidence = Some("https://blob.test/evidence/x.png".to_owned());

        let view = PendingTaskView::from(task);
        assert_eq!(
            Some("https://blob.test/evidence/x.png".to_owned()),
            view.evidence
        );
    }

    #[test]
    fn missing_evidence_stays_null() {
        let view = PendingTaskView::from(task_due_in(Duration::days(1)));
        assert_eq!(None, view.evidence);
    }
}
