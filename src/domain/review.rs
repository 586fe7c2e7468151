use crate::domain::task::Task;
use derive_more::Display;
use uuid::Uuid;

/// The administrator's decision on a task's submitted evidence
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum Verdict {
    #[display("approved")]
    Approved,
    #[display("rejected")]
    Rejected,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait ReviewQueue {
        /// Every non-deleted task with evidence waiting on a verdict,
        /// across all users
        async fn pending_tasks(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Task>, anyhow::Error>;

        /// A single task looked up without owner scoping; review is the only
        /// place tasks cross the ownership boundary
        async fn task_by_id(
            &self,
            task_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Task>, anyhow::Error>;
    }

    pub trait VerdictWriter {
        /// Writes the verdict flags: verified mirrors approval, and the
        /// verification-pending flag drops in the same row update
        async fn record_verdict(
            &self,
            task_id: Uuid,
            verdict: Verdict,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ReviewError {
        #[error("The specified task did not exist.")]
        TaskNotFound,
        #[error("The task has no submitted evidence to review.")]
        NotReviewable,
        #[error("The task already received the opposite verdict.")]
        AlreadyDecided,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait ReviewPort {
        async fn pending_review(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            queue: &impl driven_ports::ReviewQueue,
        ) -> Result<Vec<Task>, anyhow::Error>;

        async fn record_verdict(
            &self,
            task_id: Uuid,
            verdict: Verdict,
            ext_cxn: &mut impl ExternalConnectivity,
            queue: &impl driven_ports::ReviewQueue,
            verdict_write: &impl driven_ports::VerdictWriter,
        ) -> Result<(), ReviewError>;
    }
}

use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use driving_ports::ReviewError;

pub struct ReviewService {}

impl driving_ports::ReviewPort for ReviewService {
    async fn pending_review(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        queue: &impl driven_ports::ReviewQueue,
    ) -> Result<Vec<Task>, anyhow::Error> {
        let tasks = queue
            .pending_tasks(&mut *ext_cxn)
            .await
            .context("fetching the pending review queue")?;

        Ok(tasks)
    }

    async fn record_verdict(
        &self,
        task_id: Uuid,
        verdict: Verdict,
        ext_cxn: &mut impl ExternalConnectivity,
        queue: &impl driven_ports::ReviewQueue,
        verdict_write: &impl driven_ports::VerdictWriter,
    ) -> Result<(), ReviewError> {
        let task = queue
            .task_by_id(task_id, &mut *ext_cxn)
            .await
            .context("resolving a task for review")?
            .ok_or(ReviewError::TaskNotFound)?;

        if !task.completed || task.evidence.is_none() {
            return Err(ReviewError::NotReviewable);
        }

        // Once the pending flag has dropped the verdict is terminal: repeating
        // the same verdict is an idempotent no-op, flipping it is refused.
        if !task.verification_pending {
            let decided = if task.verified {
                Verdict::Approved
            } else {
                Verdict::Rejected
            };
            return if decided == verdict {
                Ok(())
            } else {
                Err(ReviewError::AlreadyDecided)
            };
        }

        verdict_write
            .record_verdict(task_id, verdict, &mut *ext_cxn)
            .await
            .context("recording a review verdict")?;

        Ok(())
    }
}
