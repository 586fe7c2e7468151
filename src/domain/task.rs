use chrono::{DateTime, Utc};
use derive_more::Display;
use uuid::Uuid;

/// A user-created unit of work with a deadline and a monetary stake. The stake
/// is forfeited (donated, by business policy) unless an administrator verifies
/// the submitted completion evidence.
#[derive(PartialEq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct Task {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub stake: f64,
    pub completed: bool,
    pub evidence: Option<String>,
    pub verification_pending: bool,
    pub verified: bool,
    pub group_id: Option<i32>,
}

#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub struct NewTask {
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub stake: f64,
    pub group_id: Option<i32>,
}

/// The lifecycle state of a task, derived from its completion, evidence, and
/// verification fields. Exactly one state holds for any field combination.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum TaskStatus {
    /// Not yet completed, deadline still in the future
    #[display("current")]
    Current,
    /// Not yet completed and the deadline has passed
    #[display("past_due")]
    PastDue,
    /// Marked complete but no evidence has been attached
    #[display("awaiting_evidence")]
    AwaitingEvidence,
    /// Evidence attached and queued for administrator review
    #[display("in_review")]
    InReview,
    /// An administrator accepted the evidence
    #[display("approved")]
    Approved,
    /// An administrator declined the evidence
    #[display("rejected")]
    Rejected,
}

impl TaskStatus {
    /// Derives the status of [task] at instant [now]. Total over every field
    /// combination: tasks with evidence but no completion flag fall through to
    /// the deadline check, and a cleared verification-pending flag alongside
    /// evidence always reads as rejected rather than current.
    pub fn of(task: &Task, now: DateTime<Utc>) -> TaskStatus {
        if task.verified {
            return TaskStatus::Approved;
        }
        if !task.completed {
            return if task.deadline < now {
                TaskStatus::PastDue
            } else {
                TaskStatus::Current
            };
        }
        match task.evidence {
            None => TaskStatus::AwaitingEvidence,
            Some(_) if task.verification_pending => TaskStatus::InReview,
            Some(_) => TaskStatus::Rejected,
        }
    }
}

/// A user's visible tasks partitioned into the six lifecycle buckets
#[derive(Debug, Default)]
#[cfg_attr(test, derive(Clone, PartialEq))]
pub struct TaskBuckets {
    pub current: Vec<Task>,
    pub past_due: Vec<Task>,
    pub awaiting_evidence: Vec<Task>,
    pub in_review: Vec<Task>,
    pub approved: Vec<Task>,
    pub rejected: Vec<Task>,
}

impl TaskBuckets {
    /// Splits [tasks] into the six mutually exclusive buckets based on each
    /// task's status at instant [now]
    pub fn partition(tasks: Vec<Task>, now: DateTime<Utc>) -> TaskBuckets {
        let mut buckets = TaskBuckets::default();
        for task in tasks {
            match TaskStatus::of(&task, now) {
                TaskStatus::Current => buckets.current.push(task),
                TaskStatus::PastDue => buckets.past_due.push(task),
                TaskStatus::AwaitingEvidence => buckets.awaiting_evidence.push(task),
                TaskStatus::InReview => buckets.in_review.push(task),
                TaskStatus::Approved => buckets.approved.push(task),
                TaskStatus::Rejected => buckets.rejected.push(task),
            }
        }
        buckets
    }
}

pub mod driven_ports {
    use super::*;
    use crate::domain::FileUpload;
    use crate::external_connections::ExternalConnectivity;

    pub trait TaskReader {
        /// Fetches every non-deleted task owned by [owner_id]
        async fn tasks_for_user(
            &self,
            owner_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Task>, anyhow::Error>;

        /// Fetches a single non-deleted task, scoped by owner
        async fn user_task_by_id(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Task>, anyhow::Error>;
    }

    pub trait TaskWriter {
        async fn create_task_for_user(
            &self,
            owner_id: Uuid,
            new_task: &NewTask,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Uuid, anyhow::Error>;

        /// Flips the completion flag on a task
        async fn set_completed(
            &self,
            task_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        /// Writes an evidence URL onto a task and raises the
        /// verification-pending flag in the same row update
        async fn set_evidence(
            &self,
            task_id: Uuid,
            evidence_url: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        /// Raises the verification-pending flag without touching evidence
        async fn set_review_pending(
            &self,
            task_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        /// Marks a task deleted. Rows are never physically removed; reads
        /// filter on the flag.
        async fn soft_delete_task(
            &self,
            task_id: Uuid,
            deleted_at: DateTime<Utc>,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }

    pub trait EvidenceStore {
        /// Stores evidence file bytes under a path namespaced by owner and
        /// task, returning the public retrieval URL
        async fn store_evidence(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            upload: &FileUpload,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<String, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::domain::FileUpload;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TaskError {
        #[error("The specified task did not exist.")]
        NotFound,
        #[error("Evidence must be attached before a task can be submitted for review.")]
        EvidenceMissing,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TaskPort {
        /// Fetches the owner's visible tasks, partitioned into lifecycle buckets
        async fn task_summary(
            &self,
            owner_id: Uuid,
            now: DateTime<Utc>,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
        ) -> Result<TaskBuckets, anyhow::Error>;

        async fn user_task_by_id(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
        ) -> Result<Option<Task>, anyhow::Error>;

        async fn create_task(
            &self,
            owner_id: Uuid,
            task: &NewTask,
            ext_cxn: &mut impl ExternalConnectivity,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<Uuid, anyhow::Error>;

        async fn mark_complete(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), TaskError>;

        async fn submit_for_review(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), TaskError>;

        async fn attach_evidence(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            upload: &FileUpload,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
            task_write: &impl driven_ports::TaskWriter,
            evidence_store: &impl driven_ports::EvidenceStore,
        ) -> Result<String, TaskError>;

        async fn delete_task(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            now: DateTime<Utc>,
            ext_cxn: &mut impl ExternalConnectivity,
            task_read: &impl driven_ports::TaskReader,
            task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), TaskError>;
    }
}

use crate::domain::FileUpload;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use driving_ports::TaskError;

pub struct TaskService {}

/// Resolves a task through the owner-scoped reader, failing with
/// [TaskError::NotFound] when the task is absent, deleted, or owned by
/// someone else.
async fn require_owned_task(
    owner_id: Uuid,
    task_id: Uuid,
    ext_cxn: &mut impl ExternalConnectivity,
    task_read: &impl driven_ports::TaskReader,
) -> Result<Task, TaskError> {
    let task = task_read
        .user_task_by_id(owner_id, task_id, &mut *ext_cxn)
        .await
        .context("resolving a task for its owner")?;

    task.ok_or(TaskError::NotFound)
}

impl driving_ports::TaskPort for TaskService {
    async fn task_summary(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl driven_ports::TaskReader,
    ) -> Result<TaskBuckets, anyhow::Error> {
        let tasks = task_read
            .tasks_for_user(owner_id, &mut *ext_cxn)
            .await
            .context("fetching tasks for the summary view")?;

        Ok(TaskBuckets::partition(tasks, now))
    }

    async fn user_task_by_id(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl driven_ports::TaskReader,
    ) -> Result<Option<Task>, anyhow::Error> {
        let task = task_read
            .user_task_by_id(owner_id, task_id, &mut *ext_cxn)
            .await
            .context("fetching a task by ID")?;

        Ok(task)
    }

    async fn create_task(
        &self,
        owner_id: Uuid,
        task: &NewTask,
        ext_cxn: &mut impl ExternalConnectivity,
        task_write: &impl driven_ports::TaskWriter,
    ) -> Result<Uuid, anyhow::Error> {
        let created_task_id = task_write
            .create_task_for_user(owner_id, task, &mut *ext_cxn)
            .await
            .context("creating a task")?;

        Ok(created_task_id)
    }

    async fn mark_complete(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl driven_ports::TaskReader,
        task_write: &impl driven_ports::TaskWriter,
    ) -> Result<(), TaskError> {
        require_owned_task(owner_id, task_id, &mut *ext_cxn, task_read).await?;
        task_write
            .set_completed(task_id, &mut *ext_cxn)
            .await
            .context("marking a task complete")?;

        Ok(())
    }

    async fn submit_for_review(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl driven_ports::TaskReader,
        task_write: &impl driven_ports::TaskWriter,
    ) -> Result<(), TaskError> {
        let task = require_owned_task(owner_id, task_id, &mut *ext_cxn, task_read).await?;
        if task.evidence.is_none() {
            return Err(TaskError::EvidenceMissing);
        }

        task_write
            .set_review_pending(task_id, &mut *ext_cxn)
            .await
            .context("submitting a task for review")?;

        Ok(())
    }

    async fn attach_evidence(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        upload: &FileUpload,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl driven_ports::TaskReader,
        task_write: &impl driven_ports::TaskWriter,
        evidence_store: &impl driven_ports::EvidenceStore,
    ) -> Result<String, TaskError> {
        require_owned_task(owner_id, task_id, &mut *ext_cxn, task_read).await?;

        // A storage failure aborts here, leaving the task row untouched. The
        // reverse gap (file stored, row update fails) is accepted as-is.
        let evidence_url = evidence_store
            .store_evidence(owner_id, task_id, upload, &mut *ext_cxn)
            .await
            .context("storing evidence in the object store")?;

        task_write
            .set_evidence(task_id, &evidence_url, &mut *ext_cxn)
            .await
            .context("writing an evidence URL onto a task")?;

        Ok(evidence_url)
    }

    async fn delete_task(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        now: DateTime<Utc>,
        ext_cxn: &mut impl ExternalConnectivity,
        task_read: &impl driven_ports::TaskReader,
        task_write: &impl driven_ports::TaskWriter,
    ) -> Result<(), TaskError> {
        require_owned_task(owner_id, task_id, &mut *ext_cxn, task_read).await?;
        task_write
            .soft_delete_task(task_id, now, &mut *ext_cxn)
            .await
            .context("soft-deleting a task")?;

        Ok(())
    }
}



#[cfg(test)]
pub mod test_util {
    use super::*;
    use crate::domain::test_util::{Connectivity, FakeImplementation};
    use std::sync::{Mutex, RwLock};

    /// A task as held by the fake persistence layer, including the soft-delete
    /// bookkeeping that domain reads never see
    pub struct StoredTask {
        pub task: Task,
        pub deleted: bool,
        pub deleted_at: Option<DateTime<Utc>>,
    }

    pub struct InMemoryTaskPersistence {
        pub tasks: Vec<StoredTask>,
        pub connected: Connectivity,
    }

    /// Builds a fresh task due the given duration from now, owned by a random user
    pub fn task_due_in(duration: chrono::Duration) -> Task {
        Task {
            id: Uuid::new_v4(),
            owner_user_id: Uuid::new_v4(),
            description: "Something to prove".to_owned(),
            deadline: Utc::now() + duration,
            stake: 25.0,
            completed: false,
            evidence: None,
            verification_pending: false,
            verified: false,
            group_id: None,
        }
    }

    impl InMemoryTaskPersistence {
        pub fn new() -> InMemoryTaskPersistence {
            InMemoryTaskPersistence {
                tasks: Vec::new(),
                connected: Connectivity::Connected,
            }
        }

        pub fn new_with_tasks(tasks: &[Task]) -> InMemoryTaskPersistence {
            InMemoryTaskPersistence {
                tasks: tasks
                    .iter()
                    .map(|task| StoredTask {
                        task: task.clone(),
                        deleted: false,
                        deleted_at: None,
                    })
                    .collect(),
                connected: Connectivity::Connected,
            }
        }

        pub fn new_locked() -> RwLock<InMemoryTaskPersistence> {
            RwLock::new(Self::new())
        }

        fn index_of(&self, task_id: Uuid) -> Option<usize> {
            self.tasks
                .iter()
                .position(|stored| stored.task.id == task_id)
        }
    }

    impl driven_ports::TaskReader for RwLock<InMemoryTaskPersistence> {
        async fn tasks_for_user(
            &self,
            owner_id: Uuid,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Task>, anyhow::Error> {
            let persistence = self.read().expect("task persist rw lock poisoned");
            persistence.connected.blow_up_if_disconnected()?;

            Ok(persistence
                .tasks
                .iter()
                .filter(|stored| !stored.deleted && stored.task.owner_user_id == owner_id)
                .map(|stored| stored.task.clone())
                .collect())
        }

        async fn user_task_by_id(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Task>, anyhow::Error> {
            let persistence = self.read().expect("task persist rw lock poisoned");
            persistence.connected.blow_up_if_disconnected()?;

            Ok(persistence
                .tasks
                .iter()
                .find(|stored| {
                    !stored.deleted
                        && stored.task.owner_user_id == owner_id
                        && stored.task.id == task_id
                })
                .map(|stored| stored.task.clone()))
        }
    }

    impl driven_ports::TaskWriter for RwLock<InMemoryTaskPersistence> {
        async fn create_task_for_user(
            &self,
            owner_id: Uuid,
            new_task: &NewTask,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Uuid, anyhow::Error> {
            let mut persistence = self.write().expect("task persist rw lock poisoned");
            persistence.connected.blow_up_if_disconnected()?;

            let task_id = Uuid::new_v4();
            persistence.tasks.push(StoredTask {
                task: Task {
                    id: task_id,
                    owner_user_id: owner_id,
                    description: new_task.description.clone(),
                    deadline: new_task.deadline,
                    stake: new_task.stake,
                    completed: false,
                    evidence: None,
                    verification_pending: false,
                    verified: false,
                    group_id: new_task.group_id,
                },
                deleted: false,
                deleted_at: None,
            });

            Ok(task_id)
        }

        async fn set_completed(
            &self,
            task_id: Uuid,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error> {
            let mut persistence = self.write().expect("task persist rw lock poisoned");
            persistence.connected.blow_up_if_disconnected()?;

            if let Some(idx) = persistence.index_of(task_id) {
                persistence.tasks[idx].task.completed = true;
            }
            Ok(())
        }

        async fn set_evidence(
            &self,
            task_id: Uuid,
            evidence_url: &str,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error> {
            let mut persistence = self.write().expect("task persist rw lock poisoned");
            persistence.connected.blow_up_if_disconnected()?;

            if let Some(idx) = persistence.index_of(task_id) {
                persistence.tasks[idx].task.evidence = Some(evidence_url.to_owned());
                persistence.tasks[idx].task.verification_pending = true;
            }
            Ok(())
        }

        async fn set_review_pending(
            &self,
            task_id: Uuid,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error> {
            let mut persistence = self.write().expect("task persist rw lock poisoned");
            persistence.connected.blow_up_if_disconnected()?;

            if let Some(idx) = persistence.index_of(task_id) {
                persistence.tasks[idx].task.verification_pending = true;
            }
            Ok(())
        }

        async fn soft_delete_task(
            &self,
            task_id: Uuid,
            deleted_at: DateTime<Utc>,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error> {
            let mut persistence = self.write().expect("task persist rw lock poisoned");
            persistence.connected.blow_up_if_disconnected()?;

            if let Some(idx) = persistence.index_of(task_id) {
                persistence.tasks[idx].deleted = true;
                persistence.tasks[idx].deleted_at = Some(deleted_at);
            }
            Ok(())
        }
    }

    pub struct InMemoryEvidenceStore {
        pub stored_files: Vec<String>,
        pub connected: Connectivity,
    }

    impl InMemoryEvidenceStore {
        pub fn new() -> InMemoryEvidenceStore {
            InMemoryEvidenceStore {
                stored_files: Vec::new(),
                connected: Connectivity::Connected,
            }
        }

        pub fn new_locked() -> RwLock<InMemoryEvidenceStore> {
            RwLock::new(Self::new())
        }
    }

    impl driven_ports::EvidenceStore for RwLock<InMemoryEvidenceStore> {
        async fn store_evidence(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            upload: &FileUpload,
            _ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<String, anyhow::Error> {
            let mut store = self.write().expect("evidence store rw lock poisoned");
            store.connected.blow_up_if_disconnected()?;

            let path = format!("{}/{}.{}", owner_id, task_id, upload.extension());
            store.stored_files.push(path.clone());
            Ok(format!("https://blob.test/evidence/{path}"))
        }
    }

    pub struct MockTaskService {
        pub task_summary_result: FakeImplementation<Uuid, Result<TaskBuckets, TaskError>>,
        pub user_task_by_id_result:
            FakeImplementation<(Uuid, Uuid), Result<Option<Task>, anyhow::Error>>,
        pub create_task_result: FakeImplementation<(Uuid, NewTask), Result<Uuid, anyhow::Error>>,
        pub mark_complete_result: FakeImplementation<(Uuid, Uuid), Result<(), TaskError>>,
        pub submit_for_review_result: FakeImplementation<(Uuid, Uuid), Result<(), TaskError>>,
        pub attach_evidence_result:
            FakeImplementation<(Uuid, Uuid, FileUpload), Result<String, TaskError>>,
        pub delete_task_result: FakeImplementation<(Uuid, Uuid), Result<(), TaskError>>,
    }

    impl MockTaskService {
        pub fn new() -> MockTaskService {
            MockTaskService {
                task_summary_result: FakeImplementation::new(),
                user_task_by_id_result: FakeImplementation::new(),
                create_task_result: FakeImplementation::new(),
                mark_complete_result: FakeImplementation::new(),
                submit_for_review_result: FakeImplementation::new(),
                attach_evidence_result: FakeImplementation::new(),
                delete_task_result: FakeImplementation::new(),
            }
        }

        pub fn new_locked() -> Mutex<MockTaskService> {
            Mutex::new(Self::new())
        }
    }

    impl driving_ports::TaskPort for Mutex<MockTaskService> {
        async fn task_summary(
            &self,
            owner_id: Uuid,
            _now: DateTime<Utc>,
            _ext_cxn: &mut impl ExternalConnectivity,
            _task_read: &impl driven_ports::TaskReader,
        ) -> Result<TaskBuckets, anyhow::Error> {
            let mut locked_self = self.lock().expect("mock task service mutex poisoned");
            locked_self.task_summary_result.save_arguments(owner_id);

            locked_self
                .task_summary_result
                .return_value_result()
                .map_err(anyhow::Error::from)
        }

        async fn user_task_by_id(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            _ext_cxn: &mut impl ExternalConnectivity,
            _task_read: &impl driven_ports::TaskReader,
        ) -> Result<Option<Task>, anyhow::Error> {
            let mut locked_self = self.lock().expect("mock task service mutex poisoned");
            locked_self
                .user_task_by_id_result
                .save_arguments((owner_id, task_id));

            locked_self.user_task_by_id_result.return_value_anyhow()
        }

        async fn create_task(
            &self,
            owner_id: Uuid,
            task: &NewTask,
            _ext_cxn: &mut impl ExternalConnectivity,
            _task_write: &impl driven_ports::TaskWriter,
        ) -> Result<Uuid, anyhow::Error> {
            let mut locked_self = self.lock().expect("mock task service mutex poisoned");
            locked_self
                .create_task_result
                .save_arguments((owner_id, task.clone()));

            locked_self.create_task_result.return_value_anyhow()
        }

        async fn mark_complete(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            _ext_cxn: &mut impl ExternalConnectivity,
            _task_read: &impl driven_ports::TaskReader,
            _task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), TaskError> {
            let mut locked_self = self.lock().expect("mock task service mutex poisoned");
            locked_self
                .mark_complete_result
                .save_arguments((owner_id, task_id));

            locked_self.mark_complete_result.return_value_result()
        }

        async fn submit_for_review(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            _ext_cxn: &mut impl ExternalConnectivity,
            _task_read: &impl driven_ports::TaskReader,
            _task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), TaskError> {
            let mut locked_self = self.lock().expect("mock task service mutex poisoned");
            locked_self
                .submit_for_review_result
                .save_arguments((owner_id, task_id));

            locked_self.submit_for_review_result.return_value_result()
        }

        async fn attach_evidence(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            upload: &FileUpload,
            _ext_cxn: &mut impl ExternalConnectivity,
            _task_read: &impl driven_ports::TaskReader,
            _task_write: &impl driven_ports::TaskWriter,
            _evidence_store: &impl driven_ports::EvidenceStore,
        ) -> Result<String, TaskError> {
            let mut locked_self = self.lock().expect("mock task service mutex poisoned");
            locked_self
                .attach_evidence_result
                .save_arguments((owner_id, task_id, upload.clone()));

            locked_self.attach_evidence_result.return_value_result()
        }

        async fn delete_task(
            &self,
            owner_id: Uuid,
            task_id: Uuid,
            _now: DateTime<Utc>,
            _ext_cxn: &mut impl ExternalConnectivity,
            _task_read: &impl driven_ports::TaskReader,
            _task_write: &impl driven_ports::TaskWriter,
        ) -> Result<(), TaskError> {
            let mut locked_self = self.lock().expect("mock task service mutex poisoned");
            locked_self
                .delete_task_result
                .save_arguments((owner_id, task_id));

            locked_self.delete_task_result.return_value_result()
        }
    }
}
