// ABOUTME: The shared store handle consumers hold for the lifetime of a session
// ABOUTME: One lock guards all collections; each successful mutation bumps the revision and broadcasts an event

use sitedesk_config::StoreConfig;
use sitedesk_core::{
    ApprovalStatus, ChangeRequest, ChangeRequestCreateInput, Comment, CommentCreateInput,
    Document, DocumentCreateInput, Message, MessageCreateInput, Milestone, MilestoneCreateInput,
    Notification, NotificationCreateInput, Project, ProjectCreateInput, Transaction,
    TransactionCreateInput,
};
use sitedesk_tasks::{Task, TaskCreateInput, TaskUpdateInput};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::events::{StoreChange, StoreEvent};
use crate::fixtures;
use crate::state::StoreState;

/// Cloneable handle to one session's domain state
#[derive(Clone)]
pub struct ProjectStore {
    state: Arc<RwLock<StoreState>>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl ProjectStore {
    /// Empty store
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_state(StoreState::default(), config)
    }

    /// Store pre-loaded with the demo fixtures
    pub fn with_fixtures(config: &StoreConfig) -> Self {
        Self::with_state(fixtures::demo_state(), config)
    }

    /// Empty or seeded, depending on `config.seed_fixtures`
    pub fn open(config: &StoreConfig) -> Self {
        if config.seed_fixtures {
            Self::with_fixtures(config)
        } else {
            Self::new(config)
        }
    }

    /// Store over existing contents. The contents are trusted as-is.
    pub fn with_state(state: StoreState, config: &StoreConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_channel_size.max(1));

        info!(
            "Store opened with {} projects, {} tasks (revision {})",
            state.projects.len(),
            state.tasks.len(),
            state.revision
        );

        Self {
            state: Arc::new(RwLock::new(state)),
            event_tx,
        }
    }

    /// Receive an event for every successful mutation from now on
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().await
    }

    fn broadcast_event(&self, event: StoreEvent) {
        if let Err(e) = self.event_tx.send(event) {
            // No receivers is the normal case when nothing subscribed
            if self.event_tx.receiver_count() > 0 {
                warn!("Failed to broadcast store event: {}", e);
            }
        }
    }

    /// Run one mutation under the write lock.
    ///
    /// `apply` must either fail without touching the state or return the
    /// change it made. `None` means the call succeeded without changing
    /// anything, so no revision is recorded.
    async fn mutate<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut StoreState) -> StoreResult<(T, Option<StoreChange>)>,
    ) -> StoreResult<T> {
        let mut state = self.state.write().await;

        match apply(&mut *state) {
            Ok((value, Some(change))) => {
                state.revision += 1;
                let event = StoreEvent::new(state.revision, change);
                info!(
                    operation,
                    revision = event.revision,
                    id = event.change.entity_id().unwrap_or("-"),
                    "Store mutation applied"
                );
                // Sent under the lock so subscribers see revisions in order
                self.broadcast_event(event);
                Ok(value)
            }
            Ok((value, None)) => {
                debug!(operation, "Store mutation was a no-op");
                Ok(value)
            }
            Err(e) => {
                warn!(operation, error = %e, "Store mutation rejected");
                Err(e)
            }
        }
    }

    pub async fn add_project(&self, input: ProjectCreateInput) -> StoreResult<Project> {
        self.mutate("add_project", |state| {
            let project = state.add_project(input)?;
            let change = StoreChange::ProjectAdded {
                project: project.clone(),
            };
            Ok((project, Some(change)))
        })
        .await
    }

    /// Fails with a reference error unless `input.project_id` exists
    pub async fn add_task(&self, input: TaskCreateInput) -> StoreResult<Task> {
        self.mutate("add_task", |state| {
            let task = state.add_task(input)?;
            let change = StoreChange::TaskAdded { task: task.clone() };
            Ok((task, Some(change)))
        })
        .await
    }

    /// Merge `update` into an existing task
    pub async fn update_task(&self, task_id: &str, update: TaskUpdateInput) -> StoreResult<Task> {
        self.mutate("update_task", |state| {
            let task = state.update_task(task_id, update)?;
            let change = StoreChange::TaskUpdated { task: task.clone() };
            Ok((task, Some(change)))
        })
        .await
    }

    pub async fn add_comment(&self, input: CommentCreateInput) -> StoreResult<Comment> {
        self.mutate("add_comment", |state| {
            let comment = state.add_comment(input)?;
            let change = StoreChange::CommentAdded {
                comment: comment.clone(),
            };
            Ok((comment, Some(change)))
        })
        .await
    }

    pub async fn add_message(&self, input: MessageCreateInput) -> StoreResult<Message> {
        self.mutate("add_message", |state| {
            let message = state.add_message(input)?;
            let change = StoreChange::MessageAdded {
                message: message.clone(),
            };
            Ok((message, Some(change)))
        })
        .await
    }

    pub async fn add_document(&self, input: DocumentCreateInput) -> StoreResult<Document> {
        self.mutate("add_document", |state| {
            let document = state.add_document(input)?;
            let change = StoreChange::DocumentAdded {
                document: document.clone(),
            };
            Ok((document, Some(change)))
        })
        .await
    }

    pub async fn add_notification(
        &self,
        input: NotificationCreateInput,
    ) -> StoreResult<Notification> {
        self.mutate("add_notification", |state| {
            let notification = state.add_notification(input)?;
            let change = StoreChange::NotificationAdded {
                notification: notification.clone(),
            };
            Ok((notification, Some(change)))
        })
        .await
    }

    /// Idempotent: an already-read notification succeeds without an event
    pub async fn mark_notification_read(&self, id: &str) -> StoreResult<()> {
        self.mutate("mark_notification_read", |state| {
            let change = state
                .mark_notification_read(id)?
                .map(|notification| StoreChange::NotificationRead { notification });
            Ok(((), change))
        })
        .await
    }

    /// Returns how many notifications flipped to read
    pub async fn mark_all_notifications_read(&self) -> StoreResult<usize> {
        self.mutate("mark_all_notifications_read", |state| {
            let ids = state.mark_all_notifications_read();
            let flipped = ids.len();
            let change = (!ids.is_empty()).then(|| StoreChange::AllNotificationsRead { ids });
            Ok((flipped, change))
        })
        .await
    }

    /// New change requests always start out Pending
    pub async fn add_change_request(
        &self,
        input: ChangeRequestCreateInput,
    ) -> StoreResult<ChangeRequest> {
        self.mutate("add_change_request", |state| {
            let change_request = state.add_change_request(input)?;
            let change = StoreChange::ChangeRequestAdded {
                change_request: change_request.clone(),
            };
            Ok((change_request, Some(change)))
        })
        .await
    }

    /// Approve or reject a pending change request
    pub async fn update_change_request_status(
        &self,
        id: &str,
        status: ApprovalStatus,
    ) -> StoreResult<ChangeRequest> {
        self.mutate("update_change_request_status", |state| {
            let (change_request, previous) = state.update_change_request_status(id, status)?;
            let change = StoreChange::ChangeRequestStatusChanged {
                change_request: change_request.clone(),
                previous,
            };
            Ok((change_request, Some(change)))
        })
        .await
    }

    pub async fn add_transaction(&self, input: TransactionCreateInput) -> StoreResult<Transaction> {
        self.mutate("add_transaction", |state| {
            let transaction = state.add_transaction(input)?;
            let change = StoreChange::TransactionAdded {
                transaction: transaction.clone(),
            };
            Ok((transaction, Some(change)))
        })
        .await
    }

    /// Approve or reject a pending transaction
    pub async fn update_transaction_status(
        &self,
        id: &str,
        status: ApprovalStatus,
    ) -> StoreResult<Transaction> {
        self.mutate("update_transaction_status", |state| {
            let (transaction, previous) = state.update_transaction_status(id, status)?;
            let change = StoreChange::TransactionStatusChanged {
                transaction: transaction.clone(),
                previous,
            };
            Ok((transaction, Some(change)))
        })
        .await
    }

    pub async fn add_milestone(&self, input: MilestoneCreateInput) -> StoreResult<Milestone> {
        self.mutate("add_milestone", |state| {
            let milestone = state.add_milestone(input)?;
            let change = StoreChange::MilestoneAdded {
                milestone: milestone.clone(),
            };
            Ok((milestone, Some(change)))
        })
        .await
    }

    /// Owner sign-off: Pending Approval becomes Completed
    pub async fn approve_milestone(&self, id: &str) -> StoreResult<Milestone> {
        self.mutate("approve_milestone", |state| {
            let milestone = state.approve_milestone(id)?;
            let change = StoreChange::MilestoneApproved {
                milestone: milestone.clone(),
            };
            Ok((milestone, Some(change)))
        })
        .await
    }
}
