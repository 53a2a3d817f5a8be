// ABOUTME: Store contents and the synchronous mutation rules applied to them
// ABOUTME: Every mutation validates fully before touching a collection, so failures leave no trace

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sitedesk_core::constants::{
    CHANGE_REQUEST_ID_PREFIX, COMMENT_ID_PREFIX, DOCUMENT_ID_PREFIX, MESSAGE_ID_PREFIX,
    MILESTONE_ID_PREFIX, NOTIFICATION_ID_PREFIX, PROJECT_ID_PREFIX, TASK_ID_PREFIX,
    TRANSACTION_ID_PREFIX,
};
use sitedesk_core::{
    generate_id, validate_change_request, validate_comment, validate_document, validate_message,
    validate_milestone, validate_notification, validate_project, validate_transaction,
    ApprovalStatus, ChangeRequest, ChangeRequestCreateInput, Comment, CommentCreateInput,
    Document, DocumentCreateInput, Message, MessageCreateInput, Milestone, MilestoneCreateInput,
    MilestoneStatus, Notification, NotificationCreateInput, Project, ProjectCreateInput,
    Transaction, TransactionCreateInput, User, ValidationError,
};
use sitedesk_tasks::{
    normalize_dependencies, validate_task_create, validate_task_update, Task, TaskCreateInput,
    TaskUpdateInput,
};

use crate::error::{EntityKind, StoreError, StoreResult};

/// Everything one session holds. Collections keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Bumped once per successful mutation
    pub revision: u64,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub comments: Vec<Comment>,
    pub messages: Vec<Message>,
    pub documents: Vec<Document>,
    pub notifications: Vec<Notification>,
    pub change_requests: Vec<ChangeRequest>,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Point-in-time copy handed to pull-based consumers
pub type StoreSnapshot = StoreState;

/// Use the supplied id if it is free, otherwise generate one
fn claim_id(
    entity: EntityKind,
    supplied: Option<String>,
    prefix: &str,
    taken: impl Fn(&str) -> bool,
) -> StoreResult<String> {
    match supplied {
        Some(id) => {
            let id = id.trim().to_string();
            if taken(&id) {
                Err(StoreError::DuplicateId { entity, id })
            } else {
                Ok(id)
            }
        }
        None => {
            let mut id = generate_id(prefix);
            while taken(&id) {
                id = generate_id(prefix);
            }
            Ok(id)
        }
    }
}

fn transition(
    entity: EntityKind,
    id: &str,
    from: ApprovalStatus,
    to: ApprovalStatus,
) -> StoreResult<ApprovalStatus> {
    from.transition(to).map_err(|_| StoreError::invalid_transition(entity, id, from, to))
}

impl StoreState {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Directory name for a user id, if the user is known
    fn user_name(&self, id: &str) -> Option<String> {
        self.user(id.trim()).map(|u| u.name.clone())
    }

    fn user_avatar(&self, id: &str) -> Option<String> {
        self.user(id.trim()).map(|u| u.avatar.clone())
    }

    fn has_project(&self, id: &str) -> bool {
        self.project(id).is_some()
    }

    fn has_task(&self, id: &str) -> bool {
        self.task(id).is_some()
    }

    fn check_dependencies_exist(&self, dependencies: &[String]) -> StoreResult<()> {
        match dependencies.iter().find(|d| !self.has_task(d)) {
            Some(missing) => Err(StoreError::reference(
                EntityKind::Task,
                "dependencies",
                missing,
            )),
            None => Ok(()),
        }
    }

    pub(crate) fn add_project(&mut self, input: ProjectCreateInput) -> StoreResult<Project> {
        StoreError::check(validate_project(&input))?;

        let id = claim_id(EntityKind::Project, input.id, PROJECT_ID_PREFIX, |id| {
            self.has_project(id)
        })?;

        let project = Project {
            id,
            name: input.name.trim().to_string(),
            description: input.description,
            status: input.status.unwrap_or_default(),
            start_date: input.start_date,
            end_date: input.end_date,
            budget: input.budget,
            manager: input.manager,
        };

        self.projects.push(project.clone());
        Ok(project)
    }

    pub(crate) fn add_task(&mut self, mut input: TaskCreateInput) -> StoreResult<Task> {
        StoreError::check(validate_task_create(&input))?;

        if !self.has_project(&input.project_id) {
            return Err(StoreError::reference(
                EntityKind::Project,
                "projectId",
                &input.project_id,
            ));
        }

        input.dependencies = normalize_dependencies(std::mem::take(&mut input.dependencies));
        self.check_dependencies_exist(&input.dependencies)?;

        let id = claim_id(EntityKind::Task, input.id.take(), TASK_ID_PREFIX, |id| {
            self.has_task(id)
        })?;

        if input.assignee_name.is_none() {
            input.assignee_name = self.user_name(&input.assignee);
        }

        let task = input.into_task(id);
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub(crate) fn update_task(
        &mut self,
        task_id: &str,
        mut update: TaskUpdateInput,
    ) -> StoreResult<Task> {
        if !self.has_task(task_id) {
            return Err(StoreError::not_found(EntityKind::Task, task_id));
        }

        StoreError::check(validate_task_update(task_id, &update))?;

        if let Some(dependencies) = update.dependencies.take() {
            let dependencies = normalize_dependencies(dependencies);
            self.check_dependencies_exist(&dependencies)?;
            update.dependencies = Some(dependencies);
        }

        if update.assignee_name.is_none() {
            if let Some(assignee) = &update.assignee {
                update.assignee_name = self.user_name(assignee);
            }
        }

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, task_id))?;

        update.apply_to(task);
        Ok(task.clone())
    }

    pub(crate) fn add_comment(&mut self, input: CommentCreateInput) -> StoreResult<Comment> {
        StoreError::check(validate_comment(&input))?;

        if !self.has_task(&input.task_id) {
            return Err(StoreError::reference(
                EntityKind::Task,
                "taskId",
                &input.task_id,
            ));
        }

        let id = claim_id(EntityKind::Comment, input.id, COMMENT_ID_PREFIX, |id| {
            self.comments.iter().any(|c| c.id == id)
        })?;

        let comment = Comment {
            id,
            task_id: input.task_id,
            user_avatar: input.user_avatar.or_else(|| self.user_avatar(&input.user_id)),
            user_id: input.user_id,
            user_name: input.user_name,
            content: input.content.trim().to_string(),
            created_at: input.created_at.unwrap_or_else(Utc::now),
        };

        self.comments.push(comment.clone());
        Ok(comment)
    }

    pub(crate) fn add_message(&mut self, input: MessageCreateInput) -> StoreResult<Message> {
        StoreError::check(validate_message(&input))?;

        let id = claim_id(EntityKind::Message, input.id, MESSAGE_ID_PREFIX, |id| {
            self.messages.iter().any(|m| m.id == id)
        })?;

        let message = Message {
            id,
            channel_id: input.channel_id.trim().to_string(),
            user_avatar: input.user_avatar.or_else(|| self.user_avatar(&input.user_id)),
            user_id: input.user_id,
            user_name: input.user_name,
            content: input.content.trim().to_string(),
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
        };

        self.messages.push(message.clone());
        Ok(message)
    }

    /// Highest stored version of a document name within a project
    pub fn latest_document_version(&self, name: &str, project_id: Option<&str>) -> Option<u32> {
        self.documents
            .iter()
            .filter(|d| d.name == name && d.project_id.as_deref() == project_id)
            .map(|d| d.version)
            .max()
    }

    pub(crate) fn add_document(&mut self, input: DocumentCreateInput) -> StoreResult<Document> {
        StoreError::check(validate_document(&input))?;

        if let Some(project_id) = &input.project_id {
            if !self.has_project(project_id) {
                return Err(StoreError::reference(
                    EntityKind::Project,
                    "projectId",
                    project_id,
                ));
            }
        }

        if let Some(task_id) = &input.task_id {
            let task = self
                .task(task_id)
                .ok_or_else(|| StoreError::reference(EntityKind::Task, "taskId", task_id))?;

            if let Some(project_id) = &input.project_id {
                if &task.project_id != project_id {
                    return Err(StoreError::Validation(vec![ValidationError::new(
                        "taskId",
                        format!(
                            "Task {} belongs to project {}, not {}",
                            task_id, task.project_id, project_id
                        ),
                    )]));
                }
            }
        }

        let name = input.name.trim().to_string();
        if let Some(latest) = self.latest_document_version(&name, input.project_id.as_deref()) {
            if input.version < latest {
                return Err(StoreError::Validation(vec![ValidationError::new(
                    "version",
                    format!(
                        "{} is already at version {}; got {}",
                        name, latest, input.version
                    ),
                )]));
            }
        }

        let id = claim_id(EntityKind::Document, input.id, DOCUMENT_ID_PREFIX, |id| {
            self.documents.iter().any(|d| d.id == id)
        })?;

        let document = Document {
            id,
            name,
            doc_type: input.doc_type,
            size: input.size,
            uploaded_by: input.uploaded_by,
            date: input.date,
            project_id: input.project_id,
            task_id: input.task_id,
            version: input.version,
            url: input.url,
        };

        self.documents.push(document.clone());
        Ok(document)
    }

    pub(crate) fn add_notification(
        &mut self,
        input: NotificationCreateInput,
    ) -> StoreResult<Notification> {
        StoreError::check(validate_notification(&input))?;

        let id = claim_id(
            EntityKind::Notification,
            input.id,
            NOTIFICATION_ID_PREFIX,
            |id| self.notifications.iter().any(|n| n.id == id),
        )?;

        let notification = Notification {
            id,
            title: input.title,
            message: input.message,
            kind: input.kind,
            time: input.time.unwrap_or_else(Utc::now),
            read: false,
        };

        self.notifications.push(notification.clone());
        Ok(notification)
    }

    /// Returns `None` when the notification was already read
    pub(crate) fn mark_notification_read(&mut self, id: &str) -> StoreResult<Option<Notification>> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Notification, id))?;

        if notification.read {
            return Ok(None);
        }

        notification.read = true;
        Ok(Some(notification.clone()))
    }

    /// Returns the ids that flipped to read
    pub(crate) fn mark_all_notifications_read(&mut self) -> Vec<String> {
        self.notifications
            .iter_mut()
            .filter(|n| !n.read)
            .map(|n| {
                n.read = true;
                n.id.clone()
            })
            .collect()
    }

    pub(crate) fn add_change_request(
        &mut self,
        input: ChangeRequestCreateInput,
    ) -> StoreResult<ChangeRequest> {
        StoreError::check(validate_change_request(&input))?;

        if !self.has_project(&input.project_id) {
            return Err(StoreError::reference(
                EntityKind::Project,
                "projectId",
                &input.project_id,
            ));
        }

        let id = claim_id(
            EntityKind::ChangeRequest,
            input.id,
            CHANGE_REQUEST_ID_PREFIX,
            |id| self.change_requests.iter().any(|c| c.id == id),
        )?;

        let change_request = ChangeRequest {
            id,
            project_id: input.project_id,
            title: input.title.trim().to_string(),
            description: input.description,
            impact_cost: input.impact_cost,
            impact_time: input.impact_time,
            status: ApprovalStatus::Pending,
            requested_by: input.requested_by,
            date: input.date,
        };

        self.change_requests.push(change_request.clone());
        Ok(change_request)
    }

    pub(crate) fn update_change_request_status(
        &mut self,
        id: &str,
        status: ApprovalStatus,
    ) -> StoreResult<(ChangeRequest, ApprovalStatus)> {
        let change_request = self
            .change_requests
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::ChangeRequest, id))?;

        let previous = change_request.status;
        change_request.status = transition(EntityKind::ChangeRequest, id, previous, status)?;

        Ok((change_request.clone(), previous))
    }

    pub(crate) fn add_transaction(
        &mut self,
        input: TransactionCreateInput,
    ) -> StoreResult<Transaction> {
        StoreError::check(validate_transaction(&input))?;

        let id = claim_id(
            EntityKind::Transaction,
            input.id,
            TRANSACTION_ID_PREFIX,
            |id| self.transactions.iter().any(|t| t.id == id),
        )?;

        let transaction = Transaction {
            id,
            description: input.description.trim().to_string(),
            amount: input.amount,
            category: input.category.trim().to_string(),
            date: input.date,
            status: ApprovalStatus::Pending,
        };

        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    pub(crate) fn update_transaction_status(
        &mut self,
        id: &str,
        status: ApprovalStatus,
    ) -> StoreResult<(Transaction, ApprovalStatus)> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Transaction, id))?;

        let previous = transaction.status;
        transaction.status = transition(EntityKind::Transaction, id, previous, status)?;

        Ok((transaction.clone(), previous))
    }

    pub(crate) fn add_milestone(&mut self, input: MilestoneCreateInput) -> StoreResult<Milestone> {
        StoreError::check(validate_milestone(&input))?;

        let id = claim_id(EntityKind::Milestone, input.id, MILESTONE_ID_PREFIX, |id| {
            self.milestone(id).is_some()
        })?;

        let milestone = Milestone {
            id,
            title: input.title.trim().to_string(),
            status: input.status.unwrap_or_default(),
            date: input.date,
        };

        self.milestones.push(milestone.clone());
        Ok(milestone)
    }

    /// Owner sign-off. Only a milestone pending approval can be completed.
    pub(crate) fn approve_milestone(&mut self, id: &str) -> StoreResult<Milestone> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Milestone, id))?;

        milestone.status = milestone.status.approve().map_err(|from| {
            StoreError::invalid_transition(
                EntityKind::Milestone,
                id,
                from,
                MilestoneStatus::Completed,
            )
        })?;

        Ok(milestone.clone())
    }
}
