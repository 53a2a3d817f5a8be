// ABOUTME: Read accessors and derived-value queries on the store handle
// ABOUTME: Every query reads the current collections; nothing is cached between calls

use sitedesk_core::{
    ApprovalStatus, ChangeRequest, Comment, Document, Message, Milestone, MilestoneStatus,
    Notification, Project, Transaction, User, UserRole,
};
use sitedesk_tasks::Task;
use tracing::debug;

use crate::derive::{
    project_progress, AssigneeWorkload, FinanceSummary, ProjectOverview, ProjectReport, TaskBoard,
};
use crate::error::{EntityKind, StoreError, StoreResult};
use crate::state::StoreSnapshot;
use crate::store::ProjectStore;

impl ProjectStore {
    /// Copy of every collection plus the current revision
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.read().await.clone()
    }

    pub async fn revision(&self) -> u64 {
        self.read().await.revision
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.read().await.projects.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.read().await.tasks.clone()
    }

    pub async fn comments(&self) -> Vec<Comment> {
        self.read().await.comments.clone()
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.read().await.messages.clone()
    }

    pub async fn documents(&self) -> Vec<Document> {
        self.read().await.documents.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.read().await.notifications.clone()
    }

    pub async fn change_requests(&self) -> Vec<ChangeRequest> {
        self.read().await.change_requests.clone()
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.read().await.transactions.clone()
    }

    pub async fn milestones(&self) -> Vec<Milestone> {
        self.read().await.milestones.clone()
    }

    pub async fn users(&self) -> Vec<User> {
        self.read().await.users.clone()
    }

    pub async fn project(&self, id: &str) -> Option<Project> {
        self.read().await.project(id).cloned()
    }

    pub async fn task(&self, id: &str) -> Option<Task> {
        self.read().await.task(id).cloned()
    }

    pub async fn user(&self, id: &str) -> Option<User> {
        self.read().await.user(id).cloned()
    }

    /// The directory entry the role picker signs in as
    pub async fn user_for_role(&self, role: UserRole) -> Option<User> {
        self.read()
            .await
            .users
            .iter()
            .find(|u| u.role == role)
            .cloned()
    }

    /// Rounded mean of the project's task progress; 0 without tasks
    pub async fn project_progress(&self, project_id: &str) -> u8 {
        let state = self.read().await;
        let progress = project_progress(&state.tasks, project_id);
        debug!("Derived progress {} for project {}", progress, project_id);
        progress
    }

    pub async fn project_overview(&self, project_id: &str) -> StoreResult<ProjectOverview> {
        let state = self.read().await;
        let project = state
            .project(project_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, project_id))?;
        Ok(ProjectOverview::build(project, &state.tasks))
    }

    pub async fn project_overviews(&self) -> Vec<ProjectOverview> {
        let state = self.read().await;
        state
            .projects
            .iter()
            .map(|p| ProjectOverview::build(p, &state.tasks))
            .collect()
    }

    pub async fn project_report(&self, project_id: &str) -> StoreResult<ProjectReport> {
        let state = self.read().await;
        if state.project(project_id).is_none() {
            return Err(StoreError::not_found(EntityKind::Project, project_id));
        }
        Ok(ProjectReport::build(project_id, &state.tasks))
    }

    /// Kanban board across all projects, or for one
    pub async fn task_board(&self, project_id: Option<&str>) -> TaskBoard {
        TaskBoard::build(&self.read().await.tasks, project_id)
    }

    pub async fn tasks_for_project(&self, project_id: &str) -> Vec<Task> {
        self.read()
            .await
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect()
    }

    pub async fn tasks_for_assignee(&self, user_id: &str) -> AssigneeWorkload {
        AssigneeWorkload::build(user_id, &self.read().await.tasks)
    }

    pub async fn comments_for_task(&self, task_id: &str) -> Vec<Comment> {
        self.read()
            .await
            .comments
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect()
    }

    pub async fn messages_for_channel(&self, channel_id: &str) -> Vec<Message> {
        self.read()
            .await
            .messages
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .cloned()
            .collect()
    }

    pub async fn documents_for_project(&self, project_id: &str) -> Vec<Document> {
        self.read()
            .await
            .documents
            .iter()
            .filter(|d| d.project_id.as_deref() == Some(project_id))
            .cloned()
            .collect()
    }

    pub async fn pending_change_requests(&self) -> Vec<ChangeRequest> {
        self.read()
            .await
            .change_requests
            .iter()
            .filter(|c| c.status == ApprovalStatus::Pending)
            .cloned()
            .collect()
    }

    /// Milestones waiting on owner sign-off
    pub async fn pending_milestones(&self) -> Vec<Milestone> {
        self.read()
            .await
            .milestones
            .iter()
            .filter(|m| m.status == MilestoneStatus::PendingApproval)
            .cloned()
            .collect()
    }

    pub async fn finance_summary(&self) -> FinanceSummary {
        FinanceSummary::build(&self.read().await.transactions)
    }

    pub async fn unread_notification_count(&self) -> usize {
        self.read()
            .await
            .notifications
            .iter()
            .filter(|n| !n.read)
            .count()
    }
}
