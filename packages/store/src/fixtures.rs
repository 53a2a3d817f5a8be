// ABOUTME: Demo data the dashboard session starts from
// ABOUTME: Fixed ids and timestamps so every seeded session looks the same

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sitedesk_core::{
    ApprovalStatus, ChangeRequest, Document, DocumentType, Message, Milestone, MilestoneStatus,
    Notification, NotificationKind, Project, ProjectStatus, Transaction, User, UserRole,
    GENERAL_CHANNEL,
};
use sitedesk_tasks::{Task, TaskPriority, TaskStatus};

use crate::state::StoreState;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn avatar(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/100/100", seed)
}

pub fn demo_users() -> Vec<User> {
    [
        ("u1", "Alex Sterling", UserRole::ProjectOwner, "alex"),
        ("u2", "Sarah Chen", UserRole::Finance, "sarah"),
        ("u3", "Marcus Ford", UserRole::ProjectManager, "marcus"),
        ("u4", "Emily Dao", UserRole::ProjectEngineer, "emily"),
        ("u5", "Jordan Blake", UserRole::SystemAdmin, "jordan"),
    ]
    .into_iter()
    .map(|(id, name, role, seed)| User {
        id: id.to_string(),
        name: name.to_string(),
        role,
        avatar: avatar(seed),
    })
    .collect()
}

fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "p1".to_string(),
            name: "Contoso Tower A".to_string(),
            description:
                "Main residential tower construction including foundation and core structure."
                    .to_string(),
            status: ProjectStatus::Active,
            start_date: date(2023, 1, 15),
            end_date: date(2024, 6, 30),
            budget: 4_200_000.0,
            manager: "Marcus Ford".to_string(),
        },
        Project {
            id: "p2".to_string(),
            name: "West Wing Expansion".to_string(),
            description: "Commercial annex expansion for retail units.".to_string(),
            status: ProjectStatus::Planning,
            start_date: date(2023, 11, 1),
            end_date: date(2024, 3, 1),
            budget: 1_500_000.0,
            manager: "Marcus Ford".to_string(),
        },
    ]
}

fn demo_tasks() -> Vec<Task> {
    let task = |id: &str,
                title: &str,
                (assignee, assignee_name): (&str, &str),
                status: TaskStatus,
                priority: TaskPriority,
                due_date: NaiveDate,
                progress: u8| Task {
        id: id.to_string(),
        project_id: "p1".to_string(),
        title: title.to_string(),
        description: Some("Standard task procedure as per ISO-9001 guidelines.".to_string()),
        assignee: assignee.to_string(),
        assignee_name: assignee_name.to_string(),
        status,
        priority,
        due_date,
        progress,
        dependencies: Vec::new(),
    };

    let emily = ("u4", "Emily Dao");
    let marcus = ("u3", "Marcus Ford");

    vec![
        task(
            "t1",
            "Foundation Inspection",
            emily,
            TaskStatus::InProgress,
            TaskPriority::High,
            date(2023, 10, 25),
            45,
        ),
        task(
            "t2",
            "HVAC Blueprint Review",
            emily,
            TaskStatus::Todo,
            TaskPriority::Medium,
            date(2023, 10, 28),
            0,
        ),
        task(
            "t3",
            "Safety Compliance Check",
            marcus,
            TaskStatus::Done,
            TaskPriority::High,
            date(2023, 10, 20),
            100,
        ),
        Task {
            dependencies: vec!["t1".to_string()],
            ..task(
                "t4",
                "Material Procurement",
                emily,
                TaskStatus::Review,
                TaskPriority::High,
                date(2023, 10, 24),
                80,
            )
        },
    ]
}

fn demo_messages() -> Vec<Message> {
    vec![
        Message {
            id: "msg1".to_string(),
            channel_id: GENERAL_CHANNEL.to_string(),
            user_id: "u3".to_string(),
            user_name: "Marcus Ford".to_string(),
            user_avatar: Some(avatar("marcus")),
            content: "Team, please update your progress logs by EOD.".to_string(),
            timestamp: at(2023, 10, 22, 10, 30),
        },
        Message {
            id: "msg2".to_string(),
            channel_id: GENERAL_CHANNEL.to_string(),
            user_id: "u4".to_string(),
            user_name: "Emily Dao".to_string(),
            user_avatar: Some(avatar("emily")),
            content: "Copy that. Uploading site photos now.".to_string(),
            timestamp: at(2023, 10, 22, 10, 32),
        },
    ]
}

fn demo_documents() -> Vec<Document> {
    let doc = |id: &str,
               name: &str,
               doc_type: DocumentType,
               size: &str,
               uploaded_by: &str,
               date: NaiveDate,
               version: u32| Document {
        id: id.to_string(),
        name: name.to_string(),
        doc_type,
        size: size.to_string(),
        uploaded_by: uploaded_by.to_string(),
        date,
        project_id: Some("p1".to_string()),
        task_id: None,
        version,
        url: None,
    };

    vec![
        doc(
            "d1",
            "Site_Safety_Protocol_v2.pdf",
            DocumentType::Pdf,
            "2.4 MB",
            "Marcus Ford",
            date(2023, 10, 15),
            2,
        ),
        doc(
            "d2",
            "Budget_Forecast_Q4.xls",
            DocumentType::Xls,
            "1.1 MB",
            "Sarah Chen",
            date(2023, 10, 18),
            1,
        ),
        Document {
            task_id: Some("t1".to_string()),
            ..doc(
                "d3",
                "Foundation_Blueprints.img",
                DocumentType::Img,
                "15 MB",
                "Emily Dao",
                date(2023, 10, 1),
                1,
            )
        },
    ]
}

fn demo_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "n1".to_string(),
            title: "Budget Alert".to_string(),
            message: "Logistics budget is at 89% utilization.".to_string(),
            kind: NotificationKind::Alert,
            time: at(2023, 10, 22, 8, 0),
            read: false,
        },
        Notification {
            id: "n2".to_string(),
            title: "Task Completed".to_string(),
            message: "Safety Compliance Check marked as done by Marcus.".to_string(),
            kind: NotificationKind::Success,
            time: at(2023, 10, 21, 16, 45),
            read: false,
        },
        Notification {
            id: "n3".to_string(),
            title: "New Document".to_string(),
            message: "Emily uploaded Foundation Blueprints.".to_string(),
            kind: NotificationKind::Info,
            time: at(2023, 10, 20, 14, 10),
            read: true,
        },
    ]
}

fn demo_change_requests() -> Vec<ChangeRequest> {
    vec![
        ChangeRequest {
            id: "cr1".to_string(),
            project_id: "p1".to_string(),
            title: "Upgrade Concrete Grade".to_string(),
            description: "Switch to C50/60 for better durability due to soil report."
                .to_string(),
            impact_cost: 15_000.0,
            impact_time: 2,
            status: ApprovalStatus::Pending,
            requested_by: "Emily Dao".to_string(),
            date: date(2023, 10, 20),
        },
        ChangeRequest {
            id: "cr2".to_string(),
            project_id: "p1".to_string(),
            title: "Additional Crane Rental".to_string(),
            description: "Extend rental for 3 days due to weather delay.".to_string(),
            impact_cost: 4_500.0,
            impact_time: 3,
            status: ApprovalStatus::Approved,
            requested_by: "Marcus Ford".to_string(),
            date: date(2023, 10, 15),
        },
    ]
}

fn demo_transactions() -> Vec<Transaction> {
    let tx = |id: &str,
              description: &str,
              amount: f64,
              category: &str,
              day: u32,
              status: ApprovalStatus| {
        Transaction {
            id: id.to_string(),
            description: description.to_string(),
            amount,
            category: category.to_string(),
            date: date(2023, 10, day),
            status,
        }
    };

    vec![
        tx("tx1", "Steel Beams Batch A", 45_000.0, "Materials", 22, ApprovalStatus::Pending),
        tx("tx2", "Consultant Fee: Geo-Tech", 12_000.0, "Services", 21, ApprovalStatus::Approved),
        tx("tx3", "Site Excavation Rental", 8_500.0, "Equipment", 20, ApprovalStatus::Approved),
        tx("tx4", "Safety Gear Bulk Order", 3_200.0, "Materials", 23, ApprovalStatus::Pending),
    ]
}

fn demo_milestones() -> Vec<Milestone> {
    [
        ("m1", "Phase 1: Excavation", MilestoneStatus::Completed, date(2023, 9, 15)),
        ("m2", "Phase 2: Foundation Pour", MilestoneStatus::PendingApproval, date(2023, 10, 22)),
        ("m3", "Phase 3: Structural Steel", MilestoneStatus::Upcoming, date(2023, 11, 30)),
    ]
    .into_iter()
    .map(|(id, title, status, date)| Milestone {
        id: id.to_string(),
        title: title.to_string(),
        status,
        date,
    })
    .collect()
}

/// Full demo session contents at revision 0
pub fn demo_state() -> StoreState {
    StoreState {
        revision: 0,
        users: demo_users(),
        projects: demo_projects(),
        tasks: demo_tasks(),
        comments: Vec::new(),
        messages: demo_messages(),
        documents: demo_documents(),
        notifications: demo_notifications(),
        change_requests: demo_change_requests(),
        transactions: demo_transactions(),
        milestones: demo_milestones(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::project_progress;
    use std::collections::HashSet;

    #[test]
    fn test_one_user_per_role() {
        let users = demo_users();
        let roles: HashSet<UserRole> = users.iter().map(|u| u.role).collect();
        assert_eq!(roles.len(), UserRole::ALL.len());
    }

    #[test]
    fn test_seeded_references_resolve() {
        let state = demo_state();

        for task in &state.tasks {
            assert!(state.project(&task.project_id).is_some(), "{}", task.id);
            for dep in &task.dependencies {
                assert!(state.task(dep).is_some(), "{} -> {}", task.id, dep);
            }
        }
        for doc in &state.documents {
            if let Some(project_id) = &doc.project_id {
                assert!(state.project(project_id).is_some());
            }
            if let Some(task_id) = &doc.task_id {
                assert_eq!(
                    state.task(task_id).map(|t| t.project_id.as_str()),
                    doc.project_id.as_deref()
                );
            }
        }
        for cr in &state.change_requests {
            assert!(state.project(&cr.project_id).is_some());
        }
        for task in &state.tasks {
            assert_eq!(
                state.user(&task.assignee).map(|u| u.name.as_str()),
                Some(task.assignee_name.as_str())
            );
        }
        for message in &state.messages {
            assert_eq!(
                state.user(&message.user_id).map(|u| u.avatar.clone()),
                message.user_avatar
            );
        }
    }

    #[test]
    fn test_seeded_progress() {
        let state = demo_state();
        assert_eq!(project_progress(&state.tasks, "p1"), 56);
        assert_eq!(project_progress(&state.tasks, "p2"), 0);
    }

    #[test]
    fn test_fixed_timestamps() {
        let state = demo_state();
        assert_eq!(
            state.messages[0].timestamp.to_rfc3339(),
            "2023-10-22T10:30:00+00:00"
        );
        assert_eq!(state.notifications.iter().filter(|n| !n.read).count(), 2);
    }

    #[test]
    fn test_one_milestone_awaits_sign_off() {
        let milestones = demo_milestones();
        let pending: Vec<&str> = milestones
            .iter()
            .filter(|m| m.status == MilestoneStatus::PendingApproval)
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(pending, vec!["Phase 2: Foundation Pour"]);
    }
}
