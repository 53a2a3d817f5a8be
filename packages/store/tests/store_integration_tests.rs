// ABOUTME: Integration tests for store mutations and the progress derivation
// ABOUTME: Covers referential integrity, partial updates, approvals, milestones, notifications

mod common;

use common::{
    change_request_input, comment_input, document_input, empty_store, message_input,
    milestone_input, project_input, seeded_store, task_input, transaction_input,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sitedesk_core::{
    ApprovalStatus, ChangeRequestCreateInput, CommentCreateInput, DocumentCreateInput,
    MessageCreateInput, MilestoneCreateInput, MilestoneStatus, NotificationCreateInput,
    NotificationKind, TransactionCreateInput, GENERAL_CHANNEL,
};
use sitedesk_store::{EntityKind, ProjectStore, StoreError, StoreResult};
use sitedesk_tasks::{TaskStatus, TaskUpdateInput};

/// Add one entity of the given kind under a supplied id
async fn add_with_id(store: &ProjectStore, entity: EntityKind, id: &str) -> StoreResult<()> {
    let id = Some(id.to_string());
    match entity {
        EntityKind::Project => {
            let mut input = project_input("unused");
            input.id = id;
            store.add_project(input).await.map(|_| ())
        }
        EntityKind::Task => {
            let mut input = task_input("unused", "p1", 0);
            input.id = id;
            store.add_task(input).await.map(|_| ())
        }
        EntityKind::Comment => store
            .add_comment(CommentCreateInput {
                id,
                ..comment_input("t1", "Rebar spacing checked.")
            })
            .await
            .map(|_| ()),
        EntityKind::Message => store
            .add_message(MessageCreateInput {
                id,
                ..message_input(GENERAL_CHANNEL, "Pour starts at 7.")
            })
            .await
            .map(|_| ()),
        EntityKind::Document => store
            .add_document(DocumentCreateInput {
                id,
                ..document_input("Rebar_Schedule.pdf", Some("p1"), 1)
            })
            .await
            .map(|_| ()),
        EntityKind::Notification => store
            .add_notification(NotificationCreateInput {
                id,
                title: "Inspection Booked".to_string(),
                message: String::new(),
                kind: NotificationKind::Info,
                time: None,
            })
            .await
            .map(|_| ()),
        EntityKind::ChangeRequest => store
            .add_change_request(ChangeRequestCreateInput {
                id,
                ..change_request_input("p1")
            })
            .await
            .map(|_| ()),
        EntityKind::Transaction => store
            .add_transaction(TransactionCreateInput {
                id,
                ..transaction_input(1_250.0)
            })
            .await
            .map(|_| ()),
        EntityKind::Milestone => store
            .add_milestone(MilestoneCreateInput {
                id,
                ..milestone_input("Phase 4: Facade", MilestoneStatus::Upcoming)
            })
            .await
            .map(|_| ()),
    }
}

#[tokio::test]
async fn test_progress_follows_task_changes() {
    let store = empty_store();

    store.add_project(project_input("p1")).await.unwrap();
    assert_eq!(store.project_progress("p1").await, 0);

    store.add_task(task_input("t1", "p1", 40)).await.unwrap();
    assert_eq!(store.project_progress("p1").await, 40);

    store.add_task(task_input("t2", "p1", 60)).await.unwrap();
    assert_eq!(store.project_progress("p1").await, 50);

    store
        .update_task(
            "t1",
            TaskUpdateInput {
                progress: Some(100),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(store.project_progress("p1").await, 80);
}

#[tokio::test]
async fn test_progress_read_is_stable() {
    let store = seeded_store();

    let first = store.project_progress("p1").await;
    let second = store.project_progress("p1").await;

    assert_eq!(first, second);
    assert_eq!(first, 56);
}

#[tokio::test]
async fn test_progress_for_unknown_project_is_zero() {
    let store = seeded_store();
    assert_eq!(store.project_progress("missing").await, 0);
}

#[tokio::test]
async fn test_add_task_to_unknown_project_fails() {
    let store = seeded_store();
    let before = store.tasks().await.len();

    let err = store
        .add_task(task_input("t9", "nonexistent", 10))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::Reference {
            entity: EntityKind::Project,
            field: "projectId",
            id: "nonexistent".to_string(),
        }
    );
    assert_eq!(store.tasks().await.len(), before);
}

#[tokio::test]
async fn test_add_task_with_missing_dependency_fails() {
    let store = seeded_store();
    let mut input = task_input("t9", "p1", 0);
    input.dependencies = vec!["t1".to_string(), "t404".to_string()];

    let err = store.add_task(input).await.unwrap_err();

    assert!(matches!(
        err,
        StoreError::Reference { entity: EntityKind::Task, ref id, .. } if id == "t404"
    ));
    assert!(store.task("t9").await.is_none());
}

#[tokio::test]
async fn test_add_task_collapses_duplicate_dependencies() {
    let store = seeded_store();
    let mut input = task_input("t9", "p1", 0);
    input.dependencies = vec!["t1".to_string(), " t1 ".to_string(), "t3".to_string()];

    let task = store.add_task(input).await.unwrap();

    assert_eq!(task.dependencies, vec!["t1".to_string(), "t3".to_string()]);
}

#[tokio::test]
async fn test_duplicate_task_id_is_rejected() {
    let store = seeded_store();

    let err = store.add_task(task_input("t1", "p1", 0)).await.unwrap_err();

    assert_eq!(
        err,
        StoreError::DuplicateId {
            entity: EntityKind::Task,
            id: "t1".to_string(),
        }
    );
}

#[tokio::test]
async fn test_generated_ids_use_prefix() {
    let store = seeded_store();
    let mut input = task_input("unused", "p1", 0);
    input.id = None;

    let task = store.add_task(input).await.unwrap();

    assert!(task.id.starts_with("task-"));
    assert!(store.task(&task.id).await.is_some());
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let store = seeded_store();
    let before = store.task("t2").await.unwrap();
    assert_eq!(before.status, TaskStatus::Todo);
    assert_eq!(before.progress, 0);

    let after = store
        .update_task(
            "t2",
            TaskUpdateInput {
                progress: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(after.status, TaskStatus::Todo);
    assert_eq!(after.progress, 50);
    assert_eq!(after.title, before.title);
    assert_eq!(store.task("t2").await.unwrap(), after);
}

#[tokio::test]
async fn test_update_clamps_progress() {
    let store = seeded_store();

    store
        .update_task(
            "t2",
            TaskUpdateInput {
                progress: Some(150),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(store.task("t2").await.unwrap().progress, 100);

    store
        .update_task(
            "t2",
            TaskUpdateInput {
                progress: Some(-10),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(store.task("t2").await.unwrap().progress, 0);
}

#[tokio::test]
async fn test_update_unknown_task_fails() {
    let store = seeded_store();

    let err = store
        .update_task("t404", TaskUpdateInput::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::NotFound {
            entity: EntityKind::Task,
            id: "t404".to_string(),
        }
    );
}

#[tokio::test]
async fn test_self_dependency_is_rejected() {
    let store = seeded_store();

    let err = store
        .update_task(
            "t2",
            TaskUpdateInput {
                dependencies: Some(vec!["t2".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Validation(ref errors) if errors[0].field == "dependencies"));
    assert!(store.task("t2").await.unwrap().dependencies.is_empty());
}

#[tokio::test]
async fn test_approved_change_request_is_final() {
    let store = seeded_store();

    for target in [ApprovalStatus::Pending, ApprovalStatus::Rejected] {
        let err = store
            .update_change_request_status("cr2", target)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::InvalidTransition {
                entity: EntityKind::ChangeRequest,
                id: "cr2".to_string(),
                from: "Approved".to_string(),
                to: target.to_string(),
            }
        );
    }

    let stored = store
        .change_requests()
        .await
        .into_iter()
        .find(|c| c.id == "cr2")
        .unwrap();
    assert_eq!(stored.status, ApprovalStatus::Approved);
}

#[tokio::test]
async fn test_change_request_lifecycle() {
    let store = seeded_store();

    let created = store
        .add_change_request(change_request_input("p2"))
        .await
        .unwrap();
    assert_eq!(created.status, ApprovalStatus::Pending);
    assert_eq!(store.pending_change_requests().await.len(), 2);

    let rejected = store
        .update_change_request_status(&created.id, ApprovalStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, ApprovalStatus::Rejected);
    assert_eq!(store.pending_change_requests().await.len(), 1);

    let err = store
        .add_change_request(change_request_input("p9"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Reference { entity: EntityKind::Project, .. }));
}

#[tokio::test]
async fn test_transaction_approval_updates_finance_summary() {
    let store = seeded_store();
    let before = store.finance_summary().await;

    store
        .update_transaction_status("tx1", ApprovalStatus::Approved)
        .await
        .unwrap();

    let after = store.finance_summary().await;
    assert_eq!(after.pending_count, before.pending_count - 1);
    assert_eq!(after.approved_amount, before.approved_amount + 45_000.0);

    let err = store
        .update_transaction_status("tx1", ApprovalStatus::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition { .. }));

    let added = store.add_transaction(transaction_input(950.0)).await.unwrap();
    assert_eq!(added.status, ApprovalStatus::Pending);
    assert_eq!(store.finance_summary().await.pending_count, before.pending_count);
}

#[tokio::test]
async fn test_non_finite_amount_is_rejected() {
    let store = seeded_store();
    let before = store.transactions().await;

    let err = store
        .add_transaction(transaction_input(f64::NAN))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.transactions().await.len(), before.len());
}

#[tokio::test]
async fn test_mark_notification_read_twice() {
    let store = seeded_store();

    store.mark_notification_read("n1").await.unwrap();
    store.mark_notification_read("n1").await.unwrap();

    let n1 = store
        .notifications()
        .await
        .into_iter()
        .find(|n| n.id == "n1")
        .unwrap();
    assert!(n1.read);
    assert_eq!(store.unread_notification_count().await, 1);

    let err = store.mark_notification_read("n404").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: EntityKind::Notification, .. }));
}

#[tokio::test]
async fn test_mark_all_notifications_read() {
    let store = seeded_store();

    assert_eq!(store.mark_all_notifications_read().await.unwrap(), 2);
    assert_eq!(store.unread_notification_count().await, 0);
    assert_eq!(store.mark_all_notifications_read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_added_notification_starts_unread() {
    let store = seeded_store();

    let notification = store
        .add_notification(NotificationCreateInput {
            id: None,
            title: "Delivery Delayed".to_string(),
            message: "Steel beams arrive two days late.".to_string(),
            kind: NotificationKind::Alert,
            time: None,
        })
        .await
        .unwrap();

    assert!(notification.id.starts_with("ntf-"));
    assert!(!notification.read);
    assert_eq!(store.unread_notification_count().await, 3);
}

#[tokio::test]
async fn test_comment_requires_existing_task() {
    let store = seeded_store();

    let comment = store
        .add_comment(comment_input("t1", "  Slab cured, ready for framing. "))
        .await
        .unwrap();
    assert_eq!(comment.content, "Slab cured, ready for framing.");
    assert_eq!(store.comments_for_task("t1").await, vec![comment]);

    let err = store
        .add_comment(comment_input("t404", "Hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Reference { entity: EntityKind::Task, .. }));

    let err = store.add_comment(comment_input("t1", "   ")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.comments().await.len(), 1);
}

#[tokio::test]
async fn test_messages_group_by_channel() {
    let store = seeded_store();

    store
        .add_message(message_input("p1", "Crane arrives Monday."))
        .await
        .unwrap();

    assert_eq!(store.messages_for_channel(GENERAL_CHANNEL).await.len(), 2);
    assert_eq!(store.messages_for_channel("p1").await.len(), 1);
}

#[tokio::test]
async fn test_document_versions_never_go_backwards() {
    let store = seeded_store();

    let err = store
        .add_document(document_input("Site_Safety_Protocol_v2.pdf", Some("p1"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(ref errors) if errors[0].field == "version"));

    let v3 = store
        .add_document(document_input("Site_Safety_Protocol_v2.pdf", Some("p1"), 3))
        .await
        .unwrap();
    assert_eq!(v3.version, 3);

    store
        .add_document(document_input("Site_Safety_Protocol_v2.pdf", Some("p2"), 1))
        .await
        .unwrap();
    assert_eq!(store.documents_for_project("p1").await.len(), 4);
}

#[tokio::test]
async fn test_document_task_must_match_project() {
    let store = seeded_store();
    store.add_project(project_input("p3")).await.unwrap();

    let mut input = document_input("Sector3.pdf", Some("p3"), 1);
    input.task_id = Some("t1".to_string());

    let err = store.add_document(input).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(ref errors) if errors[0].field == "taskId"));

    let err = store
        .add_document(document_input("Orphan.pdf", Some("p404"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Reference { entity: EntityKind::Project, .. }));
}

#[tokio::test]
async fn test_invalid_project_reports_every_problem() {
    let store = empty_store();
    let mut input = project_input("p1");
    input.name = " ".to_string();
    input.budget = -1.0;

    let err = store.add_project(input).await.unwrap_err();

    match err {
        StoreError::Validation(errors) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert!(fields.contains(&"name"));
            assert!(fields.contains(&"budget"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(store.projects().await.is_empty());
}

#[rstest]
#[case(EntityKind::Project)]
#[case(EntityKind::Task)]
#[case(EntityKind::Comment)]
#[case(EntityKind::Message)]
#[case(EntityKind::Document)]
#[case(EntityKind::Notification)]
#[case(EntityKind::ChangeRequest)]
#[case(EntityKind::Transaction)]
#[case(EntityKind::Milestone)]
#[tokio::test]
async fn test_duplicate_supplied_id_is_rejected(#[case] entity: EntityKind) {
    let store = seeded_store();
    add_with_id(&store, entity, "dup-1").await.unwrap();
    let before = store.snapshot().await;

    let err = add_with_id(&store, entity, " dup-1 ").await.unwrap_err();

    assert_eq!(
        err,
        StoreError::DuplicateId {
            entity,
            id: "dup-1".to_string(),
        }
    );
    assert_eq!(store.snapshot().await, before);
}

#[rstest]
#[case(EntityKind::Task)]
#[case(EntityKind::Notification)]
#[case(EntityKind::ChangeRequest)]
#[case(EntityKind::Transaction)]
#[case(EntityKind::Milestone)]
#[tokio::test]
async fn test_mutating_unknown_id_is_not_found(#[case] entity: EntityKind) {
    let store = seeded_store();
    let before = store.snapshot().await;

    let err = match entity {
        EntityKind::Task => store
            .update_task("x404", TaskUpdateInput::default())
            .await
            .map(|_| ()),
        EntityKind::Notification => store.mark_notification_read("x404").await,
        EntityKind::ChangeRequest => store
            .update_change_request_status("x404", ApprovalStatus::Approved)
            .await
            .map(|_| ()),
        EntityKind::Transaction => store
            .update_transaction_status("x404", ApprovalStatus::Approved)
            .await
            .map(|_| ()),
        EntityKind::Milestone => store.approve_milestone("x404").await.map(|_| ()),
        other => panic!("no status mutation for {}", other),
    }
    .unwrap_err();

    assert_eq!(
        err,
        StoreError::NotFound {
            entity,
            id: "x404".to_string(),
        }
    );
    assert_eq!(store.snapshot().await, before);
}

#[rstest]
#[case("tx2", ApprovalStatus::Approved, ApprovalStatus::Pending)]
#[case("tx2", ApprovalStatus::Approved, ApprovalStatus::Rejected)]
#[case("tx1", ApprovalStatus::Pending, ApprovalStatus::Pending)]
#[tokio::test]
async fn test_failed_transaction_transition_keeps_status(
    #[case] id: &str,
    #[case] current: ApprovalStatus,
    #[case] target: ApprovalStatus,
) {
    let store = seeded_store();
    let revision = store.revision().await;

    let err = store.update_transaction_status(id, target).await.unwrap_err();

    assert_eq!(
        err,
        StoreError::InvalidTransition {
            entity: EntityKind::Transaction,
            id: id.to_string(),
            from: current.to_string(),
            to: target.to_string(),
        }
    );
    let stored = store
        .transactions()
        .await
        .into_iter()
        .find(|t| t.id == id)
        .unwrap();
    assert_eq!(stored.status, current);
    assert_eq!(store.revision().await, revision);
}

#[tokio::test]
async fn test_padded_self_dependency_is_rejected() {
    let store = seeded_store();
    let before = store.snapshot().await;

    let err = store
        .update_task(
            "t2",
            TaskUpdateInput {
                dependencies: Some(vec![" t2".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(ref errors) if errors[0].field == "dependencies"));

    let mut input = task_input("t9", "p1", 0);
    input.dependencies = vec!["t9 ".to_string()];
    let err = store.add_task(input).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_padded_document_name_cannot_roll_back_version() {
    let store = seeded_store();

    let err = store
        .add_document(document_input(" Site_Safety_Protocol_v2.pdf", Some("p1"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(ref errors) if errors[0].field == "version"));
    assert_eq!(store.documents_for_project("p1").await.len(), 3);
}

#[tokio::test]
async fn test_milestone_sign_off() {
    let store = seeded_store();
    assert_eq!(store.milestones().await.len(), 3);

    let pending = store.pending_milestones().await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "m2");

    let approved = store.approve_milestone("m2").await.unwrap();
    assert_eq!(approved.status, MilestoneStatus::Completed);
    assert!(store.pending_milestones().await.is_empty());

    let revision = store.revision().await;
    for (id, from) in [
        ("m2", MilestoneStatus::Completed),
        ("m3", MilestoneStatus::Upcoming),
    ] {
        let err = store.approve_milestone(id).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                entity: EntityKind::Milestone,
                id: id.to_string(),
                from: from.to_string(),
                to: "Completed".to_string(),
            }
        );
    }
    assert_eq!(store.revision().await, revision);

    let added = store
        .add_milestone(milestone_input("Phase 4: Facade", MilestoneStatus::PendingApproval))
        .await
        .unwrap();
    assert!(added.id.starts_with("ms-"));
    assert_eq!(store.pending_milestones().await, vec![added]);
}

#[tokio::test]
async fn test_display_fields_come_from_directory() {
    let store = seeded_store();

    let task = store.add_task(task_input("t9", "p1", 0)).await.unwrap();
    assert_eq!(task.assignee_name, "Emily Dao");

    let task = store
        .update_task(
            "t9",
            TaskUpdateInput {
                assignee: Some("u3".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(task.assignee_name, "Marcus Ford");

    let comment = store
        .add_comment(comment_input("t9", "Taking this over."))
        .await
        .unwrap();
    assert_eq!(
        comment.user_avatar.as_deref(),
        Some("https://picsum.photos/seed/marcus/100/100")
    );

    let message = store
        .add_message(MessageCreateInput {
            user_id: "guest".to_string(),
            ..message_input(GENERAL_CHANNEL, "Visitor badge at the gate.")
        })
        .await
        .unwrap();
    assert!(message.user_avatar.is_none());
}
