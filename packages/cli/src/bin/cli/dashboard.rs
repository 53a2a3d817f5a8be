use colored::*;
use serde_json::json;
use sitedesk_cli::render::{
    board_table, change_requests_table, finance_table, format_money, milestones_table,
    tasks_table, users_table,
};
use sitedesk_core::{User, UserRole};
use sitedesk_store::ProjectStore;

use super::print_json;

pub async fn show_dashboard(
    store: &ProjectStore,
    role: UserRole,
    json: bool,
) -> anyhow::Result<()> {
    let user = store
        .user_for_role(role)
        .await
        .ok_or_else(|| anyhow::anyhow!("No user is registered for role {}", role))?;

    if !json {
        print_header(store, &user).await;
    }

    match role {
        UserRole::ProjectOwner => owner_dashboard(store, json).await,
        UserRole::Finance => finance_dashboard(store, json).await,
        UserRole::ProjectManager => manager_dashboard(store, json).await,
        UserRole::ProjectEngineer => engineer_dashboard(store, &user, json).await,
        UserRole::SystemAdmin => admin_dashboard(store, json).await,
    }
}

async fn print_header(store: &ProjectStore, user: &User) {
    println!(
        "{}",
        format!("{} Dashboard - {}", user.role, user.name).blue().bold()
    );

    let unread = store.unread_notification_count().await;
    if unread > 0 {
        println!("{}", format!("{} unread notifications", unread).yellow());
    }
    println!();
}

async fn owner_dashboard(store: &ProjectStore, json: bool) -> anyhow::Result<()> {
    let pending = store.pending_change_requests().await;
    let milestones = store.pending_milestones().await;

    if json {
        return print_json(&json!({
            "pendingChangeRequests": pending,
            "pendingMilestones": milestones,
        }));
    }

    if pending.is_empty() {
        println!("{}", "No change requests awaiting approval".green());
    } else {
        let exposure: f64 = pending.iter().map(|c| c.impact_cost).sum();
        println!("{}", "Change requests awaiting approval".bold());
        println!("{}", change_requests_table(&pending));
        println!("Cost exposure: {}", format_money(exposure).cyan());
    }
    println!();

    if milestones.is_empty() {
        println!("{}", "No milestones pending approval".green());
    } else {
        println!("{}", "Milestone approvals".bold());
        println!("{}", milestones_table(&milestones));
    }

    Ok(())
}

async fn finance_dashboard(store: &ProjectStore, json: bool) -> anyhow::Result<()> {
    let summary = store.finance_summary().await;

    if json {
        return print_json(&summary);
    }

    println!("{}", "Transactions".bold());
    println!("{}", finance_table(&summary));

    Ok(())
}

async fn manager_dashboard(store: &ProjectStore, json: bool) -> anyhow::Result<()> {
    let board = store.task_board(None).await;

    if json {
        return print_json(&board);
    }

    println!("{}", "Task board".bold());
    println!("{}", board_table(&board));
    println!(
        "Open: {}  High priority: {}",
        board.open_tasks.to_string().cyan(),
        board.open_high_priority.to_string().red()
    );

    Ok(())
}

async fn engineer_dashboard(store: &ProjectStore, user: &User, json: bool) -> anyhow::Result<()> {
    let workload = store.tasks_for_assignee(&user.id).await;

    if json {
        return print_json(&workload);
    }

    if workload.tasks.is_empty() {
        println!("{}", "No tasks assigned".yellow());
        return Ok(());
    }

    println!("{}", "My tasks".bold());
    println!("{}", tasks_table(&workload.tasks));
    println!("Active: {}", workload.active.to_string().cyan());

    Ok(())
}

async fn admin_dashboard(store: &ProjectStore, json: bool) -> anyhow::Result<()> {
    let snapshot = store.snapshot().await;
    let sizes = json!({
        "projects": snapshot.projects.len(),
        "tasks": snapshot.tasks.len(),
        "comments": snapshot.comments.len(),
        "messages": snapshot.messages.len(),
        "documents": snapshot.documents.len(),
        "notifications": snapshot.notifications.len(),
        "changeRequests": snapshot.change_requests.len(),
        "transactions": snapshot.transactions.len(),
        "milestones": snapshot.milestones.len(),
    });

    if json {
        return print_json(&json!({
            "revision": snapshot.revision,
            "users": snapshot.users,
            "collections": sizes,
        }));
    }

    println!("{}", "Users".bold());
    println!("{}", users_table(&snapshot.users));
    println!();
    println!("{}", "Collections".bold());
    if let Some(map) = sizes.as_object() {
        for (name, count) in map {
            println!("{:<16} {}", format!("{}:", name).cyan(), count);
        }
    }

    Ok(())
}
