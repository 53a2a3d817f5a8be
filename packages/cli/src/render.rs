// ABOUTME: Table and text rendering for dashboard views
// ABOUTME: Builds comfy-table tables from store query results

use colored::*;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Row, Table,
};
use sitedesk_core::{ApprovalStatus, ChangeRequest, Milestone, MilestoneStatus, ProjectStatus, User};
use sitedesk_store::{FinanceSummary, ProjectOverview, ProjectReport, TaskBoard};
use sitedesk_tasks::{Task, TaskPriority};

const PROGRESS_BAR_WIDTH: usize = 10;

fn new_table(header: impl Into<Row>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Whole-unit currency with thousands separators, e.g. `$4,200,000`
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Fixed-width text bar, e.g. `[#####-----] 50%`
pub fn progress_bar(progress: u8) -> String {
    let filled = (usize::from(progress.min(100)) * PROGRESS_BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        progress
    )
}

fn status_cell(status: ProjectStatus) -> String {
    match status {
        ProjectStatus::Active => status.to_string().green().to_string(),
        ProjectStatus::Planning => status.to_string().cyan().to_string(),
        ProjectStatus::OnHold => status.to_string().yellow().to_string(),
        ProjectStatus::Completed => status.to_string().dimmed().to_string(),
    }
}

fn priority_cell(priority: TaskPriority) -> String {
    match priority {
        TaskPriority::High => "High".red().to_string(),
        TaskPriority::Medium => "Medium".yellow().to_string(),
        TaskPriority::Low => "Low".green().to_string(),
    }
}

fn approval_cell(status: ApprovalStatus) -> String {
    match status {
        ApprovalStatus::Pending => status.to_string().yellow().to_string(),
        ApprovalStatus::Approved => status.to_string().green().to_string(),
        ApprovalStatus::Rejected => status.to_string().red().to_string(),
    }
}

pub fn projects_table(overviews: &[ProjectOverview]) -> Table {
    let mut table = new_table(vec![
        "ID", "Name", "Status", "Manager", "Budget", "Schedule", "Progress",
    ]);

    for overview in overviews {
        let project = &overview.project;
        table.add_row(vec![
            project.id.clone(),
            truncate(&project.name, 30),
            status_cell(project.status),
            project.manager.clone(),
            format_money(project.budget),
            format!("{} to {}", project.start_date, project.end_date),
            progress_bar(overview.progress),
        ]);
    }

    table
}

pub fn tasks_table(tasks: &[Task]) -> Table {
    let mut table = new_table(vec![
        "ID", "Project", "Title", "Status", "Priority", "Due", "Progress",
    ]);

    for task in tasks {
        table.add_row(vec![
            task.id.clone(),
            task.project_id.clone(),
            truncate(&task.title, 35),
            task.status.to_string(),
            priority_cell(task.priority),
            task.due_date.to_string(),
            progress_bar(task.progress),
        ]);
    }

    table
}

/// One column per status, tasks listed top to bottom
pub fn board_table(board: &TaskBoard) -> Table {
    let mut table = new_table(
        board
            .columns
            .iter()
            .map(|c| c.status.to_string())
            .collect::<Vec<_>>(),
    );

    let depth = board.columns.iter().map(|c| c.tasks.len()).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            board
                .columns
                .iter()
                .map(|c| {
                    c.tasks
                        .get(row)
                        .map(|t| format!("{} ({}%)", truncate(&t.title, 24), t.progress))
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>(),
        );
    }

    table
}

pub fn change_requests_table(change_requests: &[ChangeRequest]) -> Table {
    let mut table = new_table(vec![
        "ID", "Project", "Title", "Cost", "Days", "Requested by", "Status",
    ]);

    for cr in change_requests {
        table.add_row(vec![
            cr.id.clone(),
            cr.project_id.clone(),
            truncate(&cr.title, 30),
            format_money(cr.impact_cost),
            format!("{:+}", cr.impact_time),
            cr.requested_by.clone(),
            approval_cell(cr.status),
        ]);
    }

    table
}

/// Milestones with the owner-facing readiness note
pub fn milestones_table(milestones: &[Milestone]) -> Table {
    let mut table = new_table(vec!["ID", "Milestone", "Status", "Note"]);

    for milestone in milestones {
        let note = match milestone.status {
            MilestoneStatus::PendingApproval => {
                format!("Milestone reached on {}. Ready for review.", milestone.date)
            }
            MilestoneStatus::Completed => format!("Completed {}", milestone.date),
            MilestoneStatus::Upcoming => format!("Due {}", milestone.date),
        };
        table.add_row(vec![
            milestone.id.clone(),
            truncate(&milestone.title, 30),
            milestone.status.to_string(),
            note,
        ]);
    }

    table
}

pub fn finance_table(summary: &FinanceSummary) -> Table {
    let mut table = new_table(vec!["Figure", "Amount"]);

    table.add_row(vec![
        format!("Pending ({})", summary.pending_count),
        format_money(summary.pending_amount),
    ]);
    table.add_row(vec![
        "Approved".to_string(),
        format_money(summary.approved_amount),
    ]);
    table.add_row(vec![
        "Rejected".to_string(),
        format_money(summary.rejected_amount),
    ]);
    for (category, amount) in &summary.approved_by_category {
        table.add_row(vec![format!("  {}", category), format_money(*amount)]);
    }

    table
}

pub fn users_table(users: &[User]) -> Table {
    let mut table = new_table(vec!["ID", "Name", "Role"]);

    for user in users {
        table.add_row(vec![user.id.clone(), user.name.clone(), user.role.to_string()]);
    }

    table
}

pub fn report_lines(project_name: &str, report: &ProjectReport) -> Vec<String> {
    vec![
        format!("{:<18} {}", "Project:".cyan(), project_name),
        format!("{:<18} {}", "Tasks:".cyan(), report.total_tasks),
        format!("{:<18} {}", "Done:".cyan(), report.done_tasks),
        format!("{:<18} {}", "In progress:".cyan(), report.in_progress_tasks),
        format!("{:<18} {}%", "Completion rate:".cyan(), report.completion_rate),
        format!(
            "{:<18} {}",
            "Average progress:".cyan(),
            progress_bar(report.average_progress)
        ),
    ]
}
