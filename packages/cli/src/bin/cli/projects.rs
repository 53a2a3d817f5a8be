use colored::*;
use sitedesk_cli::render::{projects_table, report_lines};
use sitedesk_store::ProjectStore;

use super::print_json;

pub async fn list_projects(store: &ProjectStore, json: bool) -> anyhow::Result<()> {
    let overviews = store.project_overviews().await;

    if json {
        return print_json(&overviews);
    }

    if overviews.is_empty() {
        println!("{}", "No projects found".yellow());
        println!(
            "{}",
            "Set SITEDESK_SEED_FIXTURES=true to start from the demo projects".dimmed()
        );
        return Ok(());
    }

    println!("{}", "Projects".blue().bold());
    println!();
    println!("{}", projects_table(&overviews));
    println!("Total: {} projects", overviews.len().to_string().cyan());

    Ok(())
}

pub async fn show_report(store: &ProjectStore, id: &str, json: bool) -> anyhow::Result<()> {
    let overview = store.project_overview(id).await?;
    let report = store.project_report(id).await?;

    if json {
        return print_json(&report);
    }

    println!(
        "{}",
        format!("Project Report - {}", overview.project.name)
            .blue()
            .bold()
    );
    println!();
    for line in report_lines(&overview.project.name, &report) {
        println!("{}", line);
    }

    Ok(())
}
