use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use guild_core::queue;
use std::path::Path;

#[derive(Subcommand)]
pub enum QueueSubcommand {
    /// Submit a project for playtesting
    Submit { project: String },
    /// Show the queue, ranked by priority
    List {
        /// Include claimed and completed entries
        #[arg(long)]
        all: bool,
    },
    /// Withdraw a queued submission
    Withdraw { id: String },
}

pub fn run(root: &Path, subcmd: QueueSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        QueueSubcommand::Submit { project } => submit(root, &project, json),
        QueueSubcommand::List { all } => list(root, all, json),
        QueueSubcommand::Withdraw { id } => withdraw(root, &id, json),
    }
}

fn submit(root: &Path, project: &str, json: bool) -> anyhow::Result<()> {
    let entry = queue::submit(root, project).context("failed to submit to queue")?;

    if json {
        print_json(&entry)?;
    } else {
        println!("Queued [{}]: {}", entry.id, entry.project);
    }
    Ok(())
}

fn list(root: &Path, all: bool, json: bool) -> anyhow::Result<()> {
    if all {
        let entries = queue::list(root).context("failed to list queue")?;
        if json {
            print_json(&entries)?;
            return Ok(());
        }
        if entries.is_empty() {
            println!("The queue is empty.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.id.clone(),
                    e.project.clone(),
                    e.status.to_string(),
                    e.submitted_at.format("%Y-%m-%d").to_string(),
                ]
            })
            .collect();
        print_table(&["ID", "PROJECT", "STATUS", "SUBMITTED"], rows);
        return Ok(());
    }

    let ranked = queue::ranked(root, Utc::now()).context("failed to rank queue")?;

    if json {
        print_json(&ranked)?;
        return Ok(());
    }

    if ranked.is_empty() {
        println!("The queue is empty.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ranked
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                format!("{}", i + 1),
                r.id.clone(),
                r.project_title.clone(),
                r.designer_name.clone(),
                format!("{}d", r.days_waiting),
                r.score.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "ID", "PROJECT", "DESIGNER", "WAITING", "PRIORITY"], rows);
    Ok(())
}

fn withdraw(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    queue::withdraw(root, id).with_context(|| format!("failed to withdraw '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "withdrawn": true }))?;
    } else {
        println!("Withdrew [{id}] from the queue");
    }
    Ok(())
}
