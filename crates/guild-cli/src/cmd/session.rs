use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use guild_core::session;
use std::path::Path;

#[derive(Subcommand)]
pub enum SessionSubcommand {
    /// Schedule a playtest session (claims the project's queued entry)
    Schedule {
        project: String,
        /// When the session runs (RFC 3339)
        #[arg(long)]
        at: DateTime<Utc>,
        /// Facilitating member's slug
        #[arg(long)]
        facilitator: String,
        #[arg(long)]
        venue: Option<String>,
        /// Table size (default from club config)
        #[arg(long)]
        max_players: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List sessions
    List,
    /// Show one session
    Get { id: String },
    /// Sign a member up as a playtester
    Register { id: String, member: String },
    /// Remove a member from the roster
    Unregister { id: String, member: String },
    /// Mark a session as underway
    Start { id: String },
    /// Conclude a session and pay out points
    Complete { id: String },
    /// Cancel a session (releases the queue entry)
    Cancel { id: String },
}

pub fn run(root: &Path, subcmd: SessionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SessionSubcommand::Schedule {
            project,
            at,
            facilitator,
            venue,
            max_players,
            notes,
        } => schedule(root, &project, at, &facilitator, venue, max_players, notes, json),
        SessionSubcommand::List => list(root, json),
        SessionSubcommand::Get { id } => get(root, &id, json),
        SessionSubcommand::Register { id, member } => register(root, &id, &member, json),
        SessionSubcommand::Unregister { id, member } => unregister(root, &id, &member, json),
        SessionSubcommand::Start { id } => start(root, &id, json),
        SessionSubcommand::Complete { id } => complete(root, &id, json),
        SessionSubcommand::Cancel { id } => cancel(root, &id, json),
    }
}

#[allow(clippy::too_many_arguments)]
fn schedule(
    root: &Path,
    project: &str,
    at: DateTime<Utc>,
    facilitator: &str,
    venue: Option<String>,
    max_players: Option<u8>,
    notes: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let session = session::schedule(root, project, at, facilitator, venue, max_players, notes)
        .context("failed to schedule session")?;

    if json {
        print_json(&session)?;
    } else {
        println!(
            "Scheduled [{}]: {} at {} ({})",
            session.id,
            session.project,
            session.scheduled_for.format("%Y-%m-%d %H:%M"),
            session.venue
        );
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let sessions = session::list(root).context("failed to list sessions")?;

    if json {
        print_json(&sessions)?;
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No sessions yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = sessions
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.project.clone(),
                s.status.to_string(),
                s.scheduled_for.format("%Y-%m-%d %H:%M").to_string(),
                s.venue.clone(),
                format!("{}/{}", s.registered.len(), s.max_players),
            ]
        })
        .collect();
    print_table(&["ID", "PROJECT", "STATUS", "WHEN", "VENUE", "TESTERS"], rows);
    Ok(())
}

fn get(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let session = session::load(root, id).with_context(|| format!("session '{id}' not found"))?;

    if json {
        print_json(&session)?;
        return Ok(());
    }

    println!("Session: {}", session.id);
    println!("Project:     {}", session.project);
    println!("Status:      {}", session.status);
    println!("When:        {}", session.scheduled_for.format("%Y-%m-%d %H:%M"));
    println!("Venue:       {}", session.venue);
    println!("Facilitator: {}", session.facilitator);
    println!(
        "Testers:     {}/{} ({})",
        session.registered.len(),
        session.max_players,
        if session.registered.is_empty() {
            "none".to_string()
        } else {
            session.registered.join(", ")
        }
    );
    if !session.notes.is_empty() {
        println!("Notes:       {}", session.notes);
    }
    Ok(())
}

fn register(root: &Path, id: &str, member: &str, json: bool) -> anyhow::Result<()> {
    let session = session::register(root, id, member)
        .with_context(|| format!("failed to register for '{id}'"))?;

    if json {
        print_json(&session)?;
    } else {
        println!(
            "Registered [{member}] for {id} ({}/{})",
            session.registered.len(),
            session.max_players
        );
    }
    Ok(())
}

fn unregister(root: &Path, id: &str, member: &str, json: bool) -> anyhow::Result<()> {
    session::unregister(root, id, member)
        .with_context(|| format!("failed to unregister from '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "member": member, "registered": false }))?;
    } else {
        println!("Removed [{member}] from {id}");
    }
    Ok(())
}

fn start(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let session = session::start(root, id).with_context(|| format!("failed to start '{id}'"))?;

    if json {
        print_json(&session)?;
    } else {
        println!("Session [{id}] is underway");
    }
    Ok(())
}

fn complete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let session =
        session::complete(root, id).with_context(|| format!("failed to complete '{id}'"))?;

    if json {
        print_json(&session)?;
    } else {
        println!(
            "Completed session [{id}]; paid {} playtester(s)",
            session.registered.len()
        );
    }
    Ok(())
}

fn cancel(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    session::cancel(root, id).with_context(|| format!("failed to cancel '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "status": "cancelled" }))?;
    } else {
        println!("Cancelled session [{id}]");
    }
    Ok(())
}
