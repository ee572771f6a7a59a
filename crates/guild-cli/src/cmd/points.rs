use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use guild_core::points;
use guild_core::types::PointKind;
use std::path::Path;

#[derive(Subcommand)]
pub enum PointsSubcommand {
    /// Award points to a member
    Award {
        member: String,
        /// playtest_given, game_tested, feedback_quality, iteration_completed, game_published
        kind: String,
        /// Reason shown in the ledger
        #[arg(long, short = 'm')]
        message: String,
        /// Override the default point value for the kind
        #[arg(long)]
        points: Option<i64>,
        /// Related entity id (session, feedback, project)
        #[arg(long)]
        related: Option<String>,
    },
    /// Show the point ledger
    List {
        #[arg(long)]
        member: Option<String>,
    },
    /// Show the club leaderboard
    Leaderboard,
}

pub fn run(root: &Path, subcmd: PointsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PointsSubcommand::Award {
            member,
            kind,
            message,
            points,
            related,
        } => award(root, &member, &kind, &message, points, related, json),
        PointsSubcommand::List { member } => list(root, member.as_deref(), json),
        PointsSubcommand::Leaderboard => leaderboard(root, json),
    }
}

fn award(
    root: &Path,
    member: &str,
    kind: &str,
    message: &str,
    override_points: Option<i64>,
    related: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let kind: PointKind = kind.parse()?;
    let tx = match override_points {
        Some(p) => points::award_custom(root, member, kind, p, message, related),
        None => points::award(root, member, kind, message, related),
    }
    .context("failed to award points")?;

    if json {
        print_json(&tx)?;
    } else {
        println!("Awarded {} point(s) to [{}] for {}", tx.points, tx.member, tx.kind);
    }
    Ok(())
}

fn list(root: &Path, member: Option<&str>, json: bool) -> anyhow::Result<()> {
    let ledger = match member {
        Some(m) => points::for_member(root, m)?,
        None => points::list(root)?,
    };

    if json {
        print_json(&ledger)?;
        return Ok(());
    }

    if ledger.is_empty() {
        println!("No point transactions yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ledger
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.member.clone(),
                t.kind.to_string(),
                t.points.to_string(),
                t.description.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "MEMBER", "KIND", "POINTS", "DESCRIPTION"], rows);
    Ok(())
}

fn leaderboard(root: &Path, json: bool) -> anyhow::Result<()> {
    let board = points::leaderboard(root).context("failed to build leaderboard")?;

    if json {
        print_json(&board)?;
        return Ok(());
    }

    if board.is_empty() {
        println!("No members yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = board
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                format!("{}", i + 1),
                r.display_name.clone(),
                r.tier.to_string(),
                r.testing_points.to_string(),
                r.contribution_points.to_string(),
                r.total.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "MEMBER", "TIER", "TESTING", "CONTRIB", "TOTAL"], rows);
    Ok(())
}
