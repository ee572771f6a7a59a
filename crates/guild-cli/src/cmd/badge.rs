use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use guild_core::badge;
use std::path::Path;

#[derive(Subcommand)]
pub enum BadgeSubcommand {
    /// Show the badge catalog
    Catalog,
    /// List badges held by a member
    List { member: String },
    /// Grant a badge by hand (normally they are earned automatically)
    Award { member: String, badge: String },
}

pub fn run(root: &Path, subcmd: BadgeSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        BadgeSubcommand::Catalog => catalog(json),
        BadgeSubcommand::List { member } => list(root, &member, json),
        BadgeSubcommand::Award { member, badge } => award(root, &member, &badge, json),
    }
}

fn catalog(json: bool) -> anyhow::Result<()> {
    let badges = badge::catalog();

    if json {
        print_json(&badges)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = badges
        .iter()
        .map(|b| vec![b.id.to_string(), b.name.to_string(), b.description.to_string()])
        .collect();
    print_table(&["ID", "NAME", "DESCRIPTION"], rows);
    Ok(())
}

fn list(root: &Path, member: &str, json: bool) -> anyhow::Result<()> {
    let held = badge::for_member(root, member).context("failed to list badges")?;

    if json {
        print_json(&held)?;
        return Ok(());
    }

    if held.is_empty() {
        println!("No badges yet for [{member}].");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = held
        .iter()
        .map(|a| {
            let name = badge::find(&a.badge).map(|b| b.name).unwrap_or(a.badge.as_str());
            vec![
                a.badge.clone(),
                name.to_string(),
                a.earned_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "EARNED"], rows);
    Ok(())
}

fn award(root: &Path, member: &str, badge_id: &str, json: bool) -> anyhow::Result<()> {
    let awarded = badge::award(root, member, badge_id).context("failed to award badge")?;

    if json {
        print_json(&serde_json::json!({
            "member": member,
            "badge": badge_id,
            "new": awarded.is_some(),
        }))?;
    } else if awarded.is_some() {
        println!("Granted badge '{badge_id}' to [{member}]");
    } else {
        println!("[{member}] already holds '{badge_id}'");
    }
    Ok(())
}
