use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use guild_core::member::Member;
use guild_core::types::MembershipTier;
use std::path::Path;

#[derive(Subcommand)]
pub enum MemberSubcommand {
    /// Register a new member
    Add {
        slug: String,
        /// Display name
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Membership tier: basic or premium
        #[arg(long, default_value = "basic")]
        tier: String,
        /// Membership expiry (RFC 3339, e.g. 2027-01-01T00:00:00Z)
        #[arg(long)]
        expires: DateTime<Utc>,
    },
    /// List all members
    List,
    /// Show full details for a member
    Get { slug: String },
    /// Change a member's tier
    SetTier {
        slug: String,
        /// basic or premium
        tier: String,
    },
    /// Renew a membership
    Renew {
        slug: String,
        /// New expiry (RFC 3339)
        #[arg(long)]
        until: DateTime<Utc>,
    },
}

pub fn run(root: &Path, subcmd: MemberSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        MemberSubcommand::Add {
            slug,
            name,
            email,
            tier,
            expires,
        } => add(root, &slug, &name, &email, &tier, expires, json),
        MemberSubcommand::List => list(root, json),
        MemberSubcommand::Get { slug } => get(root, &slug, json),
        MemberSubcommand::SetTier { slug, tier } => set_tier(root, &slug, &tier, json),
        MemberSubcommand::Renew { slug, until } => renew(root, &slug, until, json),
    }
}

fn add(
    root: &Path,
    slug: &str,
    name: &str,
    email: &str,
    tier: &str,
    expires: DateTime<Utc>,
    json: bool,
) -> anyhow::Result<()> {
    let tier: MembershipTier = tier.parse()?;
    let member = Member::create(root, slug, name, email, tier, expires)
        .context("failed to create member")?;

    if json {
        print_json(&member)?;
    } else {
        println!("Registered member [{}]: {} ({})", member.slug, member.display_name, member.tier);
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let members = Member::list(root).context("failed to list members")?;

    if json {
        print_json(&members)?;
        return Ok(());
    }

    if members.is_empty() {
        println!("No members yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = members
        .iter()
        .map(|m| {
            vec![
                m.slug.clone(),
                m.display_name.clone(),
                m.tier.to_string(),
                m.status.to_string(),
                m.testing_points.to_string(),
                m.contribution_points.to_string(),
            ]
        })
        .collect();
    print_table(
        &["SLUG", "NAME", "TIER", "STATUS", "TESTING", "CONTRIB"],
        rows,
    );
    Ok(())
}

fn get(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let member = Member::load(root, slug).with_context(|| format!("member '{slug}' not found"))?;

    if json {
        print_json(&member)?;
        return Ok(());
    }

    println!("Member: {}", member.slug);
    println!("Name:     {}", member.display_name);
    println!("Email:    {}", member.email);
    println!("Tier:     {}", member.tier);
    println!("Status:   {}", member.status);
    println!(
        "Expires:  {}",
        member.membership_expiry.format("%Y-%m-%d")
    );
    println!("Joined:   {}", member.join_date.format("%Y-%m-%d"));
    println!("Points:   {} testing / {} contribution", member.testing_points, member.contribution_points);
    Ok(())
}

fn set_tier(root: &Path, slug: &str, tier: &str, json: bool) -> anyhow::Result<()> {
    let tier: MembershipTier = tier.parse()?;
    let mut member =
        Member::load(root, slug).with_context(|| format!("member '{slug}' not found"))?;
    member.set_tier(tier);
    member.save(root).context("failed to save member")?;

    if json {
        print_json(&serde_json::json!({ "slug": slug, "tier": tier }))?;
    } else {
        println!("Member [{slug}] is now {tier}");
    }
    Ok(())
}

fn renew(root: &Path, slug: &str, until: DateTime<Utc>, json: bool) -> anyhow::Result<()> {
    let mut member =
        Member::load(root, slug).with_context(|| format!("member '{slug}' not found"))?;
    member.renew(until);
    member.save(root).context("failed to save member")?;

    if json {
        print_json(&serde_json::json!({ "slug": slug, "expires": until }))?;
    } else {
        println!("Membership for [{slug}] renewed until {}", until.format("%Y-%m-%d"));
    }
    Ok(())
}
