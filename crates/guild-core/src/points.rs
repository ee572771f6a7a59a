//! Gamification point ledger.
//!
//! Layout:
//!   .guild/points.yaml   — append-only list of point transactions
//!
//! IDs are sequential: P1, P2, P3, …  Awarding also bumps the member's
//! stored running total (testing or contribution, per the kind), so the
//! ledger is the audit trail and the profile carries the figures the
//! ranker and leaderboard read.

use crate::error::{GuildError, Result};
use crate::member::Member;
use crate::types::{MembershipTier, PointKind};
use crate::{io, paths};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointTransaction {
    pub id: String,
    pub member: String,
    pub kind: PointKind,
    pub points: i64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub member: String,
    pub display_name: String,
    pub tier: MembershipTier,
    pub testing_points: i64,
    pub contribution_points: i64,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Internal file I/O
// ---------------------------------------------------------------------------

fn load_all(root: &Path) -> Result<Vec<PointTransaction>> {
    io::load_yaml_list(&paths::points_path(root))
}

fn save_all(root: &Path, ledger: &[PointTransaction]) -> Result<()> {
    io::save_yaml_list(&paths::points_path(root), ledger)
}

fn next_id(ledger: &[PointTransaction]) -> String {
    let max = ledger
        .iter()
        .filter_map(|t| t.id.strip_prefix('P')?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("P{}", max + 1)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Award the default point value for `kind` to a member.
pub fn award(
    root: &Path,
    member_slug: &str,
    kind: PointKind,
    description: impl Into<String>,
    related: Option<String>,
) -> Result<PointTransaction> {
    award_custom(root, member_slug, kind, kind.default_points(), description, related)
}

/// Award an explicit point value (e.g. a judged feedback-quality bonus).
pub fn award_custom(
    root: &Path,
    member_slug: &str,
    kind: PointKind,
    points: i64,
    description: impl Into<String>,
    related: Option<String>,
) -> Result<PointTransaction> {
    if points < 0 {
        return Err(GuildError::InvalidPoints(points));
    }
    let mut member = Member::load(root, member_slug)?;

    let mut ledger = load_all(root)?;
    let tx = PointTransaction {
        id: next_id(&ledger),
        member: member_slug.to_string(),
        kind,
        points,
        description: description.into(),
        related,
        created_at: Utc::now(),
    };
    ledger.push(tx.clone());
    save_all(root, &ledger)?;

    member.add_points(kind.counts_toward(), points);
    member.save(root)?;

    Ok(tx)
}

/// All transactions, oldest first.
pub fn list(root: &Path) -> Result<Vec<PointTransaction>> {
    load_all(root)
}

pub fn for_member(root: &Path, member_slug: &str) -> Result<Vec<PointTransaction>> {
    Ok(load_all(root)?
        .into_iter()
        .filter(|t| t.member == member_slug)
        .collect())
}

/// Members ordered by combined points, highest first; ties go to the
/// alphabetically earlier slug so the board renders the same every time.
pub fn leaderboard(root: &Path) -> Result<Vec<LeaderboardRow>> {
    let mut rows: Vec<LeaderboardRow> = Member::list(root)?
        .into_iter()
        .map(|m| LeaderboardRow {
            member: m.slug.clone(),
            display_name: m.display_name.clone(),
            tier: m.tier,
            testing_points: m.testing_points,
            contribution_points: m.contribution_points,
            total: m.total_points(),
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.member.cmp(&b.member)));
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn add_member(dir: &TempDir, slug: &str, tier: MembershipTier) {
        Member::create(
            dir.path(),
            slug,
            slug.to_uppercase(),
            format!("{slug}@example.com"),
            tier,
            Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn award_updates_ledger_and_profile() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "budi", MembershipTier::Basic);

        let tx = award(
            dir.path(),
            "budi",
            PointKind::PlaytestGiven,
            "Tested Nusantara Traders",
            Some("S1".to_string()),
        )
        .unwrap();
        assert_eq!(tx.id, "P1");
        assert_eq!(tx.points, 10);

        let member = Member::load(dir.path(), "budi").unwrap();
        assert_eq!(member.testing_points, 10);
        assert_eq!(member.contribution_points, 0);
    }

    #[test]
    fn contribution_kinds_feed_contribution_total() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "citra", MembershipTier::Premium);

        award(
            dir.path(),
            "citra",
            PointKind::GamePublished,
            "Borobudur Builders published",
            None,
        )
        .unwrap();

        let member = Member::load(dir.path(), "citra").unwrap();
        assert_eq!(member.contribution_points, 100);
        assert_eq!(member.testing_points, 0);
    }

    #[test]
    fn award_unknown_member_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            award(dir.path(), "ghost", PointKind::GameTested, "x", None),
            Err(GuildError::MemberNotFound(_))
        ));
    }

    #[test]
    fn custom_award_rejects_negative() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "budi", MembershipTier::Basic);
        assert!(matches!(
            award_custom(dir.path(), "budi", PointKind::FeedbackQuality, -3, "x", None),
            Err(GuildError::InvalidPoints(-3))
        ));
    }

    #[test]
    fn sequential_ids() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "budi", MembershipTier::Basic);

        let t1 = award(dir.path(), "budi", PointKind::GameTested, "a", None).unwrap();
        let t2 = award(dir.path(), "budi", PointKind::GameTested, "b", None).unwrap();
        assert_eq!(t1.id, "P1");
        assert_eq!(t2.id, "P2");
    }

    #[test]
    fn for_member_filters() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "budi", MembershipTier::Basic);
        add_member(&dir, "citra", MembershipTier::Premium);

        award(dir.path(), "budi", PointKind::GameTested, "a", None).unwrap();
        award(dir.path(), "citra", PointKind::GameTested, "b", None).unwrap();

        let budi = for_member(dir.path(), "budi").unwrap();
        assert_eq!(budi.len(), 1);
        assert_eq!(budi[0].member, "budi");
    }

    #[test]
    fn leaderboard_sorted_with_deterministic_ties() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "budi", MembershipTier::Basic);
        add_member(&dir, "citra", MembershipTier::Premium);
        add_member(&dir, "anita", MembershipTier::Basic);

        award(dir.path(), "citra", PointKind::IterationCompleted, "x", None).unwrap();
        // budi and anita stay tied at zero; slug order breaks the tie.
        let board = leaderboard(dir.path()).unwrap();
        let order: Vec<&str> = board.iter().map(|r| r.member.as_str()).collect();
        assert_eq!(order, vec!["citra", "anita", "budi"]);
        assert_eq!(board[0].total, 20);
    }
}
