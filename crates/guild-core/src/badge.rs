//! Achievement badges.
//!
//! The catalog is fixed in code; awards live in `.guild/badges.yaml`.
//! Granting is idempotent — a member can hold each badge once.

use crate::error::{GuildError, Result};
use crate::member::Member;
use crate::types::SessionStatus;
use crate::{io, paths};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Completed playtests needed for the prolific-tester badge.
const PROLIFIC_TESTER_SESSIONS: usize = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeAward {
    pub member: String,
    pub badge: String,
    pub earned_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub fn catalog() -> &'static [Badge] {
    &[
        Badge {
            id: "first-feedback",
            name: "First Feedback",
            description: "Submitted your first piece of feedback.",
        },
        Badge {
            id: "prolific-tester",
            name: "Prolific Tester",
            description: "Participated in 10 playtests.",
        },
        Badge {
            id: "creator",
            name: "Creator",
            description: "Created your first game project.",
        },
        Badge {
            id: "published-designer",
            name: "Published Designer",
            description: "Successfully published a game.",
        },
    ]
}

pub fn find(badge_id: &str) -> Option<&'static Badge> {
    catalog().iter().find(|b| b.id == badge_id)
}

// ---------------------------------------------------------------------------
// Internal file I/O
// ---------------------------------------------------------------------------

fn load_all(root: &Path) -> Result<Vec<BadgeAward>> {
    io::load_yaml_list(&paths::badges_path(root))
}

fn save_all(root: &Path, awards: &[BadgeAward]) -> Result<()> {
    io::save_yaml_list(&paths::badges_path(root), awards)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Grant a badge. Returns the new award, or `None` if already held.
pub fn award(root: &Path, member_slug: &str, badge_id: &str) -> Result<Option<BadgeAward>> {
    if find(badge_id).is_none() {
        return Err(GuildError::BadgeNotFound(badge_id.to_string()));
    }
    Member::load(root, member_slug)?;

    let mut awards = load_all(root)?;
    if awards
        .iter()
        .any(|a| a.member == member_slug && a.badge == badge_id)
    {
        return Ok(None);
    }

    let award = BadgeAward {
        member: member_slug.to_string(),
        badge: badge_id.to_string(),
        earned_at: Utc::now(),
    };
    awards.push(award.clone());
    save_all(root, &awards)?;
    Ok(Some(award))
}

pub fn for_member(root: &Path, member_slug: &str) -> Result<Vec<BadgeAward>> {
    Ok(load_all(root)?
        .into_iter()
        .filter(|a| a.member == member_slug)
        .collect())
}

/// Check every catalog rule for a member and grant whatever now holds.
/// Returns only the newly earned awards.
pub fn auto_award(root: &Path, member_slug: &str) -> Result<Vec<BadgeAward>> {
    let mut earned = Vec::new();

    let projects = crate::project::GameProject::list(root)?;
    let own_projects: Vec<_> = projects
        .iter()
        .filter(|p| p.designer == member_slug)
        .collect();

    if !own_projects.is_empty() {
        if let Some(a) = award(root, member_slug, "creator")? {
            earned.push(a);
        }
    }
    if own_projects.iter().any(|p| p.published_at.is_some()) {
        if let Some(a) = award(root, member_slug, "published-designer")? {
            earned.push(a);
        }
    }

    let feedback_count = crate::feedback::list(root)?
        .iter()
        .filter(|f| f.player == member_slug)
        .count();
    if feedback_count > 0 {
        if let Some(a) = award(root, member_slug, "first-feedback")? {
            earned.push(a);
        }
    }

    let playtests = crate::session::list(root)?
        .iter()
        .filter(|s| {
            s.status == SessionStatus::Completed
                && s.registered.iter().any(|m| m == member_slug)
        })
        .count();
    if playtests >= PROLIFIC_TESTER_SESSIONS {
        if let Some(a) = award(root, member_slug, "prolific-tester")? {
            earned.push(a);
        }
    }

    Ok(earned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::GameProject;
    use crate::types::{MembershipTier, Stage};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn add_member(dir: &TempDir, slug: &str) {
        Member::create(
            dir.path(),
            slug,
            slug.to_uppercase(),
            format!("{slug}@example.com"),
            MembershipTier::Basic,
            Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn catalog_has_four_badges() {
        assert_eq!(catalog().len(), 4);
        assert!(find("creator").is_some());
        assert!(find("speedrunner").is_none());
    }

    #[test]
    fn award_and_list() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "sari");

        let a = award(dir.path(), "sari", "creator").unwrap();
        assert!(a.is_some());

        let held = for_member(dir.path(), "sari").unwrap();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].badge, "creator");
    }

    #[test]
    fn award_is_idempotent() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "sari");

        assert!(award(dir.path(), "sari", "creator").unwrap().is_some());
        assert!(award(dir.path(), "sari", "creator").unwrap().is_none());
        assert_eq!(for_member(dir.path(), "sari").unwrap().len(), 1);
    }

    #[test]
    fn unknown_badge_rejected() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "sari");
        assert!(matches!(
            award(dir.path(), "sari", "no-such-badge"),
            Err(GuildError::BadgeNotFound(_))
        ));
    }

    #[test]
    fn auto_award_creator_and_published() {
        let dir = TempDir::new().unwrap();
        add_member(&dir, "sari");

        let none = auto_award(dir.path(), "sari").unwrap();
        assert!(none.is_empty());

        // Creating a project grants the creator badge as a side effect.
        let mut project = GameProject::create(dir.path(), "my-game", "sari", "My Game").unwrap();
        let held = for_member(dir.path(), "sari").unwrap();
        assert!(held.iter().any(|a| a.badge == "creator"));

        project.advance(Stage::Published).unwrap();
        project.save(dir.path()).unwrap();
        let earned = auto_award(dir.path(), "sari").unwrap();
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].badge, "published-designer");
    }
}
