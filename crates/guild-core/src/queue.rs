//! Playtest queue — submissions waiting for a playtest slot.
//!
//! Layout:
//!   .guild/queue.yaml   — list of queue entries
//!
//! IDs are sequential: Q1, Q2, Q3, …  Priority is never stored here; it is
//! recomputed from the submitter profile and wait time at read time (see
//! the `ranking` module).

use crate::error::{GuildError, Result};
use crate::types::QueueStatus;
use crate::{io, paths, ranking};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: String,
    pub project: String,
    pub submitted_at: DateTime<Utc>,
    pub status: QueueStatus,
}

// ---------------------------------------------------------------------------
// Internal file I/O
// ---------------------------------------------------------------------------

fn load_all(root: &Path) -> Result<Vec<QueueEntry>> {
    io::load_yaml_list(&paths::queue_path(root))
}

fn save_all(root: &Path, entries: &[QueueEntry]) -> Result<()> {
    io::save_yaml_list(&paths::queue_path(root), entries)
}

fn next_id(entries: &[QueueEntry]) -> String {
    // Use the highest numeric suffix + 1 so withdrawals don't reset the counter.
    let max = entries
        .iter()
        .filter_map(|e| e.id.strip_prefix('Q')?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("Q{}", max + 1)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Submit a project for playtesting. Returns the created entry.
///
/// A project may hold at most one live (queued or scheduled) entry, and a
/// retired project cannot be submitted at all.
pub fn submit(root: &Path, project_slug: &str) -> Result<QueueEntry> {
    let project = crate::project::GameProject::load(root, project_slug)?;
    if project.retired {
        return Err(GuildError::ProjectRetired(project_slug.to_string()));
    }

    let mut entries = load_all(root)?;
    let live = entries.iter().any(|e| {
        e.project == project_slug
            && matches!(e.status, QueueStatus::Queued | QueueStatus::Scheduled)
    });
    if live {
        return Err(GuildError::AlreadyQueued(project_slug.to_string()));
    }

    let entry = QueueEntry {
        id: next_id(&entries),
        project: project_slug.to_string(),
        submitted_at: Utc::now(),
        status: QueueStatus::Queued,
    };
    entries.push(entry.clone());
    save_all(root, &entries)?;
    Ok(entry)
}

/// List all queue entries, regardless of status.
pub fn list(root: &Path) -> Result<Vec<QueueEntry>> {
    load_all(root)
}

pub fn load(root: &Path, id: &str) -> Result<QueueEntry> {
    load_all(root)?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| GuildError::EntryNotFound(id.to_string()))
}

/// The live (queued or scheduled) entry for a project, if any.
pub fn live_entry_for(root: &Path, project_slug: &str) -> Result<Option<QueueEntry>> {
    Ok(load_all(root)?.into_iter().find(|e| {
        e.project == project_slug
            && matches!(e.status, QueueStatus::Queued | QueueStatus::Scheduled)
    }))
}

/// Claim a queued entry for a session: queued → scheduled.
pub fn mark_scheduled(root: &Path, id: &str) -> Result<QueueEntry> {
    set_status(root, id, QueueStatus::Queued, QueueStatus::Scheduled)
}

/// Close out a claimed entry after its session ends: scheduled → completed.
pub fn mark_completed(root: &Path, id: &str) -> Result<QueueEntry> {
    set_status(root, id, QueueStatus::Scheduled, QueueStatus::Completed)
}

/// Release a claimed entry back into the queue: scheduled → queued.
/// The original submission timestamp is kept, so accrued wait time survives
/// a cancelled session.
pub fn release(root: &Path, id: &str) -> Result<QueueEntry> {
    set_status(root, id, QueueStatus::Scheduled, QueueStatus::Queued)
}

fn set_status(
    root: &Path,
    id: &str,
    expected: QueueStatus,
    target: QueueStatus,
) -> Result<QueueEntry> {
    let mut entries = load_all(root)?;
    let entry = entries
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| GuildError::EntryNotFound(id.to_string()))?;
    if entry.status != expected {
        return Err(GuildError::InvalidTransition {
            from: entry.status.to_string(),
            to: target.to_string(),
            reason: format!("entry must be {expected}"),
        });
    }
    entry.status = target;
    let updated = entry.clone();
    save_all(root, &entries)?;
    Ok(updated)
}

/// Withdraw a submission. Only entries still waiting in the queue can be
/// withdrawn; claimed or completed entries stay on record.
pub fn withdraw(root: &Path, id: &str) -> Result<()> {
    let mut entries = load_all(root)?;
    let entry = entries
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| GuildError::EntryNotFound(id.to_string()))?;
    if entry.status != QueueStatus::Queued {
        return Err(GuildError::InvalidTransition {
            from: entry.status.to_string(),
            to: "withdrawn".to_string(),
            reason: "only queued entries can be withdrawn".to_string(),
        });
    }
    entries.retain(|e| e.id != id);
    save_all(root, &entries)
}

/// The ranked queue as of `now`: loads entries, projects and member
/// profiles, joins them in memory, and hands the result to the pure ranker.
pub fn ranked(root: &Path, now: DateTime<Utc>) -> Result<Vec<ranking::RankedEntry>> {
    let entries = load_all(root)?;
    let projects = crate::project::GameProject::list(root)?;
    let members = crate::member::Member::list(root)?;
    let candidates = ranking::build_candidates(&entries, &projects, &members);
    Ok(ranking::rank_queue(&candidates, now))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Member;
    use crate::project::GameProject;
    use crate::types::MembershipTier;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn init_project(dir: &TempDir, slug: &str) {
        Member::create(
            dir.path(),
            "sari",
            "Sari",
            "sari@example.com",
            MembershipTier::Premium,
            Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
        )
        .ok();
        GameProject::create(dir.path(), slug, "sari", "Game").unwrap();
    }

    #[test]
    fn submit_and_list() {
        let dir = TempDir::new().unwrap();
        init_project(&dir, "spice-route");

        let entry = submit(dir.path(), "spice-route").unwrap();
        assert_eq!(entry.id, "Q1");
        assert_eq!(entry.status, QueueStatus::Queued);

        let entries = list(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn submit_unknown_project_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            submit(dir.path(), "ghost-game"),
            Err(GuildError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn submit_twice_fails_while_live() {
        let dir = TempDir::new().unwrap();
        init_project(&dir, "spice-route");

        submit(dir.path(), "spice-route").unwrap();
        assert!(matches!(
            submit(dir.path(), "spice-route"),
            Err(GuildError::AlreadyQueued(_))
        ));
    }

    #[test]
    fn resubmit_allowed_after_completion() {
        let dir = TempDir::new().unwrap();
        init_project(&dir, "spice-route");

        let entry = submit(dir.path(), "spice-route").unwrap();
        mark_scheduled(dir.path(), &entry.id).unwrap();
        mark_completed(dir.path(), &entry.id).unwrap();

        let second = submit(dir.path(), "spice-route").unwrap();
        assert_eq!(second.id, "Q2");
    }

    #[test]
    fn lifecycle_transitions_enforced() {
        let dir = TempDir::new().unwrap();
        init_project(&dir, "spice-route");

        let entry = submit(dir.path(), "spice-route").unwrap();

        // queued → completed is not a legal jump
        assert!(mark_completed(dir.path(), &entry.id).is_err());

        mark_scheduled(dir.path(), &entry.id).unwrap();
        // scheduled → scheduled is rejected
        assert!(mark_scheduled(dir.path(), &entry.id).is_err());

        mark_completed(dir.path(), &entry.id).unwrap();
        let done = load(dir.path(), &entry.id).unwrap();
        assert_eq!(done.status, QueueStatus::Completed);
    }

    #[test]
    fn release_returns_entry_to_queue() {
        let dir = TempDir::new().unwrap();
        init_project(&dir, "spice-route");

        let entry = submit(dir.path(), "spice-route").unwrap();
        let submitted_at = entry.submitted_at;
        mark_scheduled(dir.path(), &entry.id).unwrap();
        let released = release(dir.path(), &entry.id).unwrap();

        assert_eq!(released.status, QueueStatus::Queued);
        assert_eq!(released.submitted_at, submitted_at);
    }

    #[test]
    fn withdraw_only_when_queued() {
        let dir = TempDir::new().unwrap();
        init_project(&dir, "spice-route");

        let entry = submit(dir.path(), "spice-route").unwrap();
        mark_scheduled(dir.path(), &entry.id).unwrap();
        assert!(withdraw(dir.path(), &entry.id).is_err());

        release(dir.path(), &entry.id).unwrap();
        withdraw(dir.path(), &entry.id).unwrap();
        assert!(load(dir.path(), &entry.id).is_err());
    }

    #[test]
    fn ids_do_not_reset_after_withdraw() {
        let dir = TempDir::new().unwrap();
        init_project(&dir, "spice-route");
        GameProject::create(dir.path(), "second-game", "sari", "Second").unwrap();
        GameProject::create(dir.path(), "third-game", "sari", "Third").unwrap();

        submit(dir.path(), "spice-route").unwrap();
        let q2 = submit(dir.path(), "second-game").unwrap();
        assert_eq!(q2.id, "Q2");

        withdraw(dir.path(), &q2.id).unwrap();
        let q3 = submit(dir.path(), "third-game").unwrap();
        // next sequential after max(Q1) = Q2
        assert_eq!(q3.id, "Q2");
    }

    #[test]
    fn entry_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load(dir.path(), "Q99"),
            Err(GuildError::EntryNotFound(_))
        ));
    }
}
