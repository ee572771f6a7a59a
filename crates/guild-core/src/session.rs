//! Playtest sessions — scheduled table slots where queued games get played.
//!
//! Layout:
//!   .guild/sessions.yaml   — list of sessions
//!
//! IDs are sequential: S1, S2, S3, …  Scheduling a session claims the
//! project's queued entry; completing it closes the entry out and pays the
//! participants, which is the only place testing points are earned.

use crate::error::{GuildError, Result};
use crate::types::{PointKind, QueueStatus, SessionStatus};
use crate::{badge, io, paths, points, queue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaytestSession {
    pub id: String,
    pub project: String,
    pub scheduled_for: DateTime<Utc>,
    pub venue: String,
    #[serde(default)]
    pub notes: String,
    pub max_players: u8,
    pub facilitator: String,
    #[serde(default)]
    pub registered: Vec<String>,
    pub status: SessionStatus,
}

// ---------------------------------------------------------------------------
// Internal file I/O
// ---------------------------------------------------------------------------

fn load_all(root: &Path) -> Result<Vec<PlaytestSession>> {
    io::load_yaml_list(&paths::sessions_path(root))
}

fn save_all(root: &Path, sessions: &[PlaytestSession]) -> Result<()> {
    io::save_yaml_list(&paths::sessions_path(root), sessions)
}

fn next_id(sessions: &[PlaytestSession]) -> String {
    let max = sessions
        .iter()
        .filter_map(|s| s.id.strip_prefix('S')?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("S{}", max + 1)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Schedule a playtest for a project. Venue and table size fall back to the
/// club config defaults. If the project has a queued submission it is
/// claimed by this session.
pub fn schedule(
    root: &Path,
    project_slug: &str,
    scheduled_for: DateTime<Utc>,
    facilitator: &str,
    venue: Option<String>,
    max_players: Option<u8>,
    notes: Option<String>,
) -> Result<PlaytestSession> {
    let config = crate::config::Config::load(root)?;
    crate::project::GameProject::load(root, project_slug)?;
    crate::member::Member::load(root, facilitator)?;

    if let Some(entry) = queue::live_entry_for(root, project_slug)? {
        if entry.status == QueueStatus::Queued {
            queue::mark_scheduled(root, &entry.id)?;
        }
    }

    let mut sessions = load_all(root)?;
    let session = PlaytestSession {
        id: next_id(&sessions),
        project: project_slug.to_string(),
        scheduled_for,
        venue: venue
            .or(config.sessions.venue)
            .unwrap_or_else(|| "clubhouse".to_string()),
        notes: notes.unwrap_or_default(),
        max_players: max_players.unwrap_or(config.sessions.max_players),
        facilitator: facilitator.to_string(),
        registered: Vec::new(),
        status: SessionStatus::Scheduled,
    };
    sessions.push(session.clone());
    save_all(root, &sessions)?;
    Ok(session)
}

pub fn list(root: &Path) -> Result<Vec<PlaytestSession>> {
    load_all(root)
}

pub fn load(root: &Path, id: &str) -> Result<PlaytestSession> {
    load_all(root)?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| GuildError::SessionNotFound(id.to_string()))
}

/// Sign a member up as a playtester.
pub fn register(root: &Path, id: &str, member_slug: &str) -> Result<PlaytestSession> {
    crate::member::Member::load(root, member_slug)?;

    let mut sessions = load_all(root)?;
    let session = find_mut(&mut sessions, id)?;

    if session.status != SessionStatus::Scheduled {
        return Err(GuildError::InvalidTransition {
            from: session.status.to_string(),
            to: "register".to_string(),
            reason: "registration is only open for scheduled sessions".to_string(),
        });
    }
    if session.registered.iter().any(|m| m == member_slug) {
        return Err(GuildError::AlreadyRegistered {
            session: id.to_string(),
            member: member_slug.to_string(),
        });
    }
    if session.registered.len() >= session.max_players as usize {
        return Err(GuildError::SessionFull(id.to_string()));
    }

    session.registered.push(member_slug.to_string());
    let updated = session.clone();
    save_all(root, &sessions)?;
    Ok(updated)
}

pub fn unregister(root: &Path, id: &str, member_slug: &str) -> Result<PlaytestSession> {
    let mut sessions = load_all(root)?;
    let session = find_mut(&mut sessions, id)?;

    if !session.registered.iter().any(|m| m == member_slug) {
        return Err(GuildError::NotRegistered {
            session: id.to_string(),
            member: member_slug.to_string(),
        });
    }
    session.registered.retain(|m| m != member_slug);
    let updated = session.clone();
    save_all(root, &sessions)?;
    Ok(updated)
}

/// Mark a session as underway.
pub fn start(root: &Path, id: &str) -> Result<PlaytestSession> {
    transition(root, id, SessionStatus::Ongoing, &[SessionStatus::Scheduled])
}

/// Conclude a session: close out the claimed queue entry and pay the table.
/// The designer earns game-tested points; every registered player earns
/// playtest-given points. Badge rules are re-checked for everyone involved.
pub fn complete(root: &Path, id: &str) -> Result<PlaytestSession> {
    let session = transition(
        root,
        id,
        SessionStatus::Completed,
        &[SessionStatus::Scheduled, SessionStatus::Ongoing],
    )?;

    if let Some(entry) = queue::live_entry_for(root, &session.project)? {
        if entry.status == QueueStatus::Scheduled {
            queue::mark_completed(root, &entry.id)?;
        }
    }

    let project = crate::project::GameProject::load(root, &session.project)?;
    points::award(
        root,
        &project.designer,
        PointKind::GameTested,
        format!("{} tested", project.title),
        Some(session.id.clone()),
    )?;
    badge::auto_award(root, &project.designer)?;

    for player in &session.registered {
        points::award(
            root,
            player,
            PointKind::PlaytestGiven,
            format!("Tested {}", project.title),
            Some(session.id.clone()),
        )?;
        badge::auto_award(root, player)?;
    }

    Ok(session)
}

/// Call off a session. A queue entry claimed by it goes back to the queue
/// with its original submission time, so accrued wait priority is kept.
pub fn cancel(root: &Path, id: &str) -> Result<PlaytestSession> {
    let session = transition(
        root,
        id,
        SessionStatus::Cancelled,
        &[SessionStatus::Scheduled, SessionStatus::Ongoing],
    )?;

    if let Some(entry) = queue::live_entry_for(root, &session.project)? {
        if entry.status == QueueStatus::Scheduled {
            queue::release(root, &entry.id)?;
        }
    }

    Ok(session)
}

fn transition(
    root: &Path,
    id: &str,
    target: SessionStatus,
    allowed_from: &[SessionStatus],
) -> Result<PlaytestSession> {
    let mut sessions = load_all(root)?;
    let session = find_mut(&mut sessions, id)?;

    if !allowed_from.contains(&session.status) {
        return Err(GuildError::InvalidTransition {
            from: session.status.to_string(),
            to: target.to_string(),
            reason: format!("session is {}", session.status),
        });
    }
    session.status = target;
    let updated = session.clone();
    save_all(root, &sessions)?;
    Ok(updated)
}

fn find_mut<'a>(
    sessions: &'a mut [PlaytestSession],
    id: &str,
) -> Result<&'a mut PlaytestSession> {
    sessions
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| GuildError::SessionNotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
