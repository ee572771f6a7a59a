//! Playtest feedback records.
//!
//! Layout:
//!   .guild/feedback.yaml   — list of feedback entries
//!
//! IDs are sequential: F1, F2, F3, …  Feedback is tied to a completed or
//! running session, and only registered playtesters may file it.

use crate::error::{GuildError, Result};
use crate::{badge, io, paths};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// 1-5 scores across the five review axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ratings {
    pub fun: u8,
    pub clarity: u8,
    pub balance: u8,
    pub theme: u8,
    pub mechanics: u8,
}

impl Ratings {
    pub fn validate(&self) -> Result<()> {
        for (category, value) in [
            ("fun", self.fun),
            ("clarity", self.clarity),
            ("balance", self.balance),
            ("theme", self.theme),
            ("mechanics", self.mechanics),
        ] {
            if !(1..=5).contains(&value) {
                return Err(GuildError::InvalidRating {
                    category: category.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comments {
    #[serde(default)]
    pub liked: String,
    #[serde(default)]
    pub disliked: String,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub confusing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub session: String,
    pub project: String,
    pub player: String,
    pub ratings: Ratings,
    #[serde(default)]
    pub comments: Comments,
    pub would_play_again: bool,
    pub would_recommend: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Per-axis means across a set of feedback entries.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingAverages {
    pub fun: f64,
    pub clarity: f64,
    pub balance: f64,
    pub theme: f64,
    pub mechanics: f64,
}

// ---------------------------------------------------------------------------
// Internal file I/O
// ---------------------------------------------------------------------------

fn load_all(root: &Path) -> Result<Vec<Feedback>> {
    io::load_yaml_list(&paths::feedback_path(root))
}

fn save_all(root: &Path, entries: &[Feedback]) -> Result<()> {
    io::save_yaml_list(&paths::feedback_path(root), entries)
}

fn next_id(entries: &[Feedback]) -> String {
    let max = entries
        .iter()
        .filter_map(|f| f.id.strip_prefix('F')?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("F{}", max + 1)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// File feedback for a session. The player must have been registered for
/// it; the project reference is taken from the session record.
pub fn add(
    root: &Path,
    session_id: &str,
    player: &str,
    ratings: Ratings,
    comments: Comments,
    would_play_again: bool,
    would_recommend: bool,
) -> Result<Feedback> {
    ratings.validate()?;
    crate::member::Member::load(root, player)?;
    let session = crate::session::load(root, session_id)?;

    if !session.registered.iter().any(|m| m == player) {
        return Err(GuildError::NotRegistered {
            session: session_id.to_string(),
            member: player.to_string(),
        });
    }

    let mut entries = load_all(root)?;
    let feedback = Feedback {
        id: next_id(&entries),
        session: session_id.to_string(),
        project: session.project.clone(),
        player: player.to_string(),
        ratings,
        comments,
        would_play_again,
        would_recommend,
        submitted_at: Utc::now(),
    };
    entries.push(feedback.clone());
    save_all(root, &entries)?;

    badge::auto_award(root, player)?;

    Ok(feedback)
}

/// All feedback, oldest first.
pub fn list(root: &Path) -> Result<Vec<Feedback>> {
    load_all(root)
}

pub fn for_project(root: &Path, project_slug: &str) -> Result<Vec<Feedback>> {
    Ok(load_all(root)?
        .into_iter()
        .filter(|f| f.project == project_slug)
        .collect())
}

pub fn for_session(root: &Path, session_id: &str) -> Result<Vec<Feedback>> {
    Ok(load_all(root)?
        .into_iter()
        .filter(|f| f.session == session_id)
        .collect())
}

/// Mean score per axis; `None` for an empty slice.
pub fn average_ratings(entries: &[Feedback]) -> Option<RatingAverages> {
    if entries.is_empty() {
        return None;
    }
    let n = entries.len() as f64;
    let sum = |f: fn(&Ratings) -> u8| entries.iter().map(|e| f(&e.ratings) as f64).sum::<f64>() / n;
    Some(RatingAverages {
        fun: sum(|r| r.fun),
        clarity: sum(|r| r.clarity),
        balance: sum(|r| r.balance),
        theme: sum(|r| r.theme),
        mechanics: sum(|r| r.mechanics),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
