//! Playtest-queue priority ranking.
//!
//! The score for a queued submission is a pure function of the submitter's
//! membership tier, their accumulated testing points, and how long the
//! submission has waited:
//!
//!   score = tier_bonus + min(testing_points * 2, 50) + whole_days_waiting * 5
//!
//! The wait bonus grows without bound, so an old submission from a basic
//! member always eventually outranks fresh premium ones. `now` is injected
//! by the caller and shared across a whole ranking pass; nothing in this
//! module reads a clock or touches storage.

use crate::error::{GuildError, Result};
use crate::member::Member;
use crate::project::GameProject;
use crate::queue::QueueEntry;
use crate::types::{MembershipTier, QueueStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

const BASIC_TIER_BONUS: i64 = 50;
const PREMIUM_TIER_BONUS: i64 = 100;
const ACTIVITY_POINT_MULTIPLIER: i64 = 2;
const ACTIVITY_BONUS_CAP: i64 = 50;
const WAIT_BONUS_PER_DAY: i64 = 5;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Compute the priority score for a single submission.
///
/// `testing_points` must be non-negative; a negative value is a caller bug
/// and fails with `InvalidPoints` rather than silently shrinking the score.
/// Elapsed wait is truncated to whole days (a 23-hour-old submission earns
/// no wait bonus), and a `submitted_at` in the future of `now` counts as
/// zero days — clock skew never pushes a score below the tier and activity
/// bonuses.
pub fn compute_priority(
    tier: MembershipTier,
    testing_points: i64,
    submitted_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<i64> {
    if testing_points < 0 {
        return Err(GuildError::InvalidPoints(testing_points));
    }

    let tier_bonus = match tier {
        MembershipTier::Premium => PREMIUM_TIER_BONUS,
        MembershipTier::Basic => BASIC_TIER_BONUS,
    };

    let activity_bonus = (testing_points * ACTIVITY_POINT_MULTIPLIER).min(ACTIVITY_BONUS_CAP);

    let days_waiting = (now - submitted_at).num_days().max(0);
    let wait_bonus = days_waiting * WAIT_BONUS_PER_DAY;

    Ok(tier_bonus + activity_bonus + wait_bonus)
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// A queue entry joined with its resolved project and designer profile,
/// ready for scoring.
#[derive(Debug, Clone)]
pub struct QueueCandidate {
    pub entry: QueueEntry,
    pub project_title: String,
    pub designer: Member,
}

/// Join queue entries against projects and member profiles.
///
/// An entry whose project is missing, or whose project points at a designer
/// with no profile, is dropped with a warning — one dangling reference must
/// not take down the whole queue view.
pub fn build_candidates(
    entries: &[QueueEntry],
    projects: &[GameProject],
    members: &[Member],
) -> Vec<QueueCandidate> {
    entries
        .iter()
        .filter_map(|entry| {
            let Some(project) = projects.iter().find(|p| p.slug == entry.project) else {
                tracing::warn!(
                    entry = %entry.id,
                    project = %entry.project,
                    "skipping queue entry: project not found"
                );
                return None;
            };
            let Some(designer) = members.iter().find(|m| m.slug == project.designer) else {
                tracing::warn!(
                    entry = %entry.id,
                    designer = %project.designer,
                    "skipping queue entry: designer profile not found"
                );
                return None;
            };
            Some(QueueCandidate {
                entry: entry.clone(),
                project_title: project.title.clone(),
                designer: designer.clone(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// One row of the ranked queue, as shown to members.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub id: String,
    pub project: String,
    pub project_title: String,
    pub designer: String,
    pub designer_name: String,
    pub submitted_at: DateTime<Utc>,
    pub days_waiting: i64,
    pub score: i64,
}

/// Rank the queue as of `now`.
///
/// Only `Queued` candidates are scored and emitted. A candidate that fails
/// validation (e.g. a manifest with negative testing points) is skipped
/// with a warning instead of aborting the pass. The result is ordered by
/// score descending; ties go to the earlier submission, then to the lower
/// entry id, so the displayed order is fully deterministic.
pub fn rank_queue(candidates: &[QueueCandidate], now: DateTime<Utc>) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = candidates
        .iter()
        .filter(|c| c.entry.status == QueueStatus::Queued)
        .filter_map(|c| {
            let score = match compute_priority(
                c.designer.tier,
                c.designer.testing_points,
                c.entry.submitted_at,
                now,
            ) {
                Ok(score) => score,
                Err(e) => {
                    tracing::warn!(entry = %c.entry.id, error = %e, "skipping unscorable queue entry");
                    return None;
                }
            };
            Some(RankedEntry {
                id: c.entry.id.clone(),
                project: c.entry.project.clone(),
                project_title: c.project_title.clone(),
                designer: c.designer.slug.clone(),
                designer_name: c.designer.display_name.clone(),
                submitted_at: c.entry.submitted_at,
                days_waiting: (now - c.entry.submitted_at).num_days().max(0),
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.submitted_at.cmp(&b.submitted_at))
            .then(a.id.cmp(&b.id))
    });
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
