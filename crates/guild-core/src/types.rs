use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// MembershipTier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    Basic,
    Premium,
}

impl MembershipTier {
    pub fn as_str(self) -> &'static str {
        match self {
            MembershipTier::Basic => "basic",
            MembershipTier::Premium => "premium",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MembershipTier {
    type Err = crate::error::GuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(MembershipTier::Basic),
            "premium" => Ok(MembershipTier::Premium),
            _ => Err(crate::error::GuildError::InvalidTier(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// MembershipStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Expired,
    Pending,
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Expired => "expired",
            MembershipStatus::Pending => "pending",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Design lifecycle of a game project. Transitions are forward-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Concept,
    Prototype,
    Playtesting,
    Refining,
    Pitching,
    Published,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Concept,
            Stage::Prototype,
            Stage::Playtesting,
            Stage::Refining,
            Stage::Pitching,
            Stage::Published,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Stage> {
        let all = Stage::all();
        let i = self.index();
        all.get(i + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Concept => "concept",
            Stage::Prototype => "prototype",
            Stage::Playtesting => "playtesting",
            Stage::Refining => "refining",
            Stage::Pitching => "pitching",
            Stage::Published => "published",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = crate::error::GuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concept" => Ok(Stage::Concept),
            "prototype" => Ok(Stage::Prototype),
            "playtesting" => Ok(Stage::Playtesting),
            "refining" => Ok(Stage::Refining),
            "pitching" => Ok(Stage::Pitching),
            "published" => Ok(Stage::Published),
            _ => Err(crate::error::GuildError::InvalidStage(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// QueueStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a playtest-queue entry. Only `Queued` entries are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Queued,
    Scheduled,
    Completed,
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueueStatus::Queued => "queued",
            QueueStatus::Scheduled => "scheduled",
            QueueStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Ongoing => "ongoing",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// PointKind
// ---------------------------------------------------------------------------

/// Which running total on the member profile a point award feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointBucket {
    Testing,
    Contribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    PlaytestGiven,
    GameTested,
    FeedbackQuality,
    IterationCompleted,
    GamePublished,
}

impl PointKind {
    pub fn all() -> &'static [PointKind] {
        &[
            PointKind::PlaytestGiven,
            PointKind::GameTested,
            PointKind::FeedbackQuality,
            PointKind::IterationCompleted,
            PointKind::GamePublished,
        ]
    }

    pub fn default_points(self) -> i64 {
        match self {
            PointKind::PlaytestGiven => 10,
            PointKind::GameTested => 5,
            PointKind::FeedbackQuality => 15,
            PointKind::IterationCompleted => 20,
            PointKind::GamePublished => 100,
        }
    }

    /// Playtesting activity feeds the testing total (the ranker input);
    /// everything else counts as general contribution.
    pub fn counts_toward(self) -> PointBucket {
        match self {
            PointKind::PlaytestGiven | PointKind::GameTested => PointBucket::Testing,
            PointKind::FeedbackQuality
            | PointKind::IterationCompleted
            | PointKind::GamePublished => PointBucket::Contribution,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PointKind::PlaytestGiven => "playtest_given",
            PointKind::GameTested => "game_tested",
            PointKind::FeedbackQuality => "feedback_quality",
            PointKind::IterationCompleted => "iteration_completed",
            PointKind::GamePublished => "game_published",
        }
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PointKind {
    type Err = crate::error::GuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playtest_given" => Ok(PointKind::PlaytestGiven),
            "game_tested" => Ok(PointKind::GameTested),
            "feedback_quality" => Ok(PointKind::FeedbackQuality),
            "iteration_completed" => Ok(PointKind::IterationCompleted),
            "game_published" => Ok(PointKind::GamePublished),
            _ => Err(crate::error::GuildError::InvalidPointKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
