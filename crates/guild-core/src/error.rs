use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuildError {
    #[error("not initialized: run 'guild init'")]
    NotInitialized,

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("member already exists: {0}")]
    MemberExists(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("project already exists: {0}")]
    ProjectExists(String),

    #[error("project is retired: {0}")]
    ProjectRetired(String),

    #[error("project already in the playtest queue: {0}")]
    AlreadyQueued(String),

    #[error("queue entry not found: {0}")]
    EntryNotFound(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session is full: {0}")]
    SessionFull(String),

    #[error("already registered for session {session}: {member}")]
    AlreadyRegistered { session: String, member: String },

    #[error("not registered for session {session}: {member}")]
    NotRegistered { session: String, member: String },

    #[error("badge not found: {0}")]
    BadgeNotFound(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid membership tier: {0}")]
    InvalidTier(String),

    #[error("invalid testing points: {0} (must be >= 0)")]
    InvalidPoints(i64),

    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("invalid point kind: {0}")]
    InvalidPointKind(String),

    #[error("invalid rating {value} for '{category}': must be 1-5")]
    InvalidRating { category: String, value: u8 },

    #[error("invalid complexity: {0} (must be 1-5)")]
    InvalidComplexity(u8),

    #[error("invalid player count: min {min} > max {max}")]
    InvalidPlayerCount { min: u8, max: u8 },

    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuildError>;
