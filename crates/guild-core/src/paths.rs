use crate::error::{GuildError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const GUILD_DIR: &str = ".guild";
pub const MEMBERS_DIR: &str = ".guild/members";
pub const PROJECTS_DIR: &str = ".guild/projects";

pub const CONFIG_FILE: &str = ".guild/config.yaml";
pub const QUEUE_FILE: &str = ".guild/queue.yaml";
pub const SESSIONS_FILE: &str = ".guild/sessions.yaml";
pub const FEEDBACK_FILE: &str = ".guild/feedback.yaml";
pub const POINTS_FILE: &str = ".guild/points.yaml";
pub const BADGES_FILE: &str = ".guild/badges.yaml";

pub const MANIFEST_FILE: &str = "manifest.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn guild_dir(root: &Path) -> PathBuf {
    root.join(GUILD_DIR)
}

pub fn member_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(MEMBERS_DIR).join(slug)
}

pub fn member_manifest(root: &Path, slug: &str) -> PathBuf {
    member_dir(root, slug).join(MANIFEST_FILE)
}

pub fn project_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(PROJECTS_DIR).join(slug)
}

pub fn project_manifest(root: &Path, slug: &str) -> PathBuf {
    project_dir(root, slug).join(MANIFEST_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn queue_path(root: &Path) -> PathBuf {
    root.join(QUEUE_FILE)
}

pub fn sessions_path(root: &Path) -> PathBuf {
    root.join(SESSIONS_FILE)
}

pub fn feedback_path(root: &Path) -> PathBuf {
    root.join(FEEDBACK_FILE)
}

pub fn points_path(root: &Path) -> PathBuf {
    root.join(POINTS_FILE)
}

pub fn badges_path(root: &Path) -> PathBuf {
    root.join(BADGES_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(GuildError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
