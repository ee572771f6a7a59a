use crate::error::{GuildError, Result};
use crate::paths;
use crate::types::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTransition {
    pub stage: Stage,
    pub entered: DateTime<Utc>,
    pub exited: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCount {
    pub min: u8,
    pub max: u8,
}

/// Metadata for an uploaded game material (rulebook, sell sheet, ...).
/// Only the record is kept here; blob storage is a separate concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub url: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// A versioned design revision, linked to the feedback that motivated it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Iteration {
    pub version: String,
    pub changes: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inspired_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// GameProject
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameProject {
    pub slug: String,
    pub designer: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stage: Stage,
    pub player_count: PlayerCount,
    pub play_time_minutes: u32,
    pub complexity: u8,
    #[serde(default)]
    pub mechanics: Vec<String>,
    pub current_version: String,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub iterations: Vec<Iteration>,
    pub stage_history: Vec<StageTransition>,
    pub retired: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl GameProject {
    pub fn new(
        slug: impl Into<String>,
        designer: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            designer: designer.into(),
            title: title.into(),
            description: None,
            stage: Stage::Concept,
            player_count: PlayerCount { min: 2, max: 4 },
            play_time_minutes: 30,
            complexity: 1,
            mechanics: Vec::new(),
            current_version: "0.1".to_string(),
            materials: Vec::new(),
            iterations: Vec::new(),
            stage_history: vec![StageTransition {
                stage: Stage::Concept,
                entered: now,
                exited: None,
            }],
            retired: false,
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn create(
        root: &Path,
        slug: impl Into<String>,
        designer: &str,
        title: impl Into<String>,
    ) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        // The designer must have a profile before submitting projects.
        crate::member::Member::load(root, designer)?;

        let project_dir = paths::project_dir(root, &slug);
        if project_dir.exists() {
            return Err(GuildError::ProjectExists(slug));
        }

        let project = Self::new(slug, designer, title);
        project.save(root)?;
        crate::badge::auto_award(root, designer)?;
        Ok(project)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let manifest = paths::project_manifest(root, slug);
        if !manifest.exists() {
            return Err(GuildError::ProjectNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let project: GameProject = serde_yaml::from_str(&data)?;
        Ok(project)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let manifest = paths::project_manifest(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&manifest, data.as_bytes())
    }

    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let projects_dir = root.join(paths::PROJECTS_DIR);
        if !projects_dir.exists() {
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for entry in std::fs::read_dir(&projects_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let slug = entry.file_name().to_string_lossy().into_owned();
                match Self::load(root, &slug) {
                    Ok(p) => projects.push(p),
                    Err(GuildError::ProjectNotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(projects)
    }

    // ---------------------------------------------------------------------------
    // Stage transitions
    // ---------------------------------------------------------------------------

    pub fn can_advance_to(&self, target: Stage) -> Result<()> {
        if self.retired {
            return Err(GuildError::InvalidTransition {
                from: self.stage.to_string(),
                to: target.to_string(),
                reason: "project is retired".to_string(),
            });
        }
        if target <= self.stage {
            return Err(GuildError::InvalidTransition {
                from: self.stage.to_string(),
                to: target.to_string(),
                reason: "transitions are forward-only".to_string(),
            });
        }
        Ok(())
    }

    pub fn advance(&mut self, target: Stage) -> Result<()> {
        self.can_advance_to(target)?;

        let now = Utc::now();
        if let Some(last) = self.stage_history.last_mut() {
            last.exited = Some(now);
        }

        self.stage = target;
        self.updated_at = now;
        self.stage_history.push(StageTransition {
            stage: target,
            entered: now,
            exited: None,
        });

        if target == Stage::Published {
            self.published_at = Some(now);
        }

        Ok(())
    }

    pub fn retire(&mut self) {
        self.retired = true;
        self.updated_at = Utc::now();
    }

    // ---------------------------------------------------------------------------
    // Metadata mutations
    // ---------------------------------------------------------------------------

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
        self.updated_at = Utc::now();
    }

    pub fn set_player_count(&mut self, min: u8, max: u8) -> Result<()> {
        if min > max {
            return Err(GuildError::InvalidPlayerCount { min, max });
        }
        self.player_count = PlayerCount { min, max };
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_complexity(&mut self, complexity: u8) -> Result<()> {
        if !(1..=5).contains(&complexity) {
            return Err(GuildError::InvalidComplexity(complexity));
        }
        self.complexity = complexity;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.push(material);
        self.updated_at = Utc::now();
    }

    /// Record a design revision and make it the current version.
    pub fn add_iteration(
        &mut self,
        version: impl Into<String>,
        changes: impl Into<String>,
        inspired_by: Vec<String>,
    ) {
        let version = version.into();
        self.iterations.push(Iteration {
            version: version.clone(),
            changes: changes.into(),
            inspired_by,
            created_at: Utc::now(),
        });
        self.current_version = version;
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Stage advancement with rewards
// ---------------------------------------------------------------------------

/// Load, advance and save a project. Reaching `Published` pays the designer
/// the publication bonus and re-checks badge rules.
pub fn advance_stage(root: &Path, slug: &str, target: Stage) -> Result<GameProject> {
    let mut project = GameProject::load(root, slug)?;
    project.advance(target)?;
    project.save(root)?;

    if target == Stage::Published {
        crate::points::award(
            root,
            &project.designer,
            crate::types::PointKind::GamePublished,
            format!("{} published", project.title),
            Some(project.slug.clone()),
        )?;
        crate::badge::auto_award(root, &project.designer)?;
    }

    Ok(project)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Member;
    use crate::types::MembershipTier;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn with_designer(dir: &TempDir, slug: &str) {
        Member::create(
            dir.path(),
            slug,
            "Designer",
            "designer@example.com",
            MembershipTier::Basic,
            Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn project_create_load() {
        let dir = TempDir::new().unwrap();
        with_designer(&dir, "sari");

        let project =
            GameProject::create(dir.path(), "nusantara-traders", "sari", "Nusantara Traders")
                .unwrap();
        assert_eq!(project.stage, Stage::Concept);
        assert_eq!(project.current_version, "0.1");

        let loaded = GameProject::load(dir.path(), "nusantara-traders").unwrap();
        assert_eq!(loaded.title, "Nusantara Traders");
        assert_eq!(loaded.designer, "sari");
    }

    #[test]
    fn project_requires_designer_profile() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            GameProject::create(dir.path(), "orphan-game", "nobody", "Orphan"),
            Err(GuildError::MemberNotFound(_))
        ));
    }

    #[test]
    fn project_create_duplicate_fails() {
        let dir = TempDir::new().unwrap();
        with_designer(&dir, "budi");
        GameProject::create(dir.path(), "wayang-legends", "budi", "Wayang Legends").unwrap();
        assert!(matches!(
            GameProject::create(dir.path(), "wayang-legends", "budi", "Again"),
            Err(GuildError::ProjectExists(_))
        ));
    }

    #[test]
    fn advance_is_forward_only() {
        let mut project = GameProject::new("g", "sari", "G");
        project.advance(Stage::Prototype).unwrap();
        project.advance(Stage::Playtesting).unwrap();
        assert!(project.advance(Stage::Concept).is_err());
        assert_eq!(project.stage, Stage::Playtesting);
    }

    #[test]
    fn advance_records_history() {
        let mut project = GameProject::new("g", "sari", "G");
        project.advance(Stage::Prototype).unwrap();

        assert_eq!(project.stage_history.len(), 2);
        assert!(project.stage_history[0].exited.is_some());
        assert_eq!(project.stage_history[1].stage, Stage::Prototype);
        assert!(project.stage_history[1].exited.is_none());
    }

    #[test]
    fn publishing_stamps_timestamp() {
        let mut project = GameProject::new("g", "sari", "G");
        // Stages can be skipped forward; only the ordering is enforced.
        project.advance(Stage::Published).unwrap();
        assert!(project.published_at.is_some());
    }

    #[test]
    fn retired_project_cannot_advance() {
        let mut project = GameProject::new("g", "sari", "G");
        project.retire();
        assert!(project.advance(Stage::Prototype).is_err());
    }

    #[test]
    fn player_count_validated() {
        let mut project = GameProject::new("g", "sari", "G");
        assert!(project.set_player_count(2, 6).is_ok());
        assert!(matches!(
            project.set_player_count(5, 2),
            Err(GuildError::InvalidPlayerCount { min: 5, max: 2 })
        ));
    }

    #[test]
    fn complexity_validated() {
        let mut project = GameProject::new("g", "sari", "G");
        assert!(project.set_complexity(3).is_ok());
        assert!(project.set_complexity(0).is_err());
        assert!(project.set_complexity(6).is_err());
    }

    #[test]
    fn iteration_updates_current_version() {
        let mut project = GameProject::new("g", "sari", "G");
        project.add_iteration("1.3a", "Reworked end-game scoring", vec!["F1".to_string()]);
        assert_eq!(project.current_version, "1.3a");
        assert_eq!(project.iterations.len(), 1);
        assert_eq!(project.iterations[0].inspired_by, vec!["F1"]);
    }

    #[test]
    fn advance_stage_to_published_rewards_designer() {
        let dir = TempDir::new().unwrap();
        with_designer(&dir, "sari");
        GameProject::create(dir.path(), "done-game", "sari", "Done Game").unwrap();

        advance_stage(dir.path(), "done-game", Stage::Published).unwrap();

        let sari = Member::load(dir.path(), "sari").unwrap();
        assert_eq!(sari.contribution_points, 100);
        let badges = crate::badge::for_member(dir.path(), "sari").unwrap();
        assert!(badges.iter().any(|b| b.badge == "published-designer"));
    }
}
