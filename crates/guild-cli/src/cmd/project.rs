use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use guild_core::project::{self, GameProject};
use guild_core::types::Stage;
use std::path::Path;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// Register a new game project
    Add {
        slug: String,
        /// Designer's member slug
        #[arg(long)]
        designer: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Player count as MIN-MAX (e.g. 2-4)
        #[arg(long)]
        players: Option<String>,
        /// Typical play time in minutes
        #[arg(long)]
        minutes: Option<u32>,
        /// Complexity from 1 (light) to 5 (heavy)
        #[arg(long)]
        complexity: Option<u8>,
        /// Mechanics tags, comma-separated
        #[arg(long)]
        mechanics: Option<String>,
    },
    /// List all projects
    List,
    /// Show full details for a project
    Get { slug: String },
    /// Advance a project to a later stage
    Advance {
        slug: String,
        /// Target stage (concept, prototype, playtesting, refining, pitching, published)
        stage: String,
    },
    /// Retire a project
    Retire { slug: String },
    /// Record a design iteration
    Iterate {
        slug: String,
        /// New version label (becomes the current version)
        #[arg(long)]
        version: String,
        /// What changed and why
        #[arg(long)]
        changes: String,
        /// Feedback ids that motivated the changes, comma-separated
        #[arg(long)]
        inspired_by: Option<String>,
    },
    /// Attach material metadata (rulebook, sell sheet, ...)
    Attach {
        slug: String,
        /// Display name of the material
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "application/pdf")]
        content_type: String,
        #[arg(long, default_value = "0")]
        size_bytes: u64,
    },
}

pub fn run(root: &Path, subcmd: ProjectSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProjectSubcommand::Add {
            slug,
            designer,
            title,
            description,
            players,
            minutes,
            complexity,
            mechanics,
        } => add(
            root,
            &slug,
            &designer,
            &title,
            description,
            players.as_deref(),
            minutes,
            complexity,
            mechanics.as_deref(),
            json,
        ),
        ProjectSubcommand::List => list(root, json),
        ProjectSubcommand::Get { slug } => get(root, &slug, json),
        ProjectSubcommand::Advance { slug, stage } => advance(root, &slug, &stage, json),
        ProjectSubcommand::Retire { slug } => retire(root, &slug, json),
        ProjectSubcommand::Iterate {
            slug,
            version,
            changes,
            inspired_by,
        } => iterate(root, &slug, &version, &changes, inspired_by.as_deref(), json),
        ProjectSubcommand::Attach {
            slug,
            name,
            url,
            content_type,
            size_bytes,
        } => attach(root, &slug, name, url, content_type, size_bytes, json),
    }
}

#[allow(clippy::too_many_arguments)]
fn add(
    root: &Path,
    slug: &str,
    designer: &str,
    title: &str,
    description: Option<String>,
    players: Option<&str>,
    minutes: Option<u32>,
    complexity: Option<u8>,
    mechanics: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut project =
        GameProject::create(root, slug, designer, title).context("failed to create project")?;

    if let Some(d) = description {
        project.set_description(d);
    }
    if let Some(spec) = players {
        let (min, max) = parse_players(spec)?;
        project.set_player_count(min, max)?;
    }
    if let Some(m) = minutes {
        project.play_time_minutes = m;
    }
    if let Some(c) = complexity {
        project.set_complexity(c)?;
    }
    if let Some(tags) = mechanics {
        project.mechanics = tags
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    project.save(root).context("failed to save project")?;

    if json {
        print_json(&project)?;
    } else {
        println!("Added project [{}]: {}", project.slug, project.title);
    }
    Ok(())
}

fn parse_players(spec: &str) -> anyhow::Result<(u8, u8)> {
    let (min, max) = spec
        .split_once('-')
        .with_context(|| format!("invalid player count '{spec}': expected MIN-MAX"))?;
    Ok((min.trim().parse()?, max.trim().parse()?))
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let projects = GameProject::list(root).context("failed to list projects")?;

    if json {
        print_json(&projects)?;
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            vec![
                p.slug.clone(),
                p.title.clone(),
                p.designer.clone(),
                p.stage.to_string(),
                p.current_version.clone(),
                if p.retired { "retired".to_string() } else { String::new() },
            ]
        })
        .collect();
    print_table(&["SLUG", "TITLE", "DESIGNER", "STAGE", "VERSION", ""], rows);
    Ok(())
}

fn get(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let project =
        GameProject::load(root, slug).with_context(|| format!("project '{slug}' not found"))?;

    if json {
        print_json(&project)?;
        return Ok(());
    }

    println!("Project: {}", project.slug);
    println!("Title:      {}", project.title);
    println!("Designer:   {}", project.designer);
    println!("Stage:      {}", project.stage);
    if let Some(desc) = &project.description {
        println!("About:      {}", desc);
    }
    println!(
        "Players:    {}-{}, ~{} min, complexity {}/5",
        project.player_count.min, project.player_count.max, project.play_time_minutes, project.complexity
    );
    if !project.mechanics.is_empty() {
        println!("Mechanics:  {}", project.mechanics.join(", "));
    }
    println!("Version:    {}", project.current_version);
    if !project.iterations.is_empty() {
        println!("Iterations: {}", project.iterations.len());
    }
    if let Some(published) = project.published_at {
        println!("Published:  {}", published.format("%Y-%m-%d"));
    }
    Ok(())
}

fn advance(root: &Path, slug: &str, stage: &str, json: bool) -> anyhow::Result<()> {
    let target: Stage = stage.parse()?;
    let project = project::advance_stage(root, slug, target)
        .with_context(|| format!("failed to advance '{slug}'"))?;

    if json {
        print_json(&serde_json::json!({ "slug": project.slug, "stage": project.stage }))?;
    } else {
        println!("Project [{slug}] is now in {target}");
    }
    Ok(())
}

fn retire(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let mut project =
        GameProject::load(root, slug).with_context(|| format!("project '{slug}' not found"))?;
    project.retire();
    project.save(root).context("failed to save project")?;

    if json {
        print_json(&serde_json::json!({ "slug": slug, "retired": true }))?;
    } else {
        println!("Retired project [{slug}]");
    }
    Ok(())
}

fn attach(
    root: &Path,
    slug: &str,
    name: String,
    url: String,
    content_type: String,
    size_bytes: u64,
    json: bool,
) -> anyhow::Result<()> {
    let mut project =
        GameProject::load(root, slug).with_context(|| format!("project '{slug}' not found"))?;
    project.add_material(guild_core::project::Material {
        name: name.clone(),
        url,
        content_type,
        size_bytes,
    });
    project.save(root).context("failed to save project")?;

    if json {
        print_json(&serde_json::json!({ "slug": slug, "material": name }))?;
    } else {
        println!("Attached '{name}' to [{slug}]");
    }
    Ok(())
}

fn iterate(
    root: &Path,
    slug: &str,
    version: &str,
    changes: &str,
    inspired_by: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut project =
        GameProject::load(root, slug).with_context(|| format!("project '{slug}' not found"))?;

    let inspired: Vec<String> = inspired_by
        .map(|ids| {
            ids.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    project.add_iteration(version, changes, inspired);
    project.save(root).context("failed to save project")?;

    if json {
        print_json(&serde_json::json!({ "slug": slug, "version": version }))?;
    } else {
        println!("Recorded iteration {version} for [{slug}]");
    }
    Ok(())
}
