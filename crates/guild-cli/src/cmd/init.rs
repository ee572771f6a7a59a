use anyhow::Context;
use guild_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let club_name = name.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "club".to_string())
    });

    println!("Initializing club workspace in: {}", root.display());

    let dirs = [paths::GUILD_DIR, paths::MEMBERS_DIR, paths::PROJECTS_DIR];
    for dir in dirs {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let config_path = paths::config_path(root);
    if !config_path.exists() {
        let cfg = Config::new(&club_name);
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: .guild/config.yaml");
    } else {
        println!("  exists:  .guild/config.yaml");
    }

    println!("\nClub '{club_name}' is ready. Add members with `guild member add`.");
    Ok(())
}
