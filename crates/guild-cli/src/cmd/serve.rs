use anyhow::anyhow;
use guild_core::config::Config;
use std::path::Path;

/// Run the HTTP API server until interrupted.
pub fn run(root: &Path, port: u16) -> anyhow::Result<()> {
    let config = Config::load(root).map_err(|e| anyhow!("{e}"))?;
    for warning in config.validate() {
        tracing::warn!("config: {}", warning.message);
    }
    let name = config.club.name.clone();

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();

        println!("guild API for '{name}' → http://localhost:{actual_port}");

        tokio::select! {
            res = guild_server::serve_on(root_buf, listener) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
