mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    badge::BadgeSubcommand, feedback::FeedbackSubcommand, member::MemberSubcommand,
    points::PointsSubcommand, project::ProjectSubcommand, queue::QueueSubcommand,
    session::SessionSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "guild",
    about = "Board-game design club dashboard — members, projects, playtest queue, sessions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Club root (default: auto-detect from .guild/ or .git/)
    #[arg(long, global = true, env = "GUILD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a club workspace in the current directory
    Init {
        /// Club name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Manage member profiles
    Member {
        #[command(subcommand)]
        subcommand: MemberSubcommand,
    },

    /// Manage game projects
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// Manage the playtest queue
    Queue {
        #[command(subcommand)]
        subcommand: QueueSubcommand,
    },

    /// Manage playtest sessions
    Session {
        #[command(subcommand)]
        subcommand: SessionSubcommand,
    },

    /// Record and browse playtest feedback
    Feedback {
        #[command(subcommand)]
        subcommand: FeedbackSubcommand,
    },

    /// Award points and show the leaderboard
    Points {
        #[command(subcommand)]
        subcommand: PointsSubcommand,
    },

    /// Browse and grant achievement badges
    Badge {
        #[command(subcommand)]
        subcommand: BadgeSubcommand,
    },

    /// Run the HTTP API server
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "4780")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Member { subcommand } => cmd::member::run(&root, subcommand, cli.json),
        Commands::Project { subcommand } => cmd::project::run(&root, subcommand, cli.json),
        Commands::Queue { subcommand } => cmd::queue::run(&root, subcommand, cli.json),
        Commands::Session { subcommand } => cmd::session::run(&root, subcommand, cli.json),
        Commands::Feedback { subcommand } => cmd::feedback::run(&root, subcommand, cli.json),
        Commands::Points { subcommand } => cmd::points::run(&root, subcommand, cli.json),
        Commands::Badge { subcommand } => cmd::badge::run(&root, subcommand, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
