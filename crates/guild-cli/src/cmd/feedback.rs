use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use guild_core::feedback::{self, Comments, Ratings};
use std::path::Path;

#[derive(Subcommand)]
pub enum FeedbackSubcommand {
    /// File feedback for a session you played in
    Add {
        session: String,
        /// Your member slug
        #[arg(long)]
        player: String,
        #[arg(long)]
        fun: u8,
        #[arg(long)]
        clarity: u8,
        #[arg(long)]
        balance: u8,
        #[arg(long)]
        theme: u8,
        #[arg(long)]
        mechanics: u8,
        #[arg(long)]
        liked: Option<String>,
        #[arg(long)]
        disliked: Option<String>,
        #[arg(long)]
        suggestions: Option<String>,
        #[arg(long)]
        confusing: Option<String>,
        #[arg(long)]
        play_again: bool,
        #[arg(long)]
        recommend: bool,
    },
    /// List feedback, optionally filtered
    List {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        session: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: FeedbackSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        FeedbackSubcommand::Add {
            session,
            player,
            fun,
            clarity,
            balance,
            theme,
            mechanics,
            liked,
            disliked,
            suggestions,
            confusing,
            play_again,
            recommend,
        } => {
            let ratings = Ratings {
                fun,
                clarity,
                balance,
                theme,
                mechanics,
            };
            let comments = Comments {
                liked: liked.unwrap_or_default(),
                disliked: disliked.unwrap_or_default(),
                suggestions: suggestions.unwrap_or_default(),
                confusing: confusing.unwrap_or_default(),
            };
            add(root, &session, &player, ratings, comments, play_again, recommend, json)
        }
        FeedbackSubcommand::List { project, session } => {
            list(root, project.as_deref(), session.as_deref(), json)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn add(
    root: &Path,
    session: &str,
    player: &str,
    ratings: Ratings,
    comments: Comments,
    play_again: bool,
    recommend: bool,
    json: bool,
) -> anyhow::Result<()> {
    let fb = feedback::add(root, session, player, ratings, comments, play_again, recommend)
        .context("failed to record feedback")?;

    if json {
        print_json(&fb)?;
    } else {
        println!("Recorded feedback [{}] on {} by {}", fb.id, fb.project, fb.player);
    }
    Ok(())
}

fn list(
    root: &Path,
    project: Option<&str>,
    session: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let entries = match (project, session) {
        (Some(p), _) => feedback::for_project(root, p)?,
        (None, Some(s)) => feedback::for_session(root, s)?,
        (None, None) => feedback::list(root)?,
    };

    if json {
        print_json(&entries)?;
        return Ok(());
    }

    if entries.is_empty() {
        println!("No feedback yet.");
        return Ok(());
    }

    if let Some(avg) = feedback::average_ratings(&entries) {
        println!(
            "Averages: fun {:.1}, clarity {:.1}, balance {:.1}, theme {:.1}, mechanics {:.1}",
            avg.fun, avg.clarity, avg.balance, avg.theme, avg.mechanics
        );
        println!();
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|f| {
            vec![
                f.id.clone(),
                f.project.clone(),
                f.session.clone(),
                f.player.clone(),
                format!(
                    "{}/{}/{}/{}/{}",
                    f.ratings.fun,
                    f.ratings.clarity,
                    f.ratings.balance,
                    f.ratings.theme,
                    f.ratings.mechanics
                ),
                if f.would_play_again { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "PROJECT", "SESSION", "PLAYER", "F/C/B/T/M", "AGAIN?"],
        rows,
    );
    Ok(())
}
