pub mod feedback;
pub mod leaderboard;
pub mod members;
pub mod overview;
pub mod projects;
pub mod queue;
pub mod sessions;
