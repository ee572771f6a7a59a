pub mod badge;
pub mod feedback;
pub mod init;
pub mod member;
pub mod points;
pub mod project;
pub mod queue;
pub mod serve;
pub mod session;
