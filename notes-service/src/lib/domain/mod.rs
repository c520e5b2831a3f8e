pub mod note;
pub mod policy;
pub mod session;
pub mod team;
pub mod team_note;
pub mod user;
