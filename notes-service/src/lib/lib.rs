pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::note;
pub use domain::policy;
pub use domain::session;
pub use domain::team;
pub use domain::team_note;
pub use domain::user;
pub use outbound::repositories;
