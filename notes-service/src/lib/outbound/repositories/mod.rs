pub mod note;
pub mod refresh_token;
pub mod team;
pub mod team_note;
pub mod user;

pub use note::PostgresNoteRepository;
pub use refresh_token::PostgresRefreshTokenRepository;
pub use team::PostgresTeamRepository;
pub use team_note::PostgresTeamNoteRepository;
pub use user::PostgresUserRepository;
