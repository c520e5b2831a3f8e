use std::sync::Arc;

use auth::Authenticator;
use notes_service::config::Config;
use notes_service::domain::note::service::NoteService;
use notes_service::domain::session::service::SessionService;
use notes_service::domain::team::service::TeamService;
use notes_service::domain::team_note::service::TeamNoteService;
use notes_service::domain::user::service::UserService;
use notes_service::inbound::http::router::create_router;
use notes_service::inbound::http::router::AppState;
use notes_service::outbound::repositories::PostgresNoteRepository;
use notes_service::outbound::repositories::PostgresRefreshTokenRepository;
use notes_service::outbound::repositories::PostgresTeamNoteRepository;
use notes_service::outbound::repositories::PostgresTeamRepository;
use notes_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "notes-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_days = config.session.refresh_token_ttl_days,
        "Configuration loaded"
    );

    // Refuse to start without a usable signing secret.
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .inspect_err(|e| tracing::error!(error = %e, "Invalid JWT configuration"))?
            .with_session_ttl(config.access_token_ttl()),
    );

    if config.payment.api_key.is_empty() {
        tracing::warn!("No payment API key configured, payment webhooks will be rejected");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool.clone()));
    let note_repository = Arc::new(PostgresNoteRepository::new(pg_pool.clone()));
    let team_repository = Arc::new(PostgresTeamRepository::new(pg_pool.clone()));
    let team_note_repository = Arc::new(PostgresTeamNoteRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        session_service: Arc::new(SessionService::new(
            Arc::clone(&user_repository),
            refresh_token_repository,
            Arc::clone(&authenticator),
            config.refresh_token_ttl(),
        )),
        note_service: Arc::new(NoteService::new(note_repository)),
        team_service: Arc::new(TeamService::new(
            Arc::clone(&team_repository),
            user_repository,
        )),
        team_note_service: Arc::new(TeamNoteService::new(team_note_repository, team_repository)),
        authenticator,
        payment_api_key: Arc::from(config.payment.api_key.as_str()),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state))
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server error"))?;

    tracing::info!("Server exited successfully");

    Ok(())
}
