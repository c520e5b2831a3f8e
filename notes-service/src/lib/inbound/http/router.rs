use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health_check;
use super::handlers::notes::create_note;
use super::handlers::notes::delete_note;
use super::handlers::notes::get_note;
use super::handlers::notes::list_notes;
use super::handlers::notes::update_note;
use super::handlers::payment::payment_webhook;
use super::handlers::session::login;
use super::handlers::session::logout;
use super::handlers::session::refresh;
use super::handlers::team_notes::create_team_note;
use super::handlers::team_notes::delete_team_note;
use super::handlers::team_notes::get_team_note;
use super::handlers::team_notes::list_team_notes;
use super::handlers::team_notes::update_team_note;
use super::handlers::teams::add_member;
use super::handlers::teams::create_team;
use super::handlers::teams::delete_team;
use super::handlers::teams::get_team;
use super::handlers::teams::list_members;
use super::handlers::teams::list_teams;
use super::handlers::teams::remove_member;
use super::handlers::users::get_me;
use super::handlers::users::register;
use super::handlers::users::update_me;
use super::middleware::authenticate as auth_middleware;
use crate::note::ports::NoteServicePort;
use crate::session::ports::SessionServicePort;
use crate::team::ports::TeamServicePort;
use crate::team_note::ports::TeamNoteServicePort;
use crate::user::ports::UserServicePort;

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub note_service: Arc<dyn NoteServicePort>,
    pub team_service: Arc<dyn TeamServicePort>,
    pub team_note_service: Arc<dyn TeamNoteServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub payment_api_key: Arc<str>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/healthz", get(health_check))
        .route("/api/v1/register", post(register))
        .route("/api/v1/login", post(login))
        .route("/api/v1/token/refresh", post(refresh))
        .route("/api/v1/logout", post(logout))
        .route("/api/v1/payment/webhooks", post(payment_webhook));

    let protected_routes = Router::new()
        .route("/api/v1/user/me", get(get_me).put(update_me))
        .route("/api/v1/notes", post(create_note).get(list_notes))
        .route(
            "/api/v1/notes/:note_id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/v1/teams", post(create_team).get(list_teams))
        .route("/api/v1/teams/:team_id", get(get_team).delete(delete_team))
        .route(
            "/api/v1/teams/:team_id/members",
            post(add_member).get(list_members),
        )
        .route(
            "/api/v1/teams/:team_id/members/:member_id",
            delete(remove_member),
        )
        .route(
            "/api/v1/teams/:team_id/notes",
            post(create_team_note).get(list_team_notes),
        )
        .route(
            "/api/v1/teams/:team_id/notes/:note_id",
            get(get_team_note)
                .put(update_team_note)
                .delete(delete_team_note),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer()),
        )
        .with_state(state)
}

/// Browser access is limited to local front ends.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| is_local_origin(origin)))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn is_local_origin(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| {
            let origin = origin.to_ascii_lowercase();
            origin.starts_with("http://localhost") || origin.starts_with("https://localhost")
        })
        .unwrap_or(false)
}
