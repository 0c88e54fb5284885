//! Serves project databases and photo files to the gallery.
//!
//! Layout under the content root: one directory per project, holding its
//! `db.json` and the photo assets the database references.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path as AxumPath, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct AppState {
    content_root: Arc<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let content_root = PathBuf::from(
        env::var("WAYPOINTS_CONTENT_ROOT").unwrap_or_else(|_| "./content".to_string()),
    );
    let addr: SocketAddr = env::var("WAYPOINTS_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9200".to_string())
        .parse()
        .expect("invalid WAYPOINTS_ADDR");

    let state = AppState {
        content_root: Arc::new(content_root.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/projects/:name/db.json", get(get_project_db))
        .nest_service("/photos", ServeDir::new(content_root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("waypoints server listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_project_db(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
) -> Response {
    if !is_safe_project_name(&name) {
        return (StatusCode::BAD_REQUEST, "invalid project name").into_response();
    }

    let path = state.content_root.join(&name).join("db.json");
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (StatusCode::NOT_FOUND, "unknown project").into_response();
        }
        Err(err) => {
            error!("read {path:?}: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "project read error").into_response();
        }
    };

    // Decode before serving so a corrupt database fails loudly here, not in
    // the client.
    if let Err(err) = project::ProjectData::from_json(&raw) {
        error!("decode {path:?}: {err}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "project decode error").into_response();
    }

    ([(header::CONTENT_TYPE, "application/json")], raw).into_response()
}

fn is_safe_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
