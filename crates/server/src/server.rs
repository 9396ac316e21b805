//! The budgets service: router, state and HTTP Basic auth.
//!
//! One collection, one document per budget keyed by id, list ordered by
//! date descending. Storage goes through the engine's slot store, so the
//! service persists across restarts with nothing but a data directory.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use tokio::sync::RwLock;

use crate::budgets;
use engine::{BudgetCollection, JsonFileStore};

/// Slot key the service stores its collection under.
pub const BUDGETS_KEY: &str = "budgets";

/// Credentials every request must present via HTTP Basic auth.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub budgets: Arc<RwLock<BudgetCollection<JsonFileStore>>>,
    pub credentials: Arc<Credentials>,
}

impl ServerState {
    pub fn new(store: JsonFileStore, credentials: Credentials) -> Self {
        Self {
            budgets: Arc::new(RwLock::new(BudgetCollection::new(store, BUDGETS_KEY))),
            credentials: Arc::new(credentials),
        }
    }
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(header)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    if header.username() != state.credentials.username
        || header.password() != state.credentials.password
    {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/budgets", get(budgets::list))
        .route(
            "/budgets/{id}",
            get(budgets::get_one)
                .put(budgets::upsert)
                .delete(budgets::remove),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Budgets service listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("budgets service failed: {err}");
        }
    });

    Ok(addr)
}
