use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{ServerError, budget, expense, income, user};
use engine::{Engine, EngineError, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Gate for the admin endpoints.
///
/// Credentials come in a Basic `Authorization` header (email + password)
/// and are verified against the stored hash; the role check happens after
/// authentication, so a non-admin account gets a 403 with an error body.
async fn admin_auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED.into_response());
    }

    let admin = state
        .engine
        .login(auth_header.username(), auth_header.password())
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED.into_response())?;

    if admin.role != users::ROLE_ADMIN {
        return Err(ServerError::Engine(EngineError::Forbidden(
            "Unauthorized: Admin access required".to_string(),
        ))
        .into_response());
    }

    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let admin = Router::new()
        .route("/api/users/admin/users", get(user::admin_list))
        .route("/api/users/admin/stats", get(user::admin_stats))
        .route(
            "/api/users/admin/delete/{user_id}",
            delete(user::admin_delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth));

    Router::new()
        .route("/api/users/signup", post(user::signup))
        .route("/api/users/login", post(user::login))
        .route("/api/users/{email}", get(user::profile))
        .route("/api/expenses", post(expense::create).get(expense::list))
        .route(
            "/api/expenses/{id}",
            put(expense::update).delete(expense::remove),
        )
        .route("/api/incomes", get(income::list).post(income::create))
        .route("/api/incomes/total", get(income::total))
        .route("/api/incomes/recurring", get(income::recurring))
        .route("/api/incomes/type/{income_type}", get(income::by_type))
        .route(
            "/api/incomes/{id}",
            put(income::update).delete(income::remove),
        )
        .route("/api/budgets", post(budget::upsert).get(budget::list))
        .route(
            "/api/budgets/{id}",
            put(budget::update).delete(budget::remove),
        )
        .merge(admin)
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
