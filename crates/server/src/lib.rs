use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener};

mod budget;
mod expense;
mod income;
mod server;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{Login, Message, Profile, Signup, Summary, SystemStats};
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseListQuery, ExpenseView, ExpenseWrite};
    }

    pub mod income {
        pub use api_types::income::{IncomeListQuery, IncomeTotal, IncomeView, IncomeWrite};
    }

    pub mod budget {
        pub use api_types::budget::{BudgetListQuery, BudgetView, BudgetWrite};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        // Acting-user resolution failures read as bad requests, not 404s.
        EngineError::Validation(_) | EngineError::UserNotFound => StatusCode::BAD_REQUEST,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("Expense".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn acting_user_not_found_maps_to_400() {
        let res = ServerError::from(EngineError::UserNotFound).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        let res = ServerError::from(EngineError::Validation("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_database_maps_to_500() {
        let res = ServerError::from(EngineError::Database(sea_orm::DbErr::Custom(
            "boom".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
