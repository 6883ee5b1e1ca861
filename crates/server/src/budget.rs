//! Budget API endpoints. POST is an upsert keyed on (user, category, month).

use api_types::budget::{BudgetListQuery, BudgetView, BudgetWrite};
use api_types::user::Message;
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, server::ServerState};
use engine::budgets;

fn view_of(budget: budgets::Model) -> BudgetView {
    BudgetView {
        id: budget.id.to_string(),
        category: budget.category,
        amount: budget.amount,
        month: budget.month,
    }
}

pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetWrite>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state
        .engine
        .upsert_budget(
            &payload.username,
            &payload.category,
            payload.amount,
            &payload.month,
        )
        .await?;

    Ok(Json(view_of(budget)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BudgetListQuery>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    // An explicitly empty `month=` means no filter.
    let month = query.month.as_deref().filter(|month| !month.is_empty());
    let budgets = state
        .engine
        .budgets_for_user(&query.username, month)
        .await?;

    Ok(Json(budgets.into_iter().map(view_of).collect()))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<BudgetWrite>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state
        .engine
        .update_budget(
            id,
            &payload.username,
            &payload.category,
            payload.amount,
            &payload.month,
        )
        .await?;

    Ok(Json(view_of(budget)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(query): Query<BudgetListQuery>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_budget(id, &query.username).await?;

    Ok(Json(Message {
        message: "Budget deleted successfully".to_string(),
    }))
}
