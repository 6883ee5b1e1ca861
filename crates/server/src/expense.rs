//! Expense API endpoints.

use api_types::expense::{ExpenseListQuery, ExpenseView, ExpenseWrite};
use api_types::user::Message;
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, server::ServerState};
use engine::expenses;

fn view_of(expense: expenses::Model) -> ExpenseView {
    ExpenseView {
        id: expense.id.to_string(),
        description: expense.description,
        amount: expense.amount,
        category: expense.category,
        date: expense.expense_date,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseWrite>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .create_expense(
            &payload.username,
            &payload.description,
            payload.amount,
            &payload.category,
        )
        .await?;

    Ok(Json(view_of(expense)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.expenses_for_user(&query.username).await?;

    Ok(Json(expenses.into_iter().map(view_of).collect()))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<ExpenseWrite>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .update_expense(
            id,
            &payload.username,
            &payload.description,
            payload.amount,
            &payload.category,
        )
        .await?;

    Ok(Json(view_of(expense)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_expense(id, &query.username).await?;

    Ok(Json(Message {
        message: "Expense deleted successfully".to_string(),
    }))
}
