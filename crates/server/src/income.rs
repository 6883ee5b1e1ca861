//! Income API endpoints, including the filtered reads and the month total.

use api_types::income::{IncomeListQuery, IncomeTotal, IncomeView, IncomeWrite};
use api_types::user::Message;
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, server::ServerState};
use engine::{IncomeDraft, IncomeType, incomes};

fn view_of(income: incomes::Model) -> IncomeView {
    IncomeView {
        id: income.id.to_string(),
        amount: income.amount,
        date: income.date,
        income_type: income.income_type,
        recurring: income.is_recurring,
        recurrence_pattern: income.recurrence_pattern,
    }
}

fn draft_of(payload: IncomeWrite) -> IncomeDraft {
    IncomeDraft {
        amount: payload.amount,
        date: payload.date,
        income_type: payload.income_type,
        is_recurring: payload.is_recurring.unwrap_or(false),
        recurrence_pattern: payload.recurrence_pattern,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IncomeWrite>,
) -> Result<Json<IncomeView>, ServerError> {
    let email = payload.email.clone();
    let income = state.engine.create_income(&email, draft_of(payload)).await?;

    Ok(Json(view_of(income)))
}

// An explicitly empty `month=` means no filter.
fn month_filter(query: &IncomeListQuery) -> Option<&str> {
    query.month.as_deref().filter(|month| !month.is_empty())
}

/// Without a `month` parameter this lists everything; with one it lists the
/// incomes dated inside that "YYYY-MM" month.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<IncomeListQuery>,
) -> Result<Json<Vec<IncomeView>>, ServerError> {
    let incomes = match month_filter(&query) {
        Some(month) => state.engine.incomes_for_month(&query.email, month).await?,
        None => state.engine.incomes_for_user(&query.email).await?,
    };

    Ok(Json(incomes.into_iter().map(view_of).collect()))
}

pub async fn total(
    State(state): State<ServerState>,
    Query(query): Query<IncomeListQuery>,
) -> Result<Json<IncomeTotal>, ServerError> {
    let total = state
        .engine
        .total_income(&query.email, month_filter(&query))
        .await?;

    Ok(Json(IncomeTotal { total }))
}

pub async fn recurring(
    State(state): State<ServerState>,
    Query(query): Query<IncomeListQuery>,
) -> Result<Json<Vec<IncomeView>>, ServerError> {
    let incomes = state.engine.recurring_incomes(&query.email).await?;

    Ok(Json(incomes.into_iter().map(view_of).collect()))
}

pub async fn by_type(
    State(state): State<ServerState>,
    Path(income_type): Path<String>,
    Query(query): Query<IncomeListQuery>,
) -> Result<Json<Vec<IncomeView>>, ServerError> {
    let income_type = IncomeType::try_from(income_type.as_str())?;
    let incomes = state
        .engine
        .incomes_by_type(&query.email, income_type)
        .await?;

    Ok(Json(incomes.into_iter().map(view_of).collect()))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<IncomeWrite>,
) -> Result<Json<IncomeView>, ServerError> {
    let email = payload.email.clone();
    let income = state
        .engine
        .update_income(id, &email, draft_of(payload))
        .await?;

    Ok(Json(view_of(income)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(query): Query<IncomeListQuery>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_income(id, &query.email).await?;

    Ok(Json(Message {
        message: "Income deleted successfully".to_string(),
    }))
}
