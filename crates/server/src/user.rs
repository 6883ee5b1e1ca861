//! User API endpoints: signup, login, profile and the admin surface.

use api_types::user::{Login, Message, Profile, Signup, Summary, SystemStats};
use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};
use engine::users;

fn profile_of(user: &users::Model, name: &str) -> Profile {
    Profile {
        id: user.id.to_string(),
        email: user.email.clone(),
        name: name.to_string(),
        role: user.role.clone(),
    }
}

pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<Signup>,
) -> Result<Json<Profile>, ServerError> {
    let user = state
        .engine
        .signup(&payload.name, &payload.email, &payload.password)
        .await?;

    // Echo the display name from the request; only the email is stored.
    Ok(Json(profile_of(&user, &payload.name)))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<Profile>, ServerError> {
    let user = state.engine.login(&payload.email, &payload.password).await?;
    let name = user.username.clone();

    Ok(Json(profile_of(&user, &name)))
}

pub async fn profile(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Json<Profile>, ServerError> {
    let user = state.engine.profile(&email).await?;
    let name = user.username.clone();

    Ok(Json(profile_of(&user, &name)))
}

pub async fn admin_list(
    Extension(_admin): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Summary>>, ServerError> {
    let accounts = state.engine.list_users_with_counts().await?;

    let summaries = accounts
        .into_iter()
        .map(|(user, expense_count, income_count)| Summary {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            role: user.role,
            expense_count,
            income_count,
        })
        .collect();

    Ok(Json(summaries))
}

pub async fn admin_stats(
    Extension(_admin): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<SystemStats>, ServerError> {
    let totals = state.engine.system_stats().await?;

    Ok(Json(SystemStats {
        total_users: totals.total_users,
        total_expenses: totals.total_expenses,
        total_incomes: totals.total_incomes,
        active_users: totals.active_users,
    }))
}

pub async fn admin_delete(
    Extension(_admin): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_user(user_id).await?;

    Ok(Json(Message {
        message: "User deleted successfully".to_string(),
    }))
}
