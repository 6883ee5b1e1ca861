//! Account operations: signup, login and profile lookup.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveValue, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, users, util::normalize_required};

use super::Engine;

fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Validation(format!("Failed to hash password: {err}")))
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}

impl Engine {
    /// Create an account.
    ///
    /// The email doubles as the username. The role is `"ADMIN"` when the
    /// email contains "admin" (case-insensitive), `"USER"` otherwise.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        normalize_required(name, "Name")?;
        let email = normalize_required(email, "Email")?;
        let password = normalize_required(password, "Password")?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::Validation("Email already exists".to_string()));
        }

        let role = if email.to_lowercase().contains("admin") {
            users::ROLE_ADMIN
        } else {
            users::ROLE_USER
        };

        let user = users::ActiveModel {
            username: ActiveValue::Set(email.clone()),
            email: ActiveValue::Set(email),
            password_hash: ActiveValue::Set(hash_password(&password)?),
            role: ActiveValue::Set(role.to_string()),
            ..Default::default()
        };

        Ok(user.insert(&self.database).await?)
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<users::Model> {
        let email = normalize_required(email, "Email")?;
        let password = normalize_required(password, "Password")?;

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&self.database)
            .await?;

        match user {
            Some(user) if verify_password(&password, &user.password_hash) => Ok(user),
            _ => Err(EngineError::Validation("Invalid credentials".to_string())),
        }
    }

    /// Look up a profile by email.
    pub async fn profile(&self, email: &str) -> ResultEngine<users::Model> {
        normalize_required(email, "Email")?;
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("User".to_string()))
    }
}
