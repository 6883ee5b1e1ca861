use sea_orm::{DatabaseConnection, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine};

mod admin;
mod budgets;
mod expenses;
mod incomes;
mod users;

pub use admin::SystemTotals;
pub use incomes::IncomeDraft;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Resolve the acting user named by a request's `username` parameter.
    pub(super) async fn resolve_by_username(
        &self,
        username: &str,
    ) -> ResultEngine<crate::users::Model> {
        crate::users::Entity::find()
            .filter(crate::users::Column::Username.eq(username))
            .one(&self.database)
            .await?
            .ok_or(EngineError::UserNotFound)
    }

    /// Resolve the acting user named by a request's `email` parameter.
    pub(super) async fn resolve_by_email(&self, email: &str) -> ResultEngine<crate::users::Model> {
        crate::users::Entity::find()
            .filter(crate::users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .ok_or(EngineError::UserNotFound)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
