//! Administrative operations: user listing, system totals, user deletion.

use sea_orm::{PaginatorTrait, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, expenses, incomes, users};

use super::Engine;

/// System-wide aggregate counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemTotals {
    pub total_users: u64,
    pub total_expenses: u64,
    pub total_incomes: u64,
    /// Users owning at least one expense or income.
    pub active_users: u64,
}

impl Engine {
    /// List every account with its expense and income counts.
    pub async fn list_users_with_counts(
        &self,
    ) -> ResultEngine<Vec<(users::Model, u64, u64)>> {
        let accounts = users::Entity::find().all(&self.database).await?;

        let mut out = Vec::with_capacity(accounts.len());
        for user in accounts {
            let expense_count = expenses::Entity::find()
                .filter(expenses::Column::UserId.eq(user.id))
                .count(&self.database)
                .await?;
            let income_count = incomes::Entity::find()
                .filter(incomes::Column::UserId.eq(user.id))
                .count(&self.database)
                .await?;
            out.push((user, expense_count, income_count));
        }
        Ok(out)
    }

    /// Compute system-wide totals for the admin dashboard.
    pub async fn system_stats(&self) -> ResultEngine<SystemTotals> {
        let accounts = self.list_users_with_counts().await?;

        Ok(SystemTotals {
            total_users: accounts.len() as u64,
            total_expenses: accounts.iter().map(|(_, e, _)| e).sum(),
            total_incomes: accounts.iter().map(|(_, _, i)| i).sum(),
            active_users: accounts
                .iter()
                .filter(|(_, e, i)| *e > 0 || *i > 0)
                .count() as u64,
        })
    }

    /// Delete an account by id.
    ///
    /// Owned expenses, incomes and budgets go with it via the schema's
    /// `ON DELETE CASCADE` foreign keys.
    pub async fn delete_user(&self, user_id: i32) -> ResultEngine<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("User".to_string()))?;

        user.delete(&self.database).await?;
        Ok(())
    }
}
