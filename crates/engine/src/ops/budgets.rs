//! Budget operations.
//!
//! The create path is an upsert keyed on (user, category, month); a unique
//! index backs the invariant, so the rare concurrent double-insert loses at
//! the database instead of producing a duplicate row.

use sea_orm::{ActiveValue, QueryFilter, prelude::*};

use crate::{
    EngineError, ResultEngine, budgets,
    util::{month_range, normalize_required, require_positive_amount},
};

use super::Engine;

impl Engine {
    /// Create a budget, or overwrite the amount of the existing one for the
    /// same (user, category, month).
    pub async fn upsert_budget(
        &self,
        username: &str,
        category: &str,
        amount: f64,
        month: &str,
    ) -> ResultEngine<budgets::Model> {
        let user = self.resolve_by_username(username).await?;
        let category = normalize_required(category, "Category")?;
        let month = normalize_required(month, "Month")?;
        month_range(&month)?;
        require_positive_amount(amount)?;

        let existing = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user.id))
            .filter(budgets::Column::Category.eq(&category))
            .filter(budgets::Column::Month.eq(&month))
            .one(&self.database)
            .await?;

        if let Some(budget) = existing {
            let mut budget: budgets::ActiveModel = budget.into();
            budget.amount = ActiveValue::Set(amount);
            return Ok(budget.update(&self.database).await?);
        }

        let budget = budgets::ActiveModel {
            category: ActiveValue::Set(category),
            amount: ActiveValue::Set(amount),
            month: ActiveValue::Set(month),
            user_id: ActiveValue::Set(user.id),
            ..Default::default()
        };
        Ok(budget.insert(&self.database).await?)
    }

    /// All of a user's budgets, optionally restricted to one month.
    pub async fn budgets_for_user(
        &self,
        username: &str,
        month: Option<&str>,
    ) -> ResultEngine<Vec<budgets::Model>> {
        let user = self.resolve_by_username(username).await?;

        let mut query = budgets::Entity::find().filter(budgets::Column::UserId.eq(user.id));
        if let Some(month) = month {
            query = query.filter(budgets::Column::Month.eq(month));
        }

        Ok(query.all(&self.database).await?)
    }

    /// Overwrite a budget's fields after an ownership check.
    pub async fn update_budget(
        &self,
        id: i32,
        username: &str,
        category: &str,
        amount: f64,
        month: &str,
    ) -> ResultEngine<budgets::Model> {
        let user = self.resolve_by_username(username).await?;
        let category = normalize_required(category, "Category")?;
        let month = normalize_required(month, "Month")?;
        month_range(&month)?;
        require_positive_amount(amount)?;

        let budget = budgets::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("Budget".to_string()))?;
        if budget.user_id != user.id {
            return Err(EngineError::Forbidden(
                "Unauthorized access to budget".to_string(),
            ));
        }

        let mut budget: budgets::ActiveModel = budget.into();
        budget.category = ActiveValue::Set(category);
        budget.amount = ActiveValue::Set(amount);
        budget.month = ActiveValue::Set(month);

        Ok(budget.update(&self.database).await?)
    }

    /// Remove a budget after an ownership check.
    pub async fn delete_budget(&self, id: i32, username: &str) -> ResultEngine<()> {
        let user = self.resolve_by_username(username).await?;

        let budget = budgets::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("Budget".to_string()))?;
        if budget.user_id != user.id {
            return Err(EngineError::Forbidden(
                "Unauthorized access to budget".to_string(),
            ));
        }

        budget.delete(&self.database).await?;
        Ok(())
    }
}
