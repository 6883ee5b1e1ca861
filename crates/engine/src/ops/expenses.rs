//! Expense operations.
//!
//! The acting user is identified by username; updates and deletes re-verify
//! that the row belongs to that user before touching it.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, ResultEngine, expenses, util::require_positive_amount};

use super::Engine;

impl Engine {
    /// Record a new expense, stamped with the current time.
    ///
    /// The title mirrors the description; clients only send the latter.
    pub async fn create_expense(
        &self,
        username: &str,
        description: &str,
        amount: f64,
        category: &str,
    ) -> ResultEngine<expenses::Model> {
        let user = self.resolve_by_username(username).await?;
        require_positive_amount(amount)?;

        let expense = expenses::ActiveModel {
            title: ActiveValue::Set(description.to_string()),
            description: ActiveValue::Set(description.to_string()),
            amount: ActiveValue::Set(amount),
            category: ActiveValue::Set(category.to_string()),
            expense_date: ActiveValue::Set(Utc::now().naive_utc()),
            user_id: ActiveValue::Set(user.id),
            ..Default::default()
        };

        Ok(expense.insert(&self.database).await?)
    }

    /// All of a user's expenses, newest first.
    pub async fn expenses_for_user(&self, username: &str) -> ResultEngine<Vec<expenses::Model>> {
        let user = self.resolve_by_username(username).await?;

        Ok(expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user.id))
            .order_by_desc(expenses::Column::ExpenseDate)
            .all(&self.database)
            .await?)
    }

    /// Overwrite an expense's mutable fields after an ownership check.
    pub async fn update_expense(
        &self,
        id: i32,
        username: &str,
        description: &str,
        amount: f64,
        category: &str,
    ) -> ResultEngine<expenses::Model> {
        let user = self.resolve_by_username(username).await?;
        require_positive_amount(amount)?;

        let expense = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("Expense".to_string()))?;
        if expense.user_id != user.id {
            return Err(EngineError::Forbidden(
                "Unauthorized access to expense".to_string(),
            ));
        }

        let mut expense: expenses::ActiveModel = expense.into();
        expense.title = ActiveValue::Set(description.to_string());
        expense.description = ActiveValue::Set(description.to_string());
        expense.amount = ActiveValue::Set(amount);
        expense.category = ActiveValue::Set(category.to_string());

        Ok(expense.update(&self.database).await?)
    }

    /// Remove an expense after an ownership check.
    pub async fn delete_expense(&self, id: i32, username: &str) -> ResultEngine<()> {
        let user = self.resolve_by_username(username).await?;

        let expense = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("Expense".to_string()))?;
        if expense.user_id != user.id {
            return Err(EngineError::Forbidden(
                "Unauthorized access to expense".to_string(),
            ));
        }

        expense.delete(&self.database).await?;
        Ok(())
    }
}
