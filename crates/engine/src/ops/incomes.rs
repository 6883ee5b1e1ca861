//! Income operations: create/update with validation, filtered reads and the
//! month total aggregate.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, Statement, prelude::*};

use crate::{
    EngineError, IncomeType, ResultEngine, incomes,
    util::{month_range, parse_income_date, require_positive_amount},
};

use super::Engine;

/// Validated fields for creating or overwriting an income.
#[derive(Clone, Debug, Default)]
pub struct IncomeDraft {
    pub amount: f64,
    /// ISO-ish date string; anything after a literal 'T' is ignored.
    /// Missing means today.
    pub date: Option<String>,
    pub income_type: String,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
}

impl IncomeDraft {
    fn validate(&self) -> ResultEngine<(f64, chrono::NaiveDate, IncomeType)> {
        require_positive_amount(self.amount)?;
        let income_type = IncomeType::try_from(self.income_type.as_str())?;
        let date = parse_income_date(self.date.as_deref())?;
        Ok((self.amount, date, income_type))
    }

    fn pattern(&self) -> Option<String> {
        self.is_recurring
            .then(|| {
                self.recurrence_pattern
                    .clone()
                    .unwrap_or_else(|| "MONTHLY".to_string())
            })
    }
}

impl Engine {
    /// Record a new income for the user identified by email.
    pub async fn create_income(
        &self,
        email: &str,
        draft: IncomeDraft,
    ) -> ResultEngine<incomes::Model> {
        let user = self.resolve_by_email(email).await?;
        let (amount, date, income_type) = draft.validate()?;

        let income = incomes::ActiveModel {
            amount: ActiveValue::Set(amount),
            date: ActiveValue::Set(date),
            income_type: ActiveValue::Set(income_type.as_str().to_string()),
            is_recurring: ActiveValue::Set(draft.is_recurring),
            recurrence_pattern: ActiveValue::Set(draft.pattern()),
            user_id: ActiveValue::Set(user.id),
            ..Default::default()
        };

        Ok(income.insert(&self.database).await?)
    }

    /// All of a user's incomes, newest first.
    pub async fn incomes_for_user(&self, email: &str) -> ResultEngine<Vec<incomes::Model>> {
        let user = self.resolve_by_email(email).await?;

        Ok(incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user.id))
            .order_by_desc(incomes::Column::Date)
            .all(&self.database)
            .await?)
    }

    /// Incomes falling inside a "YYYY-MM" month, newest first.
    pub async fn incomes_for_month(
        &self,
        email: &str,
        month: &str,
    ) -> ResultEngine<Vec<incomes::Model>> {
        let user = self.resolve_by_email(email).await?;
        let (start, end) = month_range(month)?;

        Ok(incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user.id))
            .filter(incomes::Column::Date.between(start, end))
            .order_by_desc(incomes::Column::Date)
            .all(&self.database)
            .await?)
    }

    /// Recurring incomes only, newest first.
    pub async fn recurring_incomes(&self, email: &str) -> ResultEngine<Vec<incomes::Model>> {
        let user = self.resolve_by_email(email).await?;

        Ok(incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user.id))
            .filter(incomes::Column::IsRecurring.eq(true))
            .order_by_desc(incomes::Column::Date)
            .all(&self.database)
            .await?)
    }

    /// Incomes of one type, newest first.
    pub async fn incomes_by_type(
        &self,
        email: &str,
        income_type: IncomeType,
    ) -> ResultEngine<Vec<incomes::Model>> {
        let user = self.resolve_by_email(email).await?;

        Ok(incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user.id))
            .filter(incomes::Column::IncomeType.eq(income_type.as_str()))
            .order_by_desc(incomes::Column::Date)
            .all(&self.database)
            .await?)
    }

    /// Sum of income amounts, optionally restricted to a "YYYY-MM" month
    /// (both endpoints inclusive). Returns 0.0 when nothing matches.
    pub async fn total_income(&self, email: &str, month: Option<&str>) -> ResultEngine<f64> {
        let user = self.resolve_by_email(email).await?;
        let backend = self.database.get_database_backend();

        let stmt = match month {
            Some(month) => {
                let (start, end) = month_range(month)?;
                Statement::from_sql_and_values(
                    backend,
                    "SELECT COALESCE(SUM(amount), 0.0) AS total \
                     FROM incomes \
                     WHERE user_id = ? AND date >= ? AND date <= ?",
                    [user.id.into(), start.into(), end.into()],
                )
            }
            None => Statement::from_sql_and_values(
                backend,
                "SELECT COALESCE(SUM(amount), 0.0) AS total \
                 FROM incomes \
                 WHERE user_id = ?",
                [user.id.into()],
            ),
        };

        let row = self.database.query_one(stmt).await?;
        Ok(row
            .and_then(|r| r.try_get::<f64>("", "total").ok())
            .unwrap_or(0.0))
    }

    /// Overwrite an income after an ownership check.
    pub async fn update_income(
        &self,
        id: i32,
        email: &str,
        draft: IncomeDraft,
    ) -> ResultEngine<incomes::Model> {
        let user = self.resolve_by_email(email).await?;
        let (amount, date, income_type) = draft.validate()?;

        let income = incomes::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("Income".to_string()))?;
        if income.user_id != user.id {
            return Err(EngineError::Forbidden(
                "Not authorized to update this income".to_string(),
            ));
        }

        let mut income: incomes::ActiveModel = income.into();
        income.amount = ActiveValue::Set(amount);
        income.date = ActiveValue::Set(date);
        income.income_type = ActiveValue::Set(income_type.as_str().to_string());
        income.is_recurring = ActiveValue::Set(draft.is_recurring);
        // The stored pattern is left alone when the income stops recurring.
        if draft.is_recurring {
            income.recurrence_pattern = ActiveValue::Set(draft.pattern());
        }

        Ok(income.update(&self.database).await?)
    }

    /// Remove an income after an ownership check.
    pub async fn delete_income(&self, id: i32, email: &str) -> ResultEngine<()> {
        let user = self.resolve_by_email(email).await?;

        let income = incomes::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("Income".to_string()))?;
        if income.user_id != user.id {
            return Err(EngineError::Forbidden(
                "Not authorized to delete this income".to_string(),
            ));
        }

        income.delete(&self.database).await?;
        Ok(())
    }
}
