//! Income primitives.
//!
//! An income has a calendar date (no time of day) and a type drawn from a
//! closed enumeration. Recurring incomes carry a recurrence pattern,
//! `"MONTHLY"` unless the client says otherwise.

use sea_orm::entity::prelude::*;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncomeType {
    Salary,
    Business,
    Investment,
    Gift,
    Other,
}

impl IncomeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "SALARY",
            Self::Business => "BUSINESS",
            Self::Investment => "INVESTMENT",
            Self::Gift => "GIFT",
            Self::Other => "OTHER",
        }
    }
}

impl TryFrom<&str> for IncomeType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "SALARY" => Ok(Self::Salary),
            "BUSINESS" => Ok(Self::Business),
            "INVESTMENT" => Ok(Self::Investment),
            "GIFT" => Ok(Self::Gift),
            "OTHER" => Ok(Self::Other),
            other => Err(EngineError::Validation(format!(
                "Invalid income type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount: f64,
    pub date: Date,
    pub income_type: String,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
