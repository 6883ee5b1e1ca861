//! Users table.
//!
//! The username doubles as the account's display name; signup stores the
//! email in both columns. `role` is either `"USER"` or `"ADMIN"`.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(has_many = "super::incomes::Entity")]
    Incomes,
    #[sea_orm(has_many = "super::budgets::Entity")]
    Budgets,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::incomes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";
