//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Pennywise:
//!
//! - `users`: accounts with hashed credentials and a role
//! - `expenses`: per-user expenses with a creation timestamp
//! - `incomes`: per-user incomes with a typed source and recurrence
//! - `budgets`: per-user monthly category budgets, unique per
//!   (user, category, month)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Title,
    Description,
    Amount,
    Category,
    ExpenseDate,
    UserId,
}

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    Amount,
    Date,
    IncomeType,
    IsRecurring,
    RecurrencePattern,
    UserId,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    Category,
    Amount,
    Month,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("USER"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Title).string().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::ExpenseDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-user_id")
                            .from(Expenses::Table, Expenses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-expense_date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::ExpenseDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Incomes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Incomes::Amount).double().not_null())
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .col(ColumnDef::new(Incomes::IncomeType).string().not_null())
                    .col(ColumnDef::new(Incomes::IsRecurring).boolean().not_null())
                    .col(ColumnDef::new(Incomes::RecurrencePattern).string())
                    .col(ColumnDef::new(Incomes::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-incomes-user_id")
                            .from(Incomes::Table, Incomes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-incomes-user_id-date")
                    .table(Incomes::Table)
                    .col(Incomes::UserId)
                    .col(Incomes::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::Category).string().not_null())
                    .col(ColumnDef::new(Budgets::Amount).double().not_null())
                    .col(ColumnDef::new(Budgets::Month).string().not_null())
                    .col(ColumnDef::new(Budgets::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-user_id")
                            .from(Budgets::Table, Budgets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id-category-month-unique")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .col(Budgets::Category)
                    .col(Budgets::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
