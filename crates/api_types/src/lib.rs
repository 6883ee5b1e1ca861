use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Signup {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    /// Profile returned by signup, login and the profile lookup.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Profile {
        /// Surrogate id, serialized as a string.
        pub id: String,
        pub email: String,
        pub name: String,
        pub role: String,
    }

    /// Per-user summary for the admin listing.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Summary {
        pub id: String,
        pub email: String,
        pub username: String,
        pub role: String,
        pub expense_count: u64,
        pub income_count: u64,
    }

    /// System-wide aggregate counts for the admin dashboard.
    ///
    /// A user counts as active when it owns at least one expense or income.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SystemStats {
        pub total_users: u64,
        pub total_expenses: u64,
        pub total_incomes: u64,
        pub active_users: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Message {
        pub message: String,
    }
}

pub mod expense {
    use super::*;

    /// Create/update payload. The acting user is identified by `username`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseWrite {
        pub username: String,
        pub description: String,
        pub amount: f64,
        pub category: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: String,
        pub description: String,
        pub amount: f64,
        pub category: String,
        pub date: NaiveDateTime,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListQuery {
        pub username: String,
    }
}

pub mod income {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeWrite {
        pub email: String,
        pub amount: f64,
        /// ISO-ish date; anything after a literal 'T' is ignored. Defaults
        /// to today when absent.
        pub date: Option<String>,
        #[serde(rename = "type")]
        pub income_type: String,
        pub is_recurring: Option<bool>,
        pub recurrence_pattern: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeView {
        pub id: String,
        pub amount: f64,
        pub date: NaiveDate,
        #[serde(rename = "type")]
        pub income_type: String,
        pub recurring: bool,
        pub recurrence_pattern: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeListQuery {
        pub email: String,
        pub month: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeTotal {
        pub total: f64,
    }
}

pub mod budget {
    use super::*;

    /// Upsert/update payload. The acting user is identified by `username`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetWrite {
        pub username: String,
        pub category: String,
        pub amount: f64,
        /// Format: "YYYY-MM".
        pub month: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: String,
        pub category: String,
        pub amount: f64,
        pub month: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListQuery {
        pub username: String,
        pub month: Option<String>,
    }
}
