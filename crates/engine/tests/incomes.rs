use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, IncomeDraft, IncomeType};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn signup(engine: &Engine, email: &str) {
    engine.signup("Someone", email, "secret").await.unwrap();
}

fn salary(amount: f64, date: &str) -> IncomeDraft {
    IncomeDraft {
        amount,
        date: Some(date.to_string()),
        income_type: "SALARY".to_string(),
        is_recurring: false,
        recurrence_pattern: None,
    }
}

#[tokio::test]
async fn create_income_parses_date_and_type() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    let income = engine
        .create_income(
            "alice@example.com",
            salary(2500.0, "2026-08-15T10:30:00"),
        )
        .await
        .unwrap();

    assert_eq!(income.amount, 2500.0);
    assert_eq!(income.date, NaiveDate::from_ymd_opt(2026, 8, 15).unwrap());
    assert_eq!(income.income_type, "SALARY");
    assert!(!income.is_recurring);
    assert_eq!(income.recurrence_pattern, None);
}

#[tokio::test]
async fn create_income_rejects_unknown_type() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    let err = engine
        .create_income(
            "alice@example.com",
            IncomeDraft {
                amount: 100.0,
                date: None,
                income_type: "LOTTERY".to_string(),
                is_recurring: false,
                recurrence_pattern: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("Invalid income type: LOTTERY".to_string())
    );
}

#[tokio::test]
async fn recurring_income_defaults_to_monthly_pattern() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    let income = engine
        .create_income(
            "alice@example.com",
            IncomeDraft {
                amount: 2500.0,
                date: Some("2026-08-01".to_string()),
                income_type: "SALARY".to_string(),
                is_recurring: true,
                recurrence_pattern: None,
            },
        )
        .await
        .unwrap();

    assert!(income.is_recurring);
    assert_eq!(income.recurrence_pattern.as_deref(), Some("MONTHLY"));
}

#[tokio::test]
async fn incomes_for_month_filters_by_date_range() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    engine
        .create_income("alice@example.com", salary(100.0, "2026-07-31"))
        .await
        .unwrap();
    engine
        .create_income("alice@example.com", salary(200.0, "2026-08-01"))
        .await
        .unwrap();
    engine
        .create_income("alice@example.com", salary(300.0, "2026-08-31"))
        .await
        .unwrap();
    engine
        .create_income("alice@example.com", salary(400.0, "2026-09-01"))
        .await
        .unwrap();

    let incomes = engine
        .incomes_for_month("alice@example.com", "2026-08")
        .await
        .unwrap();
    assert_eq!(incomes.len(), 2);
    assert!(incomes.iter().all(|i| i.date.to_string().starts_with("2026-08")));
}

#[tokio::test]
async fn total_income_sums_a_month_inclusively() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    engine
        .create_income("alice@example.com", salary(100.0, "2026-07-31"))
        .await
        .unwrap();
    engine
        .create_income("alice@example.com", salary(200.0, "2026-08-01"))
        .await
        .unwrap();
    engine
        .create_income("alice@example.com", salary(300.0, "2026-08-31"))
        .await
        .unwrap();

    let total = engine
        .total_income("alice@example.com", Some("2026-08"))
        .await
        .unwrap();
    assert_eq!(total, 500.0);

    let total = engine.total_income("alice@example.com", None).await.unwrap();
    assert_eq!(total, 600.0);
}

#[tokio::test]
async fn total_income_is_zero_without_rows() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    let total = engine
        .total_income("alice@example.com", Some("2026-08"))
        .await
        .unwrap();
    assert_eq!(total, 0.0);
}

#[tokio::test]
async fn incomes_by_type_and_recurring_filters() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    engine
        .create_income("alice@example.com", salary(2500.0, "2026-08-01"))
        .await
        .unwrap();
    engine
        .create_income(
            "alice@example.com",
            IncomeDraft {
                amount: 50.0,
                date: Some("2026-08-10".to_string()),
                income_type: "GIFT".to_string(),
                is_recurring: true,
                recurrence_pattern: Some("YEARLY".to_string()),
            },
        )
        .await
        .unwrap();

    let salaries = engine
        .incomes_by_type("alice@example.com", IncomeType::Salary)
        .await
        .unwrap();
    assert_eq!(salaries.len(), 1);
    assert_eq!(salaries[0].amount, 2500.0);

    let recurring = engine
        .recurring_incomes("alice@example.com")
        .await
        .unwrap();
    assert_eq!(recurring.len(), 1);
    assert_eq!(recurring[0].recurrence_pattern.as_deref(), Some("YEARLY"));
}

#[tokio::test]
async fn update_income_of_another_user_is_forbidden() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;
    signup(&engine, "bob@example.com").await;

    let income = engine
        .create_income("alice@example.com", salary(2500.0, "2026-08-01"))
        .await
        .unwrap();

    let err = engine
        .update_income(income.id, "bob@example.com", salary(1.0, "2026-08-01"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("Not authorized to update this income".to_string())
    );
}

#[tokio::test]
async fn delete_income_checks_ownership() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;
    signup(&engine, "bob@example.com").await;

    let income = engine
        .create_income("alice@example.com", salary(2500.0, "2026-08-01"))
        .await
        .unwrap();

    let err = engine
        .delete_income(income.id, "bob@example.com")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("Not authorized to delete this income".to_string())
    );

    engine
        .delete_income(income.id, "alice@example.com")
        .await
        .unwrap();
    assert!(engine
        .incomes_for_user("alice@example.com")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn invalid_month_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    signup(&engine, "alice@example.com").await;

    let err = engine
        .total_income("alice@example.com", Some("2026-13"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("Invalid month: 2026-13".to_string())
    );
}
