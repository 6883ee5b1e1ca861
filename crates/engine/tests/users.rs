use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, IncomeDraft, users};
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

#[tokio::test]
async fn signup_stores_hash_and_assigns_user_role() {
    let (engine, _db) = engine_with_db().await;

    let user = engine
        .signup("Alice", "alice@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.username, "alice@example.com");
    assert_eq!(user.role, users::ROLE_USER);
    assert_ne!(user.password_hash, "secret");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn signup_grants_admin_role_when_email_contains_admin() {
    let (engine, _db) = engine_with_db().await;

    let user = engine
        .signup("Root", "Admin@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(user.role, users::ROLE_ADMIN);

    let user = engine
        .signup("Middle", "badminton@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(user.role, users::ROLE_ADMIN);
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let (engine, _db) = engine_with_db().await;

    engine
        .signup("Alice", "alice@example.com", "secret")
        .await
        .unwrap();

    let err = engine
        .signup("Other", "alice@example.com", "different")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("Email already exists".to_string())
    );
}

#[tokio::test]
async fn signup_rejects_blank_fields() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.signup("  ", "alice@example.com", "secret").await;
    assert_eq!(
        err.unwrap_err(),
        EngineError::Validation("Name is required".to_string())
    );

    let err = engine.signup("Alice", "", "secret").await;
    assert_eq!(
        err.unwrap_err(),
        EngineError::Validation("Email is required".to_string())
    );

    let err = engine.signup("Alice", "alice@example.com", "   ").await;
    assert_eq!(
        err.unwrap_err(),
        EngineError::Validation("Password is required".to_string())
    );
}

#[tokio::test]
async fn login_accepts_correct_password() {
    let (engine, _db) = engine_with_db().await;

    engine
        .signup("Alice", "alice@example.com", "secret")
        .await
        .unwrap();

    let user = engine.login("alice@example.com", "secret").await.unwrap();
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email_identically() {
    let (engine, _db) = engine_with_db().await;

    engine
        .signup("Alice", "alice@example.com", "secret")
        .await
        .unwrap();

    let wrong = engine
        .login("alice@example.com", "not-the-password")
        .await
        .unwrap_err();
    let unknown = engine
        .login("nobody@example.com", "secret")
        .await
        .unwrap_err();

    assert_eq!(
        wrong,
        EngineError::Validation("Invalid credentials".to_string())
    );
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn profile_unknown_email_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.profile("nobody@example.com").await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("User".to_string()));
}

#[tokio::test]
async fn delete_user_cascades_to_owned_rows() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();

    let user = engine
        .signup("Alice", "alice@example.com", "secret")
        .await
        .unwrap();
    engine
        .create_expense("alice@example.com", "Groceries", 42.0, "Food")
        .await
        .unwrap();
    engine
        .create_income(
            "alice@example.com",
            IncomeDraft {
                amount: 2500.0,
                date: Some("2026-08-01".to_string()),
                income_type: "SALARY".to_string(),
                is_recurring: false,
                recurrence_pattern: None,
            },
        )
        .await
        .unwrap();
    engine
        .upsert_budget("alice@example.com", "Food", 300.0, "2026-08")
        .await
        .unwrap();

    engine.delete_user(user.id).await.unwrap();

    let err = engine
        .expenses_for_user("alice@example.com")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::UserNotFound);

    // Every owned row went with the user.
    for table in ["expenses", "incomes", "budgets"] {
        let row = db
            .query_one(Statement::from_string(
                backend,
                format!("SELECT COUNT(*) AS n FROM {table}"),
            ))
            .await
            .unwrap()
            .unwrap();
        let remaining: i64 = row.try_get("", "n").unwrap();
        assert_eq!(remaining, 0, "{table} rows survived the delete");
    }

    let stats = engine.system_stats().await.unwrap();
    assert_eq!(stats.total_users, 0);
    assert_eq!(stats.total_expenses, 0);
    assert_eq!(stats.total_incomes, 0);
}

#[tokio::test]
async fn system_stats_counts_active_users() {
    let (engine, _db) = engine_with_db().await;

    engine
        .signup("Alice", "alice@example.com", "secret")
        .await
        .unwrap();
    engine
        .signup("Bob", "bob@example.com", "secret")
        .await
        .unwrap();
    engine
        .create_expense("alice@example.com", "Groceries", 42.0, "Food")
        .await
        .unwrap();

    let stats = engine.system_stats().await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_expenses, 1);
    assert_eq!(stats.total_incomes, 0);
    assert_eq!(stats.active_users, 1);
}
