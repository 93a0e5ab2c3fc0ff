use super::sqlite_repository::*;
use crate::config::DatabaseConfig;
use crate::domain::{HabitCatalog, HabitSeed, InsertOutcome, NewCompletion, Repository};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::runtime::Runtime;

// One runtime to rule them all...
/// Shared tokio runtime for all database tests, so pools created by one test
/// are never tied to a runtime that has already shut down.
static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    // ---
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create TOKIO runtime")
});

// Initialize tracing once for all tests
static TRACING_INIT: std::sync::Once = std::sync::Once::new();

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

fn init_tracing() {
    // ---
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_ansi(false) // No colorization, makes logs easier to read.
            .with_test_writer()
            .init();
    });
}

fn temp_db_path() -> PathBuf {
    // ---
    let n = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "green_habits_repo_{}_{}.db",
        std::process::id(),
        n
    ))
}

async fn setup_repo() -> SqliteRepository {
    // ---
    init_tracing();

    let path = temp_db_path();
    let _ = std::fs::remove_file(&path);

    let pool = super::init_database_with_retry(&DatabaseConfig::for_path(&path))
        .await
        .expect("database init failed");

    SqliteRepository::new(pool)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn completion(habit_id: i64, date: NaiveDate, points: i64, carbon: f64) -> NewCompletion {
    NewCompletion {
        habit_id,
        completed_date: date,
        points_earned: points,
        carbon_saved: carbon,
    }
}

#[test]
fn test_create_and_get_user() {
    // ---
    RUNTIME.block_on(async {
        // ---
        let repo = setup_repo().await;

        let user = match repo.create_user("alice", "hash").await.unwrap() {
            InsertOutcome::Inserted(user) => user,
            InsertOutcome::Duplicate => panic!("fresh user reported as duplicate"),
        };
        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "hash");

        let found = repo
            .get_user_by_username("alice")
            .await
            .unwrap()
            .expect("User not found");
        assert_eq!(found.id, user.id);

        let by_id = repo
            .get_user_by_id(user.id)
            .await
            .unwrap()
            .expect("User not found by ID");
        assert_eq!(by_id.username, "alice");

        assert!(repo.get_user_by_username("nobody").await.unwrap().is_none());
        assert!(repo.get_user_by_id(user.id + 100).await.unwrap().is_none());
    });
}

#[test]
fn test_username_must_be_unique() {
    // ---
    RUNTIME.block_on(async {
        // ---
        let repo = setup_repo().await;

        let first = repo.create_user("bob", "h1").await.unwrap();
        assert!(matches!(first, InsertOutcome::Inserted(_)));

        let second = repo.create_user("bob", "h2").await.unwrap();
        assert_eq!(second, InsertOutcome::Duplicate);

        // The original credential is untouched
        let stored = repo.get_user_by_username("bob").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "h1");
    });
}

#[test]
fn test_seed_habits_only_once() {
    // ---
    RUNTIME.block_on(async {
        // ---
        let repo = setup_repo().await;
        let catalog = HabitCatalog::default();

        assert_eq!(repo.seed_habits(catalog.habits()).await.unwrap(), 6);
        assert_eq!(repo.seed_habits(catalog.habits()).await.unwrap(), 0);

        let habits = repo.list_habits().await.unwrap();
        assert_eq!(habits.len(), 6);
        assert_eq!(habits[0].name, "Bike instead of driving");
        assert_eq!(habits[0].points, 15);
        assert_eq!(habits[5].carbon_type, "plant_based_meal");

        let habit = repo.get_habit(habits[1].id).await.unwrap().unwrap();
        assert_eq!(habit.name, "Use reusable water bottle");
        assert!(repo.get_habit(9_999).await.unwrap().is_none());
    });
}

#[test]
fn test_completion_unique_per_habit_and_day() {
    // ---
    RUNTIME.block_on(async {
        // ---
        let repo = setup_repo().await;
        repo.seed_habits(&[HabitSeed::new("Compost", "", "compost", 5)])
            .await
            .unwrap();
        let habit_id = repo.list_habits().await.unwrap()[0].id;
        let today = day(2024, 1, 10);

        assert!(!repo.completion_exists(habit_id, today).await.unwrap());

        let first = repo
            .insert_completion(&completion(habit_id, today, 5, 0.3))
            .await
            .unwrap();
        assert!(matches!(first, InsertOutcome::Inserted(_)));
        assert!(repo.completion_exists(habit_id, today).await.unwrap());

        let again = repo
            .insert_completion(&completion(habit_id, today, 5, 0.3))
            .await
            .unwrap();
        assert_eq!(again, InsertOutcome::Duplicate);

        // A different day is a different event
        let tomorrow = day(2024, 1, 11);
        let next = repo
            .insert_completion(&completion(habit_id, tomorrow, 5, 0.3))
            .await
            .unwrap();
        assert!(matches!(next, InsertOutcome::Inserted(_)));

        assert_eq!(repo.totals().await.unwrap().completions, 2);
    });
}

#[test]
fn test_totals_dates_and_today_ids() {
    // ---
    RUNTIME.block_on(async {
        // ---
        let repo = setup_repo().await;

        let empty = repo.totals().await.unwrap();
        assert_eq!(empty.total_points, 0);
        assert_eq!(empty.total_carbon_saved, 0.0);
        assert_eq!(empty.completions, 0);
        assert!(repo.completion_dates().await.unwrap().is_empty());

        repo.seed_habits(HabitCatalog::default().habits())
            .await
            .unwrap();
        let habits = repo.list_habits().await.unwrap();

        repo.insert_completion(&completion(habits[0].id, day(2024, 1, 9), 15, 2.3))
            .await
            .unwrap();
        repo.insert_completion(&completion(habits[0].id, day(2024, 1, 10), 15, 2.3))
            .await
            .unwrap();
        repo.insert_completion(&completion(habits[2].id, day(2024, 1, 10), 12, 0.8))
            .await
            .unwrap();

        let totals = repo.totals().await.unwrap();
        assert_eq!(totals.total_points, 42);
        assert_eq!(totals.rounded_carbon(), 5.4);
        assert_eq!(totals.completions, 3);

        let dates = repo.completion_dates().await.unwrap();
        assert_eq!(
            dates.into_iter().collect::<Vec<_>>(),
            vec![day(2024, 1, 9), day(2024, 1, 10)]
        );

        let ids = repo.completed_habit_ids_on(day(2024, 1, 10)).await.unwrap();
        assert_eq!(ids, vec![habits[0].id, habits[2].id]);
        assert!(repo
            .completed_habit_ids_on(day(2024, 1, 8))
            .await
            .unwrap()
            .is_empty());
    });
}

#[test]
fn test_migrations_are_idempotent() {
    // ---
    RUNTIME.block_on(async {
        // ---
        init_tracing();
        let path = temp_db_path();
        let config = DatabaseConfig::for_path(&path);

        let pool = super::init_database(&config).await.unwrap();
        let repo = create_sqlite_repository(pool.clone());
        repo.create_user("carol", "h").await.unwrap();
        pool.close().await;

        // Reopening the same file keeps the data
        let pool = super::init_database(&config).await.unwrap();
        let repo = create_sqlite_repository(pool);
        assert!(repo.get_user_by_username("carol").await.unwrap().is_some());
        repo.ping().await.unwrap();
    });
}
