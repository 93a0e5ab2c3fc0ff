use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::BTreeSet;

use crate::domain::{
    CompletionEvent, Habit, HabitSeed, InsertOutcome, NewCompletion, Repository, Totals, User,
};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_date: NaiveDate,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        // ---
        User {
            id: r.id,
            username: r.username,
            password_hash: r.password_hash,
            created_date: r.created_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct HabitRow {
    id: i64,
    name: String,
    description: String,
    carbon_type: String,
    points: i64,
    created_date: NaiveDate,
}

impl From<HabitRow> for Habit {
    fn from(r: HabitRow) -> Self {
        // ---
        Habit {
            id: r.id,
            name: r.name,
            description: r.description,
            carbon_type: r.carbon_type,
            points: r.points,
            created_date: r.created_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    total_points: i64,
    total_carbon_saved: f64,
    completions: i64,
}

pub fn create_sqlite_repository(pool: SqlitePool) -> impl Repository {
    // ---
    SqliteRepository::new(pool)
}

pub struct SqliteRepository {
    // ---
    pool: SqlitePool,
}

impl SqliteRepository {
    // ---
    pub fn new(pool: SqlitePool) -> Self {
        // ---
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    // ---
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait::async_trait]
impl Repository for SqliteRepository {
    // ---
    async fn ping(&self) -> Result<()> {
        // ---
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<InsertOutcome<User>> {
        // ---
        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)
             RETURNING id, username, password_hash, created_date",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Inserted(row.into())),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        // ---
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, created_date FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        // ---
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, created_date FROM users WHERE id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn seed_habits(&self, seeds: &[HabitSeed]) -> Result<u64> {
        // ---
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habits")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        let mut inserted = 0;
        for seed in seeds {
            inserted += sqlx::query(
                "INSERT INTO habits (name, description, carbon_type, points)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&seed.name)
            .bind(&seed.description)
            .bind(&seed.carbon_type)
            .bind(seed.points)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_habits(&self) -> Result<Vec<Habit>> {
        // ---
        let rows = sqlx::query_as::<_, HabitRow>(
            "SELECT id, name, description, carbon_type, points, created_date
             FROM habits ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Habit::from).collect())
    }

    async fn get_habit(&self, habit_id: i64) -> Result<Option<Habit>> {
        // ---
        let row = sqlx::query_as::<_, HabitRow>(
            "SELECT id, name, description, carbon_type, points, created_date
             FROM habits WHERE id = ?1",
        )
        .bind(habit_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Habit::from))
    }

    async fn completion_exists(&self, habit_id: i64, date: NaiveDate) -> Result<bool> {
        // ---
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM completions WHERE habit_id = ?1 AND completed_date = ?2
             )",
        )
        .bind(habit_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists != 0)
    }

    async fn insert_completion(
        &self,
        completion: &NewCompletion,
    ) -> Result<InsertOutcome<CompletionEvent>> {
        // ---
        let result = sqlx::query(
            "INSERT INTO completions (habit_id, completed_date, points_earned, carbon_saved)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(completion.habit_id)
        .bind(completion.completed_date)
        .bind(completion.points_earned)
        .bind(completion.carbon_saved)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(InsertOutcome::Inserted(CompletionEvent {
                id: done.last_insert_rowid(),
                habit_id: completion.habit_id,
                completed_date: completion.completed_date,
                points_earned: completion.points_earned,
                carbon_saved: completion.carbon_saved,
            })),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Duplicate),
            Err(err) => Err(err.into()),
        }
    }

    async fn completed_habit_ids_on(&self, date: NaiveDate) -> Result<Vec<i64>> {
        // ---
        let ids = sqlx::query_scalar(
            "SELECT DISTINCT habit_id FROM completions WHERE completed_date = ?1 ORDER BY habit_id",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn completion_dates(&self) -> Result<BTreeSet<NaiveDate>> {
        // ---
        let dates: Vec<NaiveDate> =
            sqlx::query_scalar("SELECT DISTINCT completed_date FROM completions")
                .fetch_all(&self.pool)
                .await?;

        Ok(dates.into_iter().collect())
    }

    async fn totals(&self) -> Result<Totals> {
        // ---
        let row = sqlx::query_as::<_, TotalsRow>(
            "SELECT COALESCE(SUM(points_earned), 0)   AS total_points,
                    COALESCE(SUM(carbon_saved), 0.0)  AS total_carbon_saved,
                    COUNT(*)                          AS completions
             FROM completions",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Totals {
            total_points: row.total_points,
            total_carbon_saved: row.total_carbon_saved,
            completions: row.completions,
        })
    }
}
