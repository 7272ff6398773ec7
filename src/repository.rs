use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::warn;

use crate::error::{InvalidCourse, RepositoryError};
use crate::models::Course;

/// Storage contract for courses. Implementable against any backing store;
/// consumers hold it as `Arc<dyn CourseRepository>`.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Upsert by id: inserts if absent, overwrites all fields (notes
    /// included) if present. Exactly one row ever exists per id.
    async fn save_course(&self, course: &Course) -> Result<(), RepositoryError>;

    /// Owned snapshot of every stored course, empty when none exist.
    async fn get_all_courses(&self) -> Result<Vec<Course>, RepositoryError>;

    /// Sets or replaces the notes of the identified course. An unknown id
    /// is a logged no-op; blank notes are rejected.
    async fn add_notes(&self, id: &str, notes: &str) -> Result<(), RepositoryError>;
}

pub struct SqliteCourseRepository {
    pool: SqlitePool,
}

impl SqliteCourseRepository {
    /// Opens the database file, creating it and the schema if absent.
    pub async fn open(database_file: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::new()
            .filename(database_file)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::new("failed to open course database", e))?;

        Self::from_pool(pool).await
    }

    /// Single-connection in-memory store, schema included.
    pub async fn in_memory() -> Result<Self, RepositoryError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepositoryError::new("failed to open in-memory course database", e))?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| RepositoryError::new("failed to run course database migrations", e))?;

        Ok(Self { pool })
    }
}

fn course_from_row(row: &SqliteRow) -> Result<Course, RepositoryError> {
    fn read_err(e: sqlx::Error) -> RepositoryError {
        RepositoryError::new("failed to read course row", e)
    }

    // Columns are read by name, never by position, so the mapping survives
    // schema evolution.
    let id: String = row.try_get("id").map_err(read_err)?;
    let name: String = row.try_get("name").map_err(read_err)?;
    let length: i64 = row.try_get("length").map_err(read_err)?;
    let url: String = row.try_get("url").map_err(read_err)?;
    let notes: Option<String> = row.try_get("notes").map_err(read_err)?;

    Course::new(id, name, length, url, notes)
        .map_err(|e| RepositoryError::new("stored course violates domain rules", e))
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn save_course(&self, course: &Course) -> Result<(), RepositoryError> {
        // One atomic statement, never select-then-branch.
        sqlx::query(
            r#"
            INSERT INTO courses (id, name, length, url, notes)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                length = excluded.length,
                url = excluded.url,
                notes = excluded.notes
            "#,
        )
        .bind(course.id())
        .bind(course.name())
        .bind(course.length())
        .bind(course.url())
        .bind(course.notes())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::new(format!("failed to save course {}", course.id()), e))?;

        Ok(())
    }

    async fn get_all_courses(&self) -> Result<Vec<Course>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, length, url, notes FROM courses ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::new("failed to load courses", e))?;

        let mut courses = Vec::with_capacity(rows.len());
        for row in &rows {
            courses.push(course_from_row(row)?);
        }
        Ok(courses)
    }

    async fn add_notes(&self, id: &str, notes: &str) -> Result<(), RepositoryError> {
        if notes.trim().is_empty() {
            // A blank-notes row could never be read back through
            // `Course::new`.
            return Err(RepositoryError::new(
                format!("refusing to store blank notes for course {id}"),
                InvalidCourse::BlankNotes,
            ));
        }

        let result = sqlx::query("UPDATE courses SET notes = ? WHERE id = ?")
            .bind(notes)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::new(format!("failed to update notes for {id}"), e))?;

        if result.rows_affected() == 0 {
            warn!("no course with id {} to annotate", id);
        }
        Ok(())
    }
}
