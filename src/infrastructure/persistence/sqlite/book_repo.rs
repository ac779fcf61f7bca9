//! SQLite Book Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{BookRecord, BookRepositoryPort, RepositoryError};

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    title: String,
    description: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    publication_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BookRow> for BookRecord {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(BookRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            title: row.title,
            description: row.description,
            author: row.author,
            isbn: row.isbn,
            publication_date: row.publication_date,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, description, author, isbn, publication_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                author = excluded.author,
                isbn = excluded.isbn,
                publication_date = excluded.publication_date,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(book.id.to_string())
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.publication_date)
        .bind(book.created_at.to_rfc3339())
        .bind(book.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(
            "SELECT id, title, description, author, isbn, publication_date, created_at, updated_at FROM books WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            "SELECT id, title, description, author, isbn, publication_date, created_at, updated_at FROM books ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::database::create_test_pool;
    use super::*;

    fn sample_book() -> BookRecord {
        let now = Utc::now();
        BookRecord {
            id: Uuid::new_v4(),
            title: "The Hollow Crown".to_string(),
            description: Some("A test book".to_string()),
            author: Some("A. Author".to_string()),
            isbn: Some("978-0-00-000000-0".to_string()),
            publication_date: Some("2024-03-01".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_save_and_find_book() {
        let pool = create_test_pool().await;
        let repo = SqliteBookRepository::new(pool);

        let book = sample_book();
        repo.save(&book).await.unwrap();

        let found = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(found.title, book.title);
        assert_eq!(found.author, book.author);
        assert_eq!(found.isbn, book.isbn);
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let pool = create_test_pool().await;
        let repo = SqliteBookRepository::new(pool);

        let mut book = sample_book();
        repo.save(&book).await.unwrap();

        book.title = "Renamed".to_string();
        repo.save(&book).await.unwrap();

        let found = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Renamed");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let pool = create_test_pool().await;
        let repo = SqliteBookRepository::new(pool);

        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_book() {
        let pool = create_test_pool().await;
        let repo = SqliteBookRepository::new(pool);

        let book = sample_book();
        repo.save(&book).await.unwrap();
        repo.delete(book.id).await.unwrap();

        assert!(repo.find_by_id(book.id).await.unwrap().is_none());
    }
}
