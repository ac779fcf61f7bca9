//! SQLite Chapter Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::book_repo::parse_timestamp;
use super::DbPool;
use crate::application::ports::{ChapterRecord, ChapterRepositoryPort, RepositoryError};

/// SQLite Chapter Repository
pub struct SqliteChapterRepository {
    pool: DbPool,
}

impl SqliteChapterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    book_id: String,
    title: String,
    content: String,
    chapter_order: i64,
    audio_url: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(ChapterRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            book_id: Uuid::parse_str(&row.book_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            title: row.title,
            content: row.content,
            order: row.chapter_order as u32,
            audio_url: row.audio_url,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl ChapterRepositoryPort for SqliteChapterRepository {
    async fn save(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chapters (id, book_id, title, content, chapter_order, audio_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                chapter_order = excluded.chapter_order,
                audio_url = excluded.audio_url,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(chapter.id.to_string())
        .bind(chapter.book_id.to_string())
        .bind(&chapter.title)
        .bind(&chapter.content)
        .bind(chapter.order as i64)
        .bind(&chapter.audio_url)
        .bind(chapter.created_at.to_rfc3339())
        .bind(chapter.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChapterRecord>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            "SELECT id, book_id, title, content, chapter_order, audio_url, created_at, updated_at FROM chapters WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn find_by_book_ordered(
        &self,
        book_id: Uuid,
    ) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT id, book_id, title, content, chapter_order, audio_url, created_at, updated_at FROM chapters WHERE book_id = ? ORDER BY chapter_order ASC, created_at ASC",
        )
        .bind(book_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn count_by_book(&self, book_id: Uuid) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chapters WHERE book_id = ?")
            .bind(book_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(count as usize)
    }

    async fn update_order(&self, id: Uuid, order: u32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE chapters SET chapter_order = ?, updated_at = ? WHERE id = ?",
        )
        .bind(order as i64)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn set_audio_url(&self, id: Uuid, audio_url: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE chapters SET audio_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(audio_url)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM chapters WHERE id = ?")
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
    use super::super::SqliteBookRepository;
    use super::*;
    use crate::application::ports::{BookRecord, BookRepositoryPort};

    async fn seeded_book(pool: &DbPool) -> Uuid {
        let now = Utc::now();
        let book = BookRecord {
            id: Uuid::new_v4(),
            title: "Book".to_string(),
            description: None,
            author: None,
            isbn: None,
            publication_date: None,
            created_at: now,
            updated_at: now,
        };
        SqliteBookRepository::new(pool.clone())
            .save(&book)
            .await
            .unwrap();
        book.id
    }

    fn chapter(book_id: Uuid, order: u32, title: &str) -> ChapterRecord {
        let now = Utc::now();
        ChapterRecord {
            id: Uuid::new_v4(),
            book_id,
            title: title.to_string(),
            content: format!("<p>{}</p>", title),
            order,
            audio_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_save_and_find_chapter() {
        let pool = create_test_pool().await;
        let book_id = seeded_book(&pool).await;
        let repo = SqliteChapterRepository::new(pool);

        let record = chapter(book_id, 1, "One");
        repo.save(&record).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.title, "One");
        assert_eq!(found.order, 1);
        assert_eq!(found.audio_url, None);
    }

    #[tokio::test]
    async fn test_find_by_book_ordered() {
        let pool = create_test_pool().await;
        let book_id = seeded_book(&pool).await;
        let repo = SqliteChapterRepository::new(pool);

        // 乱序插入
        repo.save(&chapter(book_id, 3, "Three")).await.unwrap();
        repo.save(&chapter(book_id, 1, "One")).await.unwrap();
        repo.save(&chapter(book_id, 2, "Two")).await.unwrap();

        let chapters = repo.find_by_book_ordered(book_id).await.unwrap();
        let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn test_count_by_book() {
        let pool = create_test_pool().await;
        let book_id = seeded_book(&pool).await;
        let other_book = seeded_book(&pool).await;
        let repo = SqliteChapterRepository::new(pool);

        repo.save(&chapter(book_id, 1, "One")).await.unwrap();
        repo.save(&chapter(book_id, 2, "Two")).await.unwrap();
        repo.save(&chapter(other_book, 1, "Other")).await.unwrap();

        assert_eq!(repo.count_by_book(book_id).await.unwrap(), 2);
        assert_eq!(repo.count_by_book(other_book).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_order_is_idempotent() {
        let pool = create_test_pool().await;
        let book_id = seeded_book(&pool).await;
        let repo = SqliteChapterRepository::new(pool);

        let record = chapter(book_id, 1, "One");
        repo.save(&record).await.unwrap();

        repo.update_order(record.id, 5).await.unwrap();
        repo.update_order(record.id, 5).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.order, 5);
    }

    #[tokio::test]
    async fn test_update_order_missing_chapter() {
        let pool = create_test_pool().await;
        let repo = SqliteChapterRepository::new(pool);

        let result = repo.update_order(Uuid::new_v4(), 1).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_audio_url() {
        let pool = create_test_pool().await;
        let book_id = seeded_book(&pool).await;
        let repo = SqliteChapterRepository::new(pool);

        let record = chapter(book_id, 1, "One");
        repo.save(&record).await.unwrap();

        let url = format!("http://localhost:5080/media/chapter-{}-123.mp3", record.id);
        repo.set_audio_url(record.id, &url).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.audio_url, Some(url));
    }

    #[tokio::test]
    async fn test_deleting_book_cascades_to_chapters() {
        let pool = create_test_pool().await;
        let book_id = seeded_book(&pool).await;
        let book_repo = SqliteBookRepository::new(pool.clone());
        let repo = SqliteChapterRepository::new(pool);

        let record = chapter(book_id, 1, "One");
        repo.save(&record).await.unwrap();

        book_repo.delete(book_id).await.unwrap();

        assert!(repo.find_by_id(record.id).await.unwrap().is_none());
    }
}
