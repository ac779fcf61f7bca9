//! Book Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateBook, DeleteBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRecord, BookRepositoryPort};
use crate::domain::book::Title;

// ============================================================================
// CreateBook
// ============================================================================

/// 创建书籍响应
#[derive(Debug, Clone)]
pub struct CreateBookResponse {
    pub id: Uuid,
    pub title: String,
}

/// CreateBook Handler
pub struct CreateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl CreateBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: CreateBook) -> Result<CreateBookResponse, ApplicationError> {
        let title = Title::new(command.title).map_err(ApplicationError::validation)?;

        let now = Utc::now();
        let book = BookRecord {
            id: Uuid::new_v4(),
            title: title.into_string(),
            description: command.description,
            author: command.author,
            isbn: command.isbn,
            publication_date: command.publication_date,
            created_at: now,
            updated_at: now,
        };

        self.book_repo.save(&book).await?;

        tracing::info!(book_id = %book.id, title = %book.title, "Book created");

        Ok(CreateBookResponse {
            id: book.id,
            title: book.title,
        })
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.id))?;

        self.book_repo.delete(book.id).await?;

        tracing::info!(book_id = %book.id, title = %book.title, "Book deleted");

        Ok(())
    }
}
