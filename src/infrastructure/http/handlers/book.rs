//! Book HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::BookRecord;
use crate::application::{CreateBook, DeleteBook, GetBook, GetReaderView, ListBooks};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::chapter::ChapterResponse;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetBookRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReaderViewRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub created_at: String,
}

impl From<BookRecord> for BookResponse {
    fn from(book: BookRecord) -> Self {
        Self {
            id: book.id,
            title: book.title,
            description: book.description,
            author: book.author,
            isbn: book.isbn,
            publication_date: book.publication_date,
            created_at: book.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateBookResponseDto {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub books: Vec<BookResponse>,
}

/// 阅读器负载：书籍 + 按顺序排列的章节
#[derive(Debug, Serialize)]
pub struct ReaderViewResponse {
    pub book: BookResponse,
    pub total_chapters: usize,
    pub chapters: Vec<ChapterResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建书籍
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBookRequest>,
) -> Result<Json<ApiResponse<CreateBookResponseDto>>, ApiError> {
    let response = state
        .create_book_handler
        .handle(CreateBook {
            title: request.title,
            description: request.description,
            author: request.author,
            isbn: request.isbn,
            publication_date: request.publication_date,
        })
        .await?;

    Ok(Json(ApiResponse::success(CreateBookResponseDto {
        id: response.id,
        title: response.title,
    })))
}

/// 获取书籍详情
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetBookRequest>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let book = state.get_book_handler.handle(GetBook { id: request.id }).await?;

    Ok(Json(ApiResponse::success(book.into())))
}

/// 列出所有书籍
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<BookListResponse>>, ApiError> {
    let books = state.list_books_handler.handle(ListBooks).await?;

    Ok(Json(ApiResponse::success(BookListResponse {
        books: books.into_iter().map(BookResponse::from).collect(),
    })))
}

/// 删除书籍（连带章节）
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteBookRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_book_handler
        .handle(DeleteBook { id: request.id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 阅读器负载：书籍 + 按顺序排列的全部章节
pub async fn reader_view(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReaderViewRequest>,
) -> Result<Json<ApiResponse<ReaderViewResponse>>, ApiError> {
    let view = state
        .reader_view_handler
        .handle(GetReaderView {
            book_id: request.id,
        })
        .await?;

    Ok(Json(ApiResponse::success(ReaderViewResponse {
        book: view.book.into(),
        total_chapters: view.chapters.len(),
        chapters: view.chapters.into_iter().map(ChapterResponse::from).collect(),
    })))
}
