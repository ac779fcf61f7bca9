//! Chapter HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::ChapterRecord;
use crate::application::{
    CreateChapter, DeleteChapter, GetChapter, NextChapterOrder, SaveChapterOrder, UpdateChapter,
};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    pub book_id: Uuid,
    pub title: String,
    pub content: String,
    /// 为空时使用书内下一个顺序号
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct GetChapterRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChapterRequest {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChapterRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct NextChapterOrderRequest {
    pub book_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SaveChapterOrderRequest {
    pub id: Uuid,
    pub order: u32,
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub title: String,
    pub content: String,
    pub order: u32,
    pub audio_url: Option<String>,
    pub created_at: String,
}

impl From<ChapterRecord> for ChapterResponse {
    fn from(chapter: ChapterRecord) -> Self {
        Self {
            id: chapter.id,
            book_id: chapter.book_id,
            title: chapter.title,
            content: chapter.content,
            order: chapter.order,
            audio_url: chapter.audio_url,
            created_at: chapter.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateChapterResponseDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub title: String,
    pub order: u32,
}

#[derive(Debug, Serialize)]
pub struct NextChapterOrderResponse {
    pub next_order: u32,
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建章节
pub async fn create_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateChapterRequest>,
) -> Result<Json<ApiResponse<CreateChapterResponseDto>>, ApiError> {
    let response = state
        .create_chapter_handler
        .handle(CreateChapter {
            book_id: request.book_id,
            title: request.title,
            content: request.content,
            order: request.order,
        })
        .await?;

    Ok(Json(ApiResponse::success(CreateChapterResponseDto {
        id: response.id,
        book_id: response.book_id,
        title: response.title,
        order: response.order,
    })))
}

/// 获取章节详情
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let chapter = state
        .get_chapter_handler
        .handle(GetChapter { id: request.id })
        .await?;

    Ok(Json(ApiResponse::success(chapter.into())))
}

/// 更新章节标题 / 正文
pub async fn update_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateChapterRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .update_chapter_handler
        .handle(UpdateChapter {
            id: request.id,
            title: request.title,
            content: request.content,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 删除章节
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteChapterRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_chapter_handler
        .handle(DeleteChapter { id: request.id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 获取书内下一个章节顺序号
pub async fn next_chapter_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NextChapterOrderRequest>,
) -> Result<Json<ApiResponse<NextChapterOrderResponse>>, ApiError> {
    let next_order = state
        .next_chapter_order_handler
        .handle(NextChapterOrder {
            book_id: request.book_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(NextChapterOrderResponse {
        next_order,
    })))
}

/// 覆盖写章节顺序号
pub async fn save_chapter_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveChapterOrderRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .save_chapter_order_handler
        .handle(SaveChapterOrder {
            id: request.id,
            order: request.order,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
