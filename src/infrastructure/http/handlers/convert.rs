//! Conversion HTTP Handler - 章节音频生成
//!
//! 同步处理：请求在合成完成（或失败）前保持阻塞，
//! 最长等待为合成客户端的超时时间

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ConvertChapterAudio;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConvertChapterRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ConvertChapterResponseDto {
    pub chapter_id: Uuid,
    /// 新生成制品的公开 URL
    pub audio_url: String,
    pub message: String,
}

/// 将章节正文转换为朗读音频
pub async fn convert_chapter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConvertChapterRequest>,
) -> Result<Json<ApiResponse<ConvertChapterResponseDto>>, ApiError> {
    let response = state
        .convert_chapter_handler
        .handle(ConvertChapterAudio {
            chapter_id: request.id,
        })
        .await?;

    Ok(Json(ApiResponse::success(ConvertChapterResponseDto {
        chapter_id: response.chapter_id,
        audio_url: response.audio_url,
        message: "Audio generated successfully!".to_string(),
    })))
}
