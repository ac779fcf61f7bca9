//! Chapter Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateChapter, DeleteChapter, SaveChapterOrder, UpdateChapter};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRepositoryPort, ChapterRecord, ChapterRepositoryPort,
};
use crate::domain::book::{ChapterOrder, Title};

// ============================================================================
// CreateChapter
// ============================================================================

/// 创建章节响应
#[derive(Debug, Clone)]
pub struct CreateChapterResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub title: String,
    pub order: u32,
}

/// CreateChapter Handler
///
/// 顺序号未指定时取书内下一个默认值（章节数 + 1）
pub struct CreateChapterHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl CreateChapterHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
        }
    }

    pub async fn handle(
        &self,
        command: CreateChapter,
    ) -> Result<CreateChapterResponse, ApplicationError> {
        // 章节必须挂在已存在的书下
        let book = self
            .book_repo
            .find_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.book_id))?;

        let title = Title::new(command.title).map_err(ApplicationError::validation)?;

        let order = match command.order {
            Some(order) => ChapterOrder::new(order).map_err(ApplicationError::validation)?,
            None => {
                let count = self.chapter_repo.count_by_book(book.id).await?;
                ChapterOrder::next_after(count)
            }
        };

        let now = Utc::now();
        let chapter = ChapterRecord {
            id: Uuid::new_v4(),
            book_id: book.id,
            title: title.into_string(),
            content: command.content,
            order: order.value(),
            audio_url: None,
            created_at: now,
            updated_at: now,
        };

        self.chapter_repo.save(&chapter).await?;

        tracing::info!(
            chapter_id = %chapter.id,
            book_id = %book.id,
            order = chapter.order,
            "Chapter created"
        );

        Ok(CreateChapterResponse {
            id: chapter.id,
            book_id: chapter.book_id,
            title: chapter.title,
            order: chapter.order,
        })
    }
}

// ============================================================================
// UpdateChapter
// ============================================================================

/// UpdateChapter Handler
pub struct UpdateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl UpdateChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, command: UpdateChapter) -> Result<(), ApplicationError> {
        let mut chapter = self
            .chapter_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.id))?;

        if let Some(title) = command.title {
            let title = Title::new(title).map_err(ApplicationError::validation)?;
            chapter.title = title.into_string();
        }
        if let Some(content) = command.content {
            chapter.content = content;
        }
        chapter.updated_at = Utc::now();

        self.chapter_repo.save(&chapter).await?;

        tracing::info!(chapter_id = %chapter.id, "Chapter updated");

        Ok(())
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// DeleteChapter Handler
///
/// 只删除章节记录；已生成的音频文件留在存储上（与音频引用的
/// 生命周期一致，见 AudioStoragePort 的说明）
pub struct DeleteChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl DeleteChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, command: DeleteChapter) -> Result<(), ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.id))?;

        self.chapter_repo.delete(chapter.id).await?;

        tracing::info!(chapter_id = %chapter.id, "Chapter deleted");

        Ok(())
    }
}

// ============================================================================
// SaveChapterOrder
// ============================================================================

/// SaveChapterOrder Handler
///
/// 同值重放幂等；不校验书内唯一性（与原始行为一致）
pub struct SaveChapterOrderHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl SaveChapterOrderHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, command: SaveChapterOrder) -> Result<(), ApplicationError> {
        let order = ChapterOrder::new(command.order).map_err(ApplicationError::validation)?;

        let chapter = self
            .chapter_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.id))?;

        self.chapter_repo.update_order(chapter.id, order.value()).await?;

        tracing::info!(chapter_id = %chapter.id, order = order.value(), "Chapter order saved");

        Ok(())
    }
}
