//! Chapter Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRecord, BookRepositoryPort, ChapterRecord, ChapterRepositoryPort,
};
use crate::application::queries::{GetChapter, GetReaderView, NextChapterOrder};
use crate::domain::book::ChapterOrder;

/// GetChapter Handler
pub struct GetChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl GetChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<ChapterRecord, ApplicationError> {
        self.chapter_repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", query.id))
    }
}

// ============================================================================
// ReaderView
// ============================================================================

/// 阅读器负载：书籍 + 按顺序排列的章节
///
/// 前端滑动阅读器渲染所需的全部数据
#[derive(Debug, Clone)]
pub struct ReaderView {
    pub book: BookRecord,
    pub chapters: Vec<ChapterRecord>,
}

/// GetReaderView Handler
pub struct ReaderViewHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl ReaderViewHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
        }
    }

    pub async fn handle(&self, query: GetReaderView) -> Result<ReaderView, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let chapters = self.chapter_repo.find_by_book_ordered(book.id).await?;

        Ok(ReaderView { book, chapters })
    }
}

// ============================================================================
// NextChapterOrder
// ============================================================================

/// NextChapterOrder Handler
///
/// 下一个默认顺序号 = 书内章节数 + 1。删除中间章节后可能产生
/// 重复顺序号，与原始行为一致，不做修正
pub struct NextChapterOrderHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl NextChapterOrderHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
        }
    }

    pub async fn handle(&self, query: NextChapterOrder) -> Result<u32, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let count = self.chapter_repo.count_by_book(book.id).await?;

        Ok(ChapterOrder::next_after(count).value())
    }
}
