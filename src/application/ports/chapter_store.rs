//! Chapter Store Ports - 出站端口
//!
//! 定义书籍 / 章节数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）
//!
//! 每个写操作独立且可重放（同值重放幂等），不假设事务

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Book Repository
// ============================================================================

/// 书籍实体（用于持久化）
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存书籍（插入或更新）
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找书籍
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookRecord>, RepositoryError>;

    /// 获取所有书籍
    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 删除书籍（连带删除其章节）
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// 章节实体（用于持久化）
///
/// `audio_url` 只由音频转换用例写入；非空时指向一个写入时已通过
/// 音频校验的文件
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    pub id: Uuid,
    pub book_id: Uuid,
    pub title: String,
    /// 富文本（HTML）正文
    pub content: String,
    /// 在所属书籍内的阅读顺序（从 1 开始）
    pub order: u32,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chapter Repository Port
#[async_trait]
pub trait ChapterRepositoryPort: Send + Sync {
    /// 保存章节（插入或更新）
    async fn save(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找章节
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 获取书籍的所有章节，按顺序号升序
    async fn find_by_book_ordered(
        &self,
        book_id: Uuid,
    ) -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 统计书籍的章节数
    async fn count_by_book(&self, book_id: Uuid) -> Result<usize, RepositoryError>;

    /// 更新章节顺序号
    async fn update_order(&self, id: Uuid, order: u32) -> Result<(), RepositoryError>;

    /// 更新章节的音频引用
    async fn set_audio_url(&self, id: Uuid, audio_url: &str) -> Result<(), RepositoryError>;

    /// 删除章节
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
