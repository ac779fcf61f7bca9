//! Chapter Commands

use uuid::Uuid;

/// 创建章节
///
/// `order` 为空时使用书内下一个顺序号（章节数 + 1）
#[derive(Debug, Clone)]
pub struct CreateChapter {
    pub book_id: Uuid,
    pub title: String,
    pub content: String,
    pub order: Option<u32>,
}

/// 更新章节标题 / 正文
#[derive(Debug, Clone)]
pub struct UpdateChapter {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// 删除章节
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub id: Uuid,
}

/// 覆盖写一个章节的顺序号
#[derive(Debug, Clone)]
pub struct SaveChapterOrder {
    pub id: Uuid,
    pub order: u32,
}
