//! Book Commands

use uuid::Uuid;

/// 创建书籍
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
}

/// 删除书籍（连带章节）
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub id: Uuid,
}
