//! Book / Chapter Queries

use uuid::Uuid;

/// 获取书籍详情
#[derive(Debug, Clone)]
pub struct GetBook {
    pub id: Uuid,
}

/// 列出所有书籍
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 获取章节详情
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub id: Uuid,
}

/// 获取阅读器负载：书籍 + 按顺序排列的全部章节
#[derive(Debug, Clone)]
pub struct GetReaderView {
    pub book_id: Uuid,
}

/// 获取书内下一个章节顺序号
#[derive(Debug, Clone)]
pub struct NextChapterOrder {
    pub book_id: Uuid,
}
