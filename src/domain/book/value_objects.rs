//! Book Context - Value Objects

use serde::{Deserialize, Serialize};

/// 书籍 / 章节标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Result<Self, &'static str> {
        let title = title.into();
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err("Title cannot be empty");
        }
        if title.chars().count() > 200 {
            return Err("Title cannot exceed 200 characters");
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节顺序号
///
/// 不变量: 从 1 开始。同一本书内期望唯一，但与原始数据一致，不强制
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChapterOrder(u32);

impl ChapterOrder {
    pub fn new(order: u32) -> Result<Self, &'static str> {
        if order == 0 {
            return Err("Chapter order starts at 1");
        }
        Ok(Self(order))
    }

    /// 第一个章节的顺序号
    pub fn first() -> Self {
        Self(1)
    }

    /// 已有 count 个章节时，下一个章节的默认顺序号
    pub fn next_after(count: usize) -> Self {
        Self(count as u32 + 1)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ChapterOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_trims_and_validates() {
        let title = Title::new("  The Hollow Crown  ").unwrap();
        assert_eq!(title.as_str(), "The Hollow Crown");

        assert!(Title::new("").is_err());
        assert!(Title::new("   ").is_err());
        assert!(Title::new("x".repeat(201)).is_err());
    }

    #[test]
    fn test_chapter_order_starts_at_one() {
        assert!(ChapterOrder::new(0).is_err());
        assert_eq!(ChapterOrder::new(3).unwrap().value(), 3);
        assert_eq!(ChapterOrder::first().value(), 1);
    }

    #[test]
    fn test_next_after_count() {
        assert_eq!(ChapterOrder::next_after(0).value(), 1);
        assert_eq!(ChapterOrder::next_after(4).value(), 5);
    }
}
