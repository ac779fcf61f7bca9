//! Domain Layer - 领域层
//!
//! - Book Context: 书籍与章节管理
//! - narration: 章节正文 → 朗读纯文本提取

pub mod book;

mod narration;

pub use narration::{extract_narration, NarrationError};
