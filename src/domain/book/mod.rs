//! Book Context - 书籍与章节管理上下文

mod value_objects;

pub use value_objects::{ChapterOrder, Title};
