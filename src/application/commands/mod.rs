//! Application Commands

mod book_commands;
mod chapter_commands;
mod conversion_commands;

pub mod handlers;

pub use book_commands::{CreateBook, DeleteBook};
pub use chapter_commands::{CreateChapter, DeleteChapter, SaveChapterOrder, UpdateChapter};
pub use conversion_commands::ConvertChapterAudio;
