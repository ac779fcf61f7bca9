//! Command Handlers

mod book_handlers;
mod chapter_handlers;
mod conversion_handlers;

pub use book_handlers::{CreateBookHandler, CreateBookResponse, DeleteBookHandler};
pub use chapter_handlers::{
    CreateChapterHandler, CreateChapterResponse, DeleteChapterHandler, SaveChapterOrderHandler,
    UpdateChapterHandler,
};
pub use conversion_handlers::{
    ConversionError, ConvertChapterHandler, ConvertChapterResponse, RetryPolicy, SpeechSettings,
};
