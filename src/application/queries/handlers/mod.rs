//! Query Handlers

mod book_handlers;
mod chapter_handlers;

pub use book_handlers::{GetBookHandler, ListBooksHandler};
pub use chapter_handlers::{
    GetChapterHandler, NextChapterOrderHandler, ReaderView, ReaderViewHandler,
};
