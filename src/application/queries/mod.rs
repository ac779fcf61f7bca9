//! Application Queries

mod book_queries;

pub mod handlers;

pub use book_queries::{GetBook, GetChapter, GetReaderView, ListBooks, NextChapterOrder};
