//! SQLite Persistence - 书籍 / 章节仓储实现

mod book_repo;
mod chapter_repo;
mod database;

pub use book_repo::SqliteBookRepository;
pub use chapter_repo::SqliteChapterRepository;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
