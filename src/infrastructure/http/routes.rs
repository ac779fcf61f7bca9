//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                  GET   健康检查
//! - /api/book/create           POST  创建书籍
//! - /api/book/get              POST  获取书籍详情
//! - /api/book/list             GET   列出所有书籍
//! - /api/book/delete           POST  删除书籍（连带章节）
//! - /api/book/reader           POST  阅读器负载（书籍 + 有序章节）
//! - /api/chapter/create        POST  创建章节
//! - /api/chapter/get           POST  获取章节详情
//! - /api/chapter/update        POST  更新章节标题/正文
//! - /api/chapter/delete        POST  删除章节
//! - /api/chapter/next_order    POST  书内下一个顺序号
//! - /api/chapter/save_order    POST  覆盖写章节顺序号
//! - /api/chapter/convert       POST  章节正文 → 朗读音频
//! - /media/<file>              GET   音频制品下载（静态文件）

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(media_dir: impl AsRef<Path>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .nest_service("/media", ServeDir::new(media_dir.as_ref()))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/book", book_routes())
        .nest("/chapter", chapter_routes())
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_book))
        .route("/get", post(handlers::get_book))
        .route("/list", get(handlers::list_books))
        .route("/delete", post(handlers::delete_book))
        .route("/reader", post(handlers::reader_view))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_chapter))
        .route("/get", post(handlers::get_chapter))
        .route("/update", post(handlers::update_chapter))
        .route("/delete", post(handlers::delete_chapter))
        .route("/next_order", post(handlers::next_chapter_order))
        .route("/save_order", post(handlers::save_chapter_order))
        .route("/convert", post(handlers::convert_chapter))
}
