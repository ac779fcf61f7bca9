//! Application State
//!
//! 聚合所有端口实现与 Command/Query Handlers

use std::sync::Arc;

use crate::application::{
    // Ports
    AudioStoragePort,
    BookRepositoryPort,
    ChapterRepositoryPort,
    // Command handlers
    ConvertChapterHandler,
    CreateBookHandler,
    CreateChapterHandler,
    DeleteBookHandler,
    DeleteChapterHandler,
    // Query handlers
    GetBookHandler,
    GetChapterHandler,
    ListBooksHandler,
    NextChapterOrderHandler,
    ReaderViewHandler,
    RetryPolicy,
    SaveChapterOrderHandler,
    SpeechSettings,
    SpeechSynthesizerPort,
    UpdateChapterHandler,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub book_repo: Arc<dyn BookRepositoryPort>,
    pub chapter_repo: Arc<dyn ChapterRepositoryPort>,
    pub synthesizer: Arc<dyn SpeechSynthesizerPort>,
    pub audio_storage: Arc<dyn AudioStoragePort>,

    // ========== Command Handlers ==========
    pub create_book_handler: CreateBookHandler,
    pub delete_book_handler: DeleteBookHandler,
    pub create_chapter_handler: CreateChapterHandler,
    pub update_chapter_handler: UpdateChapterHandler,
    pub delete_chapter_handler: DeleteChapterHandler,
    pub save_chapter_order_handler: SaveChapterOrderHandler,
    pub convert_chapter_handler: ConvertChapterHandler,

    // ========== Query Handlers ==========
    pub get_book_handler: GetBookHandler,
    pub list_books_handler: ListBooksHandler,
    pub get_chapter_handler: GetChapterHandler,
    pub reader_view_handler: ReaderViewHandler,
    pub next_chapter_order_handler: NextChapterOrderHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        audio_storage: Arc<dyn AudioStoragePort>,
        speech_settings: SpeechSettings,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            // Ports
            book_repo: book_repo.clone(),
            chapter_repo: chapter_repo.clone(),
            synthesizer: synthesizer.clone(),
            audio_storage: audio_storage.clone(),

            // Command handlers
            create_book_handler: CreateBookHandler::new(book_repo.clone()),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone()),
            create_chapter_handler: CreateChapterHandler::new(
                book_repo.clone(),
                chapter_repo.clone(),
            ),
            update_chapter_handler: UpdateChapterHandler::new(chapter_repo.clone()),
            delete_chapter_handler: DeleteChapterHandler::new(chapter_repo.clone()),
            save_chapter_order_handler: SaveChapterOrderHandler::new(chapter_repo.clone()),
            convert_chapter_handler: ConvertChapterHandler::new(
                chapter_repo.clone(),
                synthesizer.clone(),
                audio_storage.clone(),
                speech_settings,
                retry_policy,
            ),

            // Query handlers
            get_book_handler: GetBookHandler::new(book_repo.clone()),
            list_books_handler: ListBooksHandler::new(book_repo.clone()),
            get_chapter_handler: GetChapterHandler::new(chapter_repo.clone()),
            reader_view_handler: ReaderViewHandler::new(book_repo.clone(), chapter_repo.clone()),
            next_chapter_order_handler: NextChapterOrderHandler::new(book_repo, chapter_repo),
        }
    }
}
