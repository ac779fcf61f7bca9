//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ChapterStore、SpeechSynthesizer、AudioStorage）
//! - commands: 命令及处理器（CRUD、顺序维护、音频转换）
//! - queries: 查询及处理器（详情、列表、阅读器负载）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{
        ConversionError, ConvertChapterHandler, ConvertChapterResponse, CreateBookHandler,
        CreateBookResponse, CreateChapterHandler, CreateChapterResponse, DeleteBookHandler,
        DeleteChapterHandler, RetryPolicy, SaveChapterOrderHandler, SpeechSettings,
        UpdateChapterHandler,
    },
    ConvertChapterAudio, CreateBook, CreateChapter, DeleteBook, DeleteChapter, SaveChapterOrder,
    UpdateChapter,
};

pub use error::ApplicationError;

pub use ports::{
    AudioStorageError, AudioStoragePort, BookRecord, BookRepositoryPort, ChapterRecord,
    ChapterRepositoryPort, RepositoryError, SpeechAudio, SpeechModel, SpeechRequest,
    SpeechSynthesizerPort, SpeechVoice, StoredArtifact, SynthesisError,
};

pub use queries::{
    handlers::{
        GetBookHandler, GetChapterHandler, ListBooksHandler, NextChapterOrderHandler, ReaderView,
        ReaderViewHandler,
    },
    GetBook, GetChapter, GetReaderView, ListBooks, NextChapterOrder,
};
