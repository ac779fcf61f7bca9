//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod chapter_store;
mod speech;

pub use audio_storage::{AudioStorageError, AudioStoragePort, StoredArtifact};
pub use chapter_store::{
    BookRecord, BookRepositoryPort, ChapterRecord, ChapterRepositoryPort, RepositoryError,
};
pub use speech::{
    is_mp3_payload, truncate_input, SpeechAudio, SpeechModel, SpeechRequest, SpeechSynthesizerPort,
    SpeechVoice, SynthesisError, MAX_INPUT_CHARS, TRUNCATION_MARKER,
};
