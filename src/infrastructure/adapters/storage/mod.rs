//! Storage Adapter - 音频制品存储实现

mod media_storage;

pub use media_storage::MediaStorage;
