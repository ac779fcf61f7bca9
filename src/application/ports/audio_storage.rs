//! Audio Storage Port - 出站端口
//!
//! 定义音频制品存储的抽象接口
//!
//! 制品按 `chapter-<id>-<unixtime>.mp3` 命名，非内容寻址：
//! 同一章节重新生成会产生新文件，旧文件不会被回收

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// 已落盘的音频制品
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    /// 生成的文件名（chapter-<id>-<unixtime>.mp3）
    pub file_name: String,
    /// 磁盘路径
    pub path: PathBuf,
    /// 可直接访问的公开 URL
    pub url: String,
}

/// Audio Storage Port
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 将音频数据写入公开目录，返回制品信息
    async fn save_artifact(
        &self,
        chapter_id: Uuid,
        data: &[u8],
    ) -> Result<StoredArtifact, AudioStorageError>;
}
