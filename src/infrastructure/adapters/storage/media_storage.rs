//! Media Storage - 文件系统音频制品存储
//!
//! 实现 AudioStoragePort trait
//!
//! 制品写入公开媒体目录，命名为 chapter-<id>-<unixtime>.mp3，
//! 通过 {public_base_url}/media/<file> 直接访问

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioStorageError, AudioStoragePort, StoredArtifact};

/// 文件系统音频制品存储
pub struct MediaStorage {
    /// 媒体根目录
    media_dir: PathBuf,
    /// 对外可访问的基础 URL（不含尾部斜杠）
    public_base_url: String,
}

impl MediaStorage {
    /// 创建媒体存储，确保目录存在
    pub async fn new(
        media_dir: impl AsRef<Path>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, AudioStorageError> {
        let media_dir = media_dir.as_ref().to_path_buf();

        fs::create_dir_all(&media_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self {
            media_dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 媒体根目录
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// 生成制品文件名: chapter-<id>-<unixtime>.mp3
    fn artifact_file_name(chapter_id: Uuid) -> String {
        format!("chapter-{}-{}.mp3", chapter_id, Utc::now().timestamp())
    }
}

#[async_trait]
impl AudioStoragePort for MediaStorage {
    async fn save_artifact(
        &self,
        chapter_id: Uuid,
        data: &[u8],
    ) -> Result<StoredArtifact, AudioStorageError> {
        let file_name = Self::artifact_file_name(chapter_id);
        let path = self.media_dir.join(&file_name);

        fs::write(&path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        let url = format!("{}/media/{}", self.public_base_url, file_name);

        tracing::debug!(
            chapter_id = %chapter_id,
            path = %path.display(),
            size = data.len(),
            "Saved audio artifact"
        );

        Ok(StoredArtifact {
            file_name,
            path,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_artifact_writes_file_and_url() {
        let temp_dir = tempdir().unwrap();
        let storage = MediaStorage::new(temp_dir.path(), "http://localhost:5080/")
            .await
            .unwrap();

        let chapter_id = Uuid::new_v4();
        let data = b"ID3\x04\x00fake";

        let artifact = storage.save_artifact(chapter_id, data).await.unwrap();

        assert!(artifact.path.exists());
        assert_eq!(std::fs::read(&artifact.path).unwrap(), data);
        assert!(artifact.file_name.starts_with(&format!("chapter-{}-", chapter_id)));
        assert!(artifact.file_name.ends_with(".mp3"));
        assert_eq!(
            artifact.url,
            format!("http://localhost:5080/media/{}", artifact.file_name)
        );
    }

    #[tokio::test]
    async fn test_regeneration_does_not_remove_previous_artifact() {
        let temp_dir = tempdir().unwrap();
        let storage = MediaStorage::new(temp_dir.path(), "http://localhost:5080")
            .await
            .unwrap();

        let chapter_id = Uuid::new_v4();
        let first = storage.save_artifact(chapter_id, b"ID3one").await.unwrap();
        let second = storage.save_artifact(chapter_id, b"ID3two").await.unwrap();

        // 旧制品不回收；同一秒内重新生成会覆盖同名文件
        assert!(second.path.exists());
        if first.file_name != second.file_name {
            assert!(first.path.exists());
        }
    }

    #[tokio::test]
    async fn test_creates_missing_media_dir() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("media").join("audio");

        let storage = MediaStorage::new(&nested, "http://localhost:5080")
            .await
            .unwrap();

        assert!(storage.media_dir().exists());
    }
}
