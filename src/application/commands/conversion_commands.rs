//! Conversion Commands

use uuid::Uuid;

/// 将章节正文转换为朗读音频
#[derive(Debug, Clone)]
pub struct ConvertChapterAudio {
    pub chapter_id: Uuid,
}
