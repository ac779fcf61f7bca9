//! Conversion Command Handler - 章节音频转换
//!
//! 单次调用的状态机: Lookup → Extract → Synthesize → Persist
//! 音频引用最后写入，合成失败不会留下过期或残缺的引用
//!
//! 同一章节的并发转换由章节级互斥锁串行化；不同章节相互独立

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::commands::ConvertChapterAudio;
use crate::application::ports::{
    AudioStoragePort, ChapterRepositoryPort, RepositoryError, SpeechModel, SpeechRequest,
    SpeechSynthesizerPort, SpeechVoice, SynthesisError,
};
use crate::domain::extract_narration;

/// 转换错误
///
/// 所有下层失败在此收敛为一个结构化结果，不向宿主进程抛出
/// 未处理的 panic。需要细分合成失败原因的调用方检查内嵌的
/// SynthesisError
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 章节不存在
    #[error("Chapter not found: {0}")]
    NotFound(Uuid),

    /// 去除标签后正文为空，没有可朗读的文本
    #[error("Chapter has no readable text content")]
    EmptyContent,

    /// 语音合成失败（凭证缺失 / 传输 / 负载校验）
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(#[source] SynthesisError),

    /// 制品写入或引用更新失败
    #[error("Failed to persist audio: {0}")]
    PersistenceFailed(String),
}

impl From<RepositoryError> for ConversionError {
    fn from(err: RepositoryError) -> Self {
        ConversionError::PersistenceFailed(err.to_string())
    }
}

/// 朗读参数（音色 + 质量档位），由配置注入
#[derive(Debug, Clone, Copy)]
pub struct SpeechSettings {
    pub voice: SpeechVoice,
    pub model: SpeechModel,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            voice: SpeechVoice::default(),
            model: SpeechModel::default(),
        }
    }
}

/// 瞬时合成失败的重试策略
///
/// 只对瞬时失败（网络 / 超时 / 5xx）生效；永久失败立即上报
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// 首次尝试之外的最大重试次数
    pub max_retries: u32,
    /// 首次重试前的等待时间，之后按指数翻倍
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// 第 attempt 次重试前的等待时间（attempt 从 0 开始）
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// 转换成功响应
#[derive(Debug, Clone)]
pub struct ConvertChapterResponse {
    pub chapter_id: Uuid,
    /// 新生成制品的公开 URL（已写入章节的音频引用）
    pub audio_url: String,
    pub file_name: String,
}

/// ConvertChapterAudio Handler
///
/// 重复调用在效果上幂等（重新生成并覆盖引用），但每次成功都会
/// 留下一个新制品，旧制品不回收
pub struct ConvertChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    audio_storage: Arc<dyn AudioStoragePort>,
    settings: SpeechSettings,
    retry: RetryPolicy,
    /// 章节级转换锁。条目按需创建，不回收（上界为章节数）
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl ConvertChapterHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        audio_storage: Arc<dyn AudioStoragePort>,
        settings: SpeechSettings,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            chapter_repo,
            synthesizer,
            audio_storage,
            settings,
            retry,
            locks: DashMap::new(),
        }
    }

    pub async fn handle(
        &self,
        command: ConvertChapterAudio,
    ) -> Result<ConvertChapterResponse, ConversionError> {
        let chapter_id = command.chapter_id;

        // 同一章节的转换串行化，避免两次转换竞争最终的引用写入
        let lock = self
            .locks
            .entry(chapter_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // 1. Lookup
        let chapter = self
            .chapter_repo
            .find_by_id(chapter_id)
            .await?
            .ok_or(ConversionError::NotFound(chapter_id))?;

        // 2. Extract
        let text = extract_narration(&chapter.content).map_err(|err| {
            tracing::warn!(chapter_id = %chapter_id, error = %err, "No narratable text in chapter");
            ConversionError::EmptyContent
        })?;

        // 3. Synthesize
        let audio = self.synthesize_with_retry(chapter_id, &text).await?;

        // 4. Persist - 引用最后写入
        let artifact = self
            .audio_storage
            .save_artifact(chapter_id, &audio.data)
            .await
            .map_err(|err| {
                tracing::error!(chapter_id = %chapter_id, error = %err, "Failed to write audio artifact");
                ConversionError::PersistenceFailed(err.to_string())
            })?;

        self.chapter_repo
            .set_audio_url(chapter_id, &artifact.url)
            .await?;

        tracing::info!(
            chapter_id = %chapter_id,
            file = %artifact.file_name,
            audio_size = audio.data.len(),
            "Chapter audio generated"
        );

        Ok(ConvertChapterResponse {
            chapter_id,
            audio_url: artifact.url,
            file_name: artifact.file_name,
        })
    }

    /// 调用合成引擎，瞬时失败按指数退避重试
    async fn synthesize_with_retry(
        &self,
        chapter_id: Uuid,
        text: &str,
    ) -> Result<crate::application::ports::SpeechAudio, ConversionError> {
        let request = SpeechRequest {
            text: text.to_string(),
            voice: self.settings.voice,
            model: self.settings.model,
        };

        let mut attempt = 0u32;
        loop {
            match self.synthesizer.synthesize(request.clone()).await {
                Ok(audio) => return Ok(audio),
                Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        chapter_id = %chapter_id,
                        attempt = attempt + 1,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient synthesis failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(chapter_id = %chapter_id, error = %err, "Speech synthesis failed");
                    return Err(ConversionError::SynthesisFailed(err));
                }
            }
        }
    }
}
