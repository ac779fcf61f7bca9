//! Fake Speech Client - 用于测试 / 离线运行的合成器
//!
//! 始终返回固定的 MP3 数据，不访问外部服务

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{
    SpeechAudio, SpeechRequest, SpeechSynthesizerPort, SynthesisError,
};

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 模拟的合成延迟
    pub latency: Duration,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(200),
        }
    }
}

/// Fake Speech Client
///
/// 返回一段带合法 ID3 头的占位数据，可通过音频嗅探
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
    audio_data: Vec<u8>,
}

impl FakeSpeechClient {
    pub fn new(config: FakeSpeechClientConfig) -> Self {
        // 最小的可嗅探 MP3：ID3v2 头 + 填充
        let mut audio_data = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
        audio_data.extend_from_slice(&[0u8; 64]);
        Self { config, audio_data }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechClientConfig::default())
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, SynthesisError> {
        tracing::debug!(
            text_chars = request.text.chars().count(),
            voice = request.voice.as_str(),
            model = request.model.as_str(),
            "FakeSpeechClient: returning fixed audio"
        );

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        Ok(SpeechAudio {
            data: self.audio_data.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{is_mp3_payload, SpeechModel, SpeechVoice};

    #[tokio::test]
    async fn test_fake_audio_passes_sniffing() {
        let client = FakeSpeechClient::new(FakeSpeechClientConfig {
            latency: Duration::ZERO,
        });
        let audio = client
            .synthesize(SpeechRequest {
                text: "anything".to_string(),
                voice: SpeechVoice::Alloy,
                model: SpeechModel::Standard,
            })
            .await
            .unwrap();

        assert!(is_mp3_payload(&audio.data));
    }
}
