//! Speech Synthesizer Port - 语音合成引擎抽象
//!
//! 定义文本 → 语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 合成接口的单次输入上限（字符数）
///
/// 超出部分被截断并附加截断标记。这是对外部 API 输入上限的
/// 有意简化：超长章节不会被完整朗读
pub const MAX_INPUT_CHARS: usize = 4096;

/// 截断标记，附加在被截断文本的末尾
pub const TRUNCATION_MARKER: &str = "...";

/// 语音合成错误
///
/// 区分永久失败（凭证缺失、负载校验失败、4xx 拒绝）与
/// 瞬时失败（网络、超时、5xx）；只有瞬时失败可以重试
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 未配置 API 凭证。配置错误，不是瞬时故障，永不重试
    #[error("Speech API credential is not configured")]
    MissingCredential,

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    /// 合成端点返回非成功状态
    #[error("Speech API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// 传输层成功，但负载不是可识别的音频
    #[error("Response payload is not recognizable audio: {0}")]
    InvalidAudio(String),
}

impl SynthesisError {
    /// 是否为瞬时失败（可按退避策略重试）
    pub fn is_transient(&self) -> bool {
        match self {
            SynthesisError::Timeout | SynthesisError::Network(_) => true,
            SynthesisError::Api { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// 朗读音色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechVoice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl SpeechVoice {
    /// 接口字段值
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechVoice::Alloy => "alloy",
            SpeechVoice::Echo => "echo",
            SpeechVoice::Fable => "fable",
            SpeechVoice::Onyx => "onyx",
            SpeechVoice::Nova => "nova",
            SpeechVoice::Shimmer => "shimmer",
        }
    }
}

impl Default for SpeechVoice {
    fn default() -> Self {
        SpeechVoice::Alloy
    }
}

/// 合成质量档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechModel {
    /// 标准质量，延迟较低
    #[serde(rename = "standard")]
    Standard,
    /// 高质量
    #[serde(rename = "hd")]
    Hd,
}

impl SpeechModel {
    /// 接口模型标识
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechModel::Standard => "tts-1",
            SpeechModel::Hd => "tts-1-hd",
        }
    }
}

impl Default for SpeechModel {
    fn default() -> Self {
        SpeechModel::Standard
    }
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的纯文本（提交前按 MAX_INPUT_CHARS 截断）
    pub text: String,
    pub voice: SpeechVoice,
    pub model: SpeechModel,
}

/// 语音合成结果
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// MP3 音频数据，已通过 is_mp3_payload 校验
    pub data: Vec<u8>,
}

/// Speech Synthesizer Port
///
/// 外部语音合成服务的抽象接口。单次同步调用，无内部并发；
/// 失败以类型化错误返回，不向调用方抛出 panic
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成一段文本，返回校验过的音频字节
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, SynthesisError>;
}

/// 将输入截断到 MAX_INPUT_CHARS 个字符并附加截断标记
///
/// 按字符（而非字节）截断，避免切断多字节序列
pub fn truncate_input(text: &str) -> String {
    if text.chars().count() <= MAX_INPUT_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// 嗅探负载是否为 MP3 音频
///
/// 两种可接受的起始形态：
/// - 偏移 0 处的 "ID3" 标签
/// - 0xFF 帧同步字节（裸 MPEG 帧流，第二字节高三位全置位）
pub fn is_mp3_payload(data: &[u8]) -> bool {
    if data.len() < 3 {
        return false;
    }
    if &data[..3] == b"ID3" {
        return true;
    }
    data[0] == 0xFF && (data[1] & 0xE0) == 0xE0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_unchanged() {
        let text = "short chapter text";
        assert_eq!(truncate_input(text), text);
    }

    #[test]
    fn test_truncate_exact_limit_unchanged() {
        let text = "a".repeat(MAX_INPUT_CHARS);
        assert_eq!(truncate_input(&text), text);
    }

    #[test]
    fn test_truncate_long_input_appends_marker() {
        let text = "a".repeat(MAX_INPUT_CHARS + 100);
        let truncated = truncate_input(&text);
        assert_eq!(
            truncated.chars().count(),
            MAX_INPUT_CHARS + TRUNCATION_MARKER.chars().count()
        );
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert_eq!(&truncated[..MAX_INPUT_CHARS], &text[..MAX_INPUT_CHARS]);
    }

    #[test]
    fn test_truncate_is_char_boundary_safe() {
        // 多字节字符不能被截成半个
        let text = "汉".repeat(MAX_INPUT_CHARS + 10);
        let truncated = truncate_input(&text);
        assert_eq!(
            truncated.chars().count(),
            MAX_INPUT_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_sniff_accepts_id3_tag() {
        let payload = b"ID3\x04\x00\x00\x00\x00\x00\x00rest";
        assert!(is_mp3_payload(payload));
    }

    #[test]
    fn test_sniff_accepts_frame_sync() {
        let payload = [0xFF, 0xFB, 0x90, 0x00, 0x00];
        assert!(is_mp3_payload(&payload));
    }

    #[test]
    fn test_sniff_rejects_json_body() {
        let payload = br#"{"error":{"message":"quota exceeded"}}"#;
        assert!(!is_mp3_payload(payload));
    }

    #[test]
    fn test_sniff_rejects_short_payload() {
        assert!(!is_mp3_payload(b""));
        assert!(!is_mp3_payload(b"ID"));
    }

    #[test]
    fn test_sniff_rejects_bad_frame_sync() {
        // 第二字节高三位未全置位
        let payload = [0xFF, 0x1B, 0x90, 0x00];
        assert!(!is_mp3_payload(&payload));
    }

    #[test]
    fn test_transient_classification() {
        assert!(SynthesisError::Timeout.is_transient());
        assert!(SynthesisError::Network("reset".into()).is_transient());
        assert!(SynthesisError::Api {
            status: 503,
            message: "overloaded".into()
        }
        .is_transient());
        assert!(!SynthesisError::Api {
            status: 401,
            message: "bad key".into()
        }
        .is_transient());
        assert!(!SynthesisError::MissingCredential.is_transient());
        assert!(!SynthesisError::InvalidAudio("json".into()).is_transient());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(SpeechVoice::Alloy.as_str(), "alloy");
        assert_eq!(SpeechVoice::Shimmer.as_str(), "shimmer");
        assert_eq!(SpeechModel::Standard.as_str(), "tts-1");
        assert_eq!(SpeechModel::Hd.as_str(), "tts-1-hd");
    }
}
