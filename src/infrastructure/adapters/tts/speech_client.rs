//! Speech Client - 调用外部语音合成 HTTP 服务
//!
//! 实现 SpeechSynthesizerPort trait，通过 HTTP 调用 OpenAI 兼容的
//! 语音合成接口
//!
//! 外部 API:
//! POST {base_url}/v1/audio/speech
//! Headers: Authorization: Bearer <key>, Content-Type: application/json
//! Request: {"model": "...", "input": "...", "voice": "...", "response_format": "mp3"}
//! Response: 成功为 MP3 二进制；失败为 {"error": {"message": "..."}} 错误信封
//!
//! 响应做两层校验：传输层状态码成功，且负载前几个字节嗅探为
//! MP3。状态码成功但负载不是音频按失败处理

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    is_mp3_payload, truncate_input, SpeechAudio, SpeechRequest, SpeechSynthesizerPort,
    SynthesisError,
};

/// 日志中负载预览的最大字节数
const PREVIEW_BYTES: usize = 120;

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    /// 模型标识（质量档位）
    model: &'a str,
    /// 要合成的文本（已截断）
    input: &'a str,
    /// 音色
    voice: &'a str,
    /// 输出格式
    response_format: &'a str,
}

/// Speech 客户端配置
#[derive(Debug, Clone)]
pub struct SpeechClientConfig {
    /// 合成服务基础 URL
    pub base_url: String,
    /// API 凭证。为空时所有调用立即返回配置错误，不发起网络请求
    pub api_key: String,
    /// 请求超时时间（秒）。合成很慢，默认给到两分钟
    pub timeout_secs: u64,
}

impl Default for SpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            timeout_secs: 120,
        }
    }
}

impl SpeechClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Speech 客户端
///
/// 单次同步请求，无重试（重试策略在调用方）
pub struct SpeechClient {
    client: Client,
    config: SpeechClientConfig,
}

impl SpeechClient {
    /// 创建新的 Speech 客户端
    pub fn new(config: SpeechClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成接口 URL
    fn speech_url(&self) -> String {
        format!(
            "{}/v1/audio/speech",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SpeechSynthesizerPort for SpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, SynthesisError> {
        // 凭证缺失是配置错误，在任何网络请求之前失败
        if self.config.api_key.trim().is_empty() {
            return Err(SynthesisError::MissingCredential);
        }

        let input = truncate_input(&request.text);
        let http_request = SpeechHttpRequest {
            model: request.model.as_str(),
            input: &input,
            voice: request.voice.as_str(),
            response_format: "mp3",
        };

        tracing::debug!(
            url = %self.speech_url(),
            model = http_request.model,
            voice = http_request.voice,
            input_chars = input.chars().count(),
            "Sending speech synthesis request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.config.api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::Network(format!("Cannot connect to speech API: {}", e))
                } else {
                    SynthesisError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(&body)
                .unwrap_or_else(|| preview(body.as_bytes()));
            tracing::error!(
                status = status.as_u16(),
                message = %message,
                "Speech API returned failure status"
            );
            return Err(SynthesisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Network(format!("Failed to read audio payload: {}", e)))?
            .to_vec();

        // 状态码成功还不够：负载必须嗅探为音频
        if !is_mp3_payload(&data) {
            let body_preview = preview(&data);
            tracing::error!(
                payload_len = data.len(),
                payload_preview = %body_preview,
                "Speech API payload is not recognizable audio"
            );
            return Err(SynthesisError::InvalidAudio(body_preview));
        }

        tracing::info!(audio_size = data.len(), "Speech synthesis completed");

        Ok(SpeechAudio { data })
    }
}

/// 从错误信封中取 error.message
fn parse_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

/// 负载前若干字节的可读预览（日志用，不含凭证）
fn preview(data: &[u8]) -> String {
    let end = data.len().min(PREVIEW_BYTES);
    String::from_utf8_lossy(&data[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        SpeechModel, SpeechVoice, MAX_INPUT_CHARS, TRUNCATION_MARKER,
    };
    use serde_json::json;

    fn request_with_text(text: impl Into<String>) -> SpeechRequest {
        SpeechRequest {
            text: text.into(),
            voice: SpeechVoice::Fable,
            model: SpeechModel::Standard,
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> SpeechClient {
        SpeechClient::new(SpeechClientConfig::new(server.url(), "test-key")).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = SpeechClientConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_speech_url_strips_trailing_slash() {
        let client =
            SpeechClient::new(SpeechClientConfig::new("http://localhost:9999/", "k")).unwrap();
        assert_eq!(client.speech_url(), "http://localhost:9999/v1/audio/speech");
    }

    #[tokio::test]
    async fn test_success_with_mp3_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "tts-1",
                "input": "Hello chapter",
                "voice": "fable",
                "response_format": "mp3",
            })))
            .with_status(200)
            .with_body(b"ID3\x04\x00\x00fake-audio".to_vec())
            .create_async()
            .await;

        let client = client_for(&server);
        let audio = client
            .synthesize(request_with_text("Hello chapter"))
            .await
            .unwrap();

        assert!(audio.data.starts_with(b"ID3"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_success_with_frame_sync_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/audio/speech")
            .with_status(200)
            .with_body(vec![0xFF, 0xFB, 0x90, 0x00, 0x01, 0x02])
            .create_async()
            .await;

        let client = client_for(&server);
        let audio = client
            .synthesize(request_with_text("Hello chapter"))
            .await
            .unwrap();

        assert_eq!(audio.data[0], 0xFF);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .expect(0)
            .create_async()
            .await;

        let client =
            SpeechClient::new(SpeechClientConfig::new(server.url(), "  ")).unwrap();
        let result = client.synthesize(request_with_text("Hello chapter")).await;

        assert!(matches!(result, Err(SynthesisError::MissingCredential)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_200_with_json_body_is_invalid_audio() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/audio/speech")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"error": {"message": "quota exceeded"}}).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.synthesize(request_with_text("Hello chapter")).await;

        // 状态码成功但负载不是音频，按校验失败处理
        match result {
            Err(SynthesisError::InvalidAudio(preview)) => {
                assert!(preview.contains("quota exceeded"));
            }
            other => panic!("Expected InvalidAudio, got {:?}", other.map(|a| a.data.len())),
        }
    }

    #[tokio::test]
    async fn test_http_401_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/audio/speech")
            .with_status(401)
            .with_body(json!({"error": {"message": "Incorrect API key provided"}}).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.synthesize(request_with_text("Hello chapter")).await;

        match result {
            Err(SynthesisError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("Expected Api error, got {:?}", other.map(|a| a.data.len())),
        }
    }

    #[tokio::test]
    async fn test_http_503_is_transient() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/audio/speech")
            .with_status(503)
            .with_body("upstream overloaded")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .synthesize(request_with_text("Hello chapter"))
            .await
            .unwrap_err();

        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_long_input_is_truncated_in_request_body() {
        let text = "a".repeat(MAX_INPUT_CHARS + 500);
        let expected: String = {
            let mut t: String = text.chars().take(MAX_INPUT_CHARS).collect();
            t.push_str(TRUNCATION_MARKER);
            t
        };

        let mut server = mockito::Server::new_async().await;
        // 只有提交的 input 恰好是前 4096 个字符 + 截断标记时才命中
        let mock = server
            .mock("POST", "/v1/audio/speech")
            .match_body(mockito::Matcher::PartialJson(json!({"input": expected})))
            .with_status(200)
            .with_body(b"ID3\x04\x00\x00fake-audio".to_vec())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.synthesize(request_with_text(text)).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[test]
    fn test_parse_error_message() {
        let body = r#"{"error": {"message": "model not found", "type": "invalid_request_error"}}"#;
        assert_eq!(
            parse_error_message(body),
            Some("model not found".to_string())
        );
        assert_eq!(parse_error_message("not json"), None);
        assert_eq!(parse_error_message(r#"{"data": 1}"#), None);
    }

    #[test]
    fn test_preview_is_bounded() {
        let data = vec![b'x'; 1000];
        assert_eq!(preview(&data).len(), PREVIEW_BYTES);
    }
}
