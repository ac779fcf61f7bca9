//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::{RetryPolicy, SpeechModel, SpeechSettings, SpeechVoice};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（音频制品 URL 由此拼出）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 语音合成配置
///
/// 显式注入到转换用例，任何组件都不做环境级的全局读取
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// API 凭证。为空时转换调用报配置错误，服务照常启动
    #[serde(default)]
    pub api_key: String,

    /// 合成服务基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// 朗读音色
    #[serde(default)]
    pub voice: SpeechVoice,

    /// 质量档位（standard / hd）
    #[serde(default)]
    pub model: SpeechModel,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 瞬时传输失败的最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 首次重试前的等待时间（毫秒），之后指数翻倍
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
}

fn default_tts_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

fn default_retry_base_delay() -> u64 {
    500
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tts_base_url(),
            voice: SpeechVoice::default(),
            model: SpeechModel::default(),
            timeout_secs: default_tts_timeout(),
            max_retries: 0,
            retry_base_delay_ms: default_retry_base_delay(),
        }
    }
}

impl TtsConfig {
    /// 朗读参数（注入转换用例）
    pub fn speech_settings(&self) -> SpeechSettings {
        SpeechSettings {
            voice: self.voice,
            model: self.model,
        }
    }

    /// 重试策略（注入转换用例）
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频制品目录（由 /media 公开托管）
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("data/media")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/libretto.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.tts.base_url, "https://api.openai.com");
        assert_eq!(config.tts.timeout_secs, 120);
        assert_eq!(config.tts.max_retries, 0);
        assert!(config.tts.api_key.is_empty());
        assert_eq!(config.database.path, "data/libretto.db");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5080");
    }

    #[test]
    fn test_public_base_url_falls_back_to_localhost() {
        let config = ServerConfig::default();
        assert_eq!(config.public_base_url(), "http://localhost:5080");

        let config = ServerConfig {
            base_url: Some("https://books.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(config.public_base_url(), "https://books.example.com");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/libretto.db?mode=rwc");
    }

    #[test]
    fn test_speech_settings_from_tts_config() {
        let config = TtsConfig::default();
        let settings = config.speech_settings();
        assert_eq!(settings.voice, SpeechVoice::Alloy);
        assert_eq!(settings.model, SpeechModel::Standard);

        let policy = config.retry_policy();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }
}
