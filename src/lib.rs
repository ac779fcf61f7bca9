//! Libretto - 互动电子书章节服务，支持章节朗读音频生成
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book Context: 书籍 / 章节管理上下文
//! - narration: 章节 HTML 正文 → 朗读纯文本提取
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ChapterStore, SpeechSynthesizer, AudioStorage）
//! - Commands: 命令处理器（CRUD、章节排序、音频转换）
//! - Queries: 查询处理器（详情、列表、阅读器负载）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + /media 静态托管
//! - Persistence: SQLite 书籍 / 章节仓储
//! - Adapters: Speech Client（OpenAI 兼容合成接口）、媒体文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
