//! Libretto - 互动电子书章节服务
//!
//! - Domain: book/, narration (章节正文提取)
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use libretto::config::{load_config, print_config};
use libretto::infrastructure::adapters::{MediaStorage, SpeechClient, SpeechClientConfig};
// use libretto::infrastructure::adapters::FakeSpeechClient;
use libretto::infrastructure::http::{AppState, HttpServer, ServerConfig};
use libretto::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteBookRepository, SqliteChapterRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},libretto={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Libretto - 互动电子书章节服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let book_repo = Arc::new(SqliteBookRepository::new(pool.clone()));
    let chapter_repo = Arc::new(SqliteChapterRepository::new(pool.clone()));

    // 创建语音合成客户端
    let speech_config = SpeechClientConfig {
        base_url: config.tts.base_url.clone(),
        api_key: config.tts.api_key.clone(),
        timeout_secs: config.tts.timeout_secs,
    };
    let synthesizer = Arc::new(
        SpeechClient::new(speech_config)
            .map_err(|e| anyhow::anyhow!("Failed to create speech client: {}", e))?,
    );

    // // 使用 Fake 合成器（离线调试用，返回固定音频，不访问外部服务）
    // let synthesizer = Arc::new(FakeSpeechClient::with_defaults());

    // 创建媒体文件存储（制品目录 + 公开 URL）
    let audio_storage = Arc::new(
        MediaStorage::new(&config.storage.media_dir, config.server.public_base_url())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to init media storage: {}", e))?,
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(
        &config.server.host,
        config.server.port,
        config.storage.media_dir.clone(),
    );
    let state = AppState::new(
        book_repo,
        chapter_repo,
        synthesizer,
        audio_storage,
        config.tts.speech_settings(),
        config.tts.retry_policy(),
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
