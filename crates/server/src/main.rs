//! StoryNest 服务入口
//!
//! 启动顺序：加载 .env → 初始化日志 → 加载配置 → 打开数据库
//! （建表 + 默认主题）→ 构造生成器 → 启动 HTTP 服务。

use std::net::SocketAddr;

use storynest_core::{config::AppConfig, database};
use storynest_providers::StoryGenerator;
use storynest_server::{router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    if config.demo_mode() {
        tracing::warn!("[启动] 离线模式：未配置 OPENAI_API_KEY，故事来自内置示例目录");
    } else {
        tracing::info!("[启动] 已检测到 OpenAI API 密钥，启用在线生成");
    }

    let conn = database::open(&config.database_path)?;
    database::seed_default_themes(&conn)?;
    tracing::info!("[启动] 数据库就绪: {}", config.database_path.display());

    let generator = StoryGenerator::new(&config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(conn, generator, config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[启动] 监听 http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
