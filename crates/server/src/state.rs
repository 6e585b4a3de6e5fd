//! 共享应用状态

use std::sync::Arc;

use rusqlite::Connection;
use storynest_core::config::AppConfig;
use storynest_providers::StoryGenerator;
use tokio::sync::Mutex;

/// 应用状态
///
/// 数据库连接是唯一的共享可变资源；SQLite 本身串行化写入，
/// 请求量很小，单连接加互斥锁足够。
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub generator: Arc<StoryGenerator>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(conn: Connection, generator: StoryGenerator, config: AppConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            generator: Arc::new(generator),
            config: Arc::new(config),
        }
    }
}
