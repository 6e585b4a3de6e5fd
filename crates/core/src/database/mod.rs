//! 数据库模块
//!
//! 负责打开 SQLite 连接、建表和默认主题种子数据。
//! 建表和种子操作都是幂等的，应用每次启动时执行一次。

use std::path::Path;

use rusqlite::{params, Connection};

use crate::errors::ThemeError;

pub mod dao;

/// 默认主题种子数据：(名称, 分类, 描述)
const DEFAULT_THEMES: &[(&str, &str, &str)] = &[
    (
        "brave princess",
        "fairy_tale",
        "Stories about courageous princesses",
    ),
    ("space adventure", "adventure", "Exciting journeys through space"),
    ("friendly dragon", "fantasy", "Tales of kind-hearted dragons"),
    ("magical forest", "fantasy", "Adventures in enchanted forests"),
    ("underwater kingdom", "fantasy", "Stories from beneath the sea"),
    ("superhero animals", "adventure", "Animals with special powers"),
    (
        "time travel",
        "adventure",
        "Journeys through different time periods",
    ),
    ("talking toys", "fantasy", "Adventures with living toys"),
];

/// 打开数据库并完成初始化（建表 + 种子数据）
pub fn open(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 打开内存数据库（测试用），同样完成建表
pub fn open_in_memory() -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 创建数据表（幂等）
pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS stories (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT NOT NULL,
            content      TEXT NOT NULL,
            theme        TEXT NOT NULL,
            age_group    TEXT NOT NULL,
            child_name   TEXT,
            story_length TEXT NOT NULL DEFAULT 'medium',
            created_at   INTEGER NOT NULL,
            user_notes   TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_stories_created_at
            ON stories (created_at DESC, id DESC);
        CREATE TABLE IF NOT EXISTS themes (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL UNIQUE,
            description      TEXT,
            category         TEXT NOT NULL,
            popularity_score INTEGER NOT NULL DEFAULT 0
        );",
    )?;
    Ok(())
}

/// 主题表为空时写入默认主题，返回插入条数
///
/// 重复调用不会产生重复数据。
pub fn seed_default_themes(conn: &Connection) -> Result<usize, ThemeError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM themes", [], |row| row.get(0))?;
    if count > 0 {
        tracing::debug!("[数据库] 主题目录已有 {} 条记录，跳过种子数据", count);
        return Ok(0);
    }

    for (name, category, description) in DEFAULT_THEMES {
        conn.execute(
            "INSERT INTO themes (name, description, category, popularity_score)
             VALUES (?1, ?2, ?3, 1)",
            params![name, description, category],
        )?;
    }

    tracing::info!("[数据库] 已写入 {} 条默认主题", DEFAULT_THEMES.len());
    Ok(DEFAULT_THEMES.len())
}
