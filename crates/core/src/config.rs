//! 配置管理模块
//!
//! 应用配置在启动时从环境变量加载一次，之后以只读方式注入各组件。
//! 离线（demo）标志由 API 密钥是否存在推导，并在构造故事生成器时
//! 显式传入，而不是作为全局状态到处读取。

use std::path::PathBuf;

/// OpenAI API 默认地址
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// 默认数据库文件路径
const DEFAULT_DATABASE_PATH: &str = "stories.db";

/// 默认监听端口
const DEFAULT_PORT: u16 = 5000;

/// 应用配置
///
/// 所有字段在启动时确定，运行期间不变。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenAI API 密钥，缺失时应用运行在离线模式
    pub openai_api_key: Option<String>,
    /// OpenAI API 基础地址（测试时可指向本地 mock）
    pub openai_base_url: String,
    /// SQLite 数据库文件路径
    pub database_path: PathBuf,
    /// HTTP 监听端口
    pub port: u16,
}

impl AppConfig {
    /// 从环境变量加载配置
    ///
    /// 调用方应先执行 `dotenvy::dotenv()` 以支持 `.env` 文件。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从自定义查找函数加载配置（便于测试）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

        let database_path = lookup("DATABASE_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let port = lookup("PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            openai_api_key,
            openai_base_url,
            database_path,
            port,
        }
    }

    /// 是否处于离线（demo）模式
    ///
    /// 没有配置 API 密钥时返回 true，此时故事由内置示例目录生成。
    pub fn demo_mode(&self) -> bool {
        self.openai_api_key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn should_use_defaults_when_env_empty() {
        let map = HashMap::new();
        let config = AppConfig::from_lookup(lookup_from(&map));

        assert!(config.demo_mode());
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.database_path, PathBuf::from("stories.db"));
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn should_detect_api_key() {
        let mut map = HashMap::new();
        map.insert("OPENAI_API_KEY", "sk-test-key");
        map.insert("PORT", "8080");
        let config = AppConfig::from_lookup(lookup_from(&map));

        assert!(!config.demo_mode());
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test-key"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn should_treat_blank_key_as_demo_mode() {
        let mut map = HashMap::new();
        map.insert("OPENAI_API_KEY", "   ");
        let config = AppConfig::from_lookup(lookup_from(&map));

        assert!(config.demo_mode());
    }

    #[test]
    fn should_trim_trailing_slash_on_base_url() {
        let mut map = HashMap::new();
        map.insert("OPENAI_BASE_URL", "http://localhost:9999/v1/");
        let config = AppConfig::from_lookup(lookup_from(&map));

        assert_eq!(config.openai_base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn should_ignore_invalid_port() {
        let mut map = HashMap::new();
        map.insert("PORT", "not-a-port");
        let config = AppConfig::from_lookup(lookup_from(&map));

        assert_eq!(config.port, 5000);
    }
}
