//! 错误类型模块
//!
//! 定义 StoryNest 应用中的各种错误类型，包括：
//! - StoryError（故事错误）
//! - ThemeError（主题错误）
//! - GenerateError（生成错误，按类型而非错误文本分类）
//! - ExportError（导出错误）
//!
//! ## 设计原则
//! - 使用 thiserror 派生 Error trait
//! - 支持 From 转换以便错误传播
//! - 生成错误由客户端根据 HTTP 状态码/错误码选择类型，
//!   不对错误消息文本做关键字嗅探

use thiserror::Error;

// ============================================================================
// 故事错误
// ============================================================================

/// 故事操作错误
///
/// 涵盖故事 CRUD 操作中可能出现的所有错误情况。
#[derive(Error, Debug)]
pub enum StoryError {
    /// 故事不存在
    #[error("故事不存在: {0}")]
    NotFound(i64),

    /// 主题更新失败
    #[error("主题更新失败: {0}")]
    Theme(#[from] ThemeError),

    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),
}

// ============================================================================
// 主题错误
// ============================================================================

/// 主题目录操作错误
#[derive(Error, Debug)]
pub enum ThemeError {
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),
}

// ============================================================================
// 生成错误
// ============================================================================

/// 故事生成错误
///
/// 错误类型由 OpenAI 客户端根据 HTTP 状态码和 API 错误码选择，
/// 每个类型对应一条固定的用户提示文案。
#[derive(Error, Debug)]
pub enum GenerateError {
    /// API 密钥配置错误（401 / invalid_api_key）
    #[error("API 密钥配置错误: {0}")]
    Config(String),

    /// API 配额不足（429 / insufficient_quota / billing）
    #[error("API 配额不足: {0}")]
    Quota(String),

    /// 上游暂时不可用（超时 / 连接失败 / 5xx）
    #[error("上游服务暂时不可用: {0}")]
    Transient(String),

    /// 上游响应格式无效
    #[error("上游响应格式无效: {0}")]
    InvalidResponse(String),

    /// 其他未分类错误
    #[error("故事生成失败: {0}")]
    Unknown(String),
}

impl GenerateError {
    /// 面向用户的英文提示文案
    ///
    /// 文案固定，不包含上游错误细节。
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::Config(_) => {
                "There seems to be an issue with the OpenAI API key configuration. \
                 Please check that your API key is valid and has sufficient credits."
            }
            GenerateError::Quota(_) => {
                "The OpenAI API quota has been exceeded. \
                 Please check your billing settings and try again later."
            }
            GenerateError::Transient(_)
            | GenerateError::InvalidResponse(_)
            | GenerateError::Unknown(_) => {
                "Sorry, there was an error generating your story. Please try again \
                 in a moment. If the problem persists, the app will work in demo mode."
            }
        }
    }
}

// ============================================================================
// 导出错误
// ============================================================================

/// PDF 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    /// PDF 渲染失败
    #[error("PDF 渲染失败: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_each_generate_error_to_fixed_user_message() {
        let config = GenerateError::Config("401".into());
        let quota = GenerateError::Quota("429".into());
        let transient = GenerateError::Transient("timeout".into());

        assert!(config.user_message().contains("API key configuration"));
        assert!(quota.user_message().contains("quota has been exceeded"));
        assert!(transient.user_message().contains("demo mode"));
    }

    #[test]
    fn should_convert_rusqlite_error_into_story_error() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        let story_err: StoryError = err.into();
        assert!(matches!(story_err, StoryError::Database(_)));
    }
}
