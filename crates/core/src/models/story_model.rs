//! 故事与主题数据模型
//!
//! 包含故事记录、主题目录条目、分页结果和故事长度档位。
//! 时间戳统一使用 Unix 秒（UTC），展示时再格式化。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// 故事长度
// ============================================================================

/// 故事长度档位
///
/// 每个档位对应一个目标字数（仅作为提示词中的参考值，不校验结果）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    Short,
    Medium,
    Long,
}

impl StoryLength {
    /// 解析长度字符串，无法识别时回退到默认的 medium
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "short" => StoryLength::Short,
            "long" => StoryLength::Long,
            _ => StoryLength::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryLength::Short => "short",
            StoryLength::Medium => "medium",
            StoryLength::Long => "long",
        }
    }

    /// 目标字数
    pub fn word_target(&self) -> u32 {
        match self {
            StoryLength::Short => 200,
            StoryLength::Medium => 400,
            StoryLength::Long => 600,
        }
    }

    /// 朗读时长描述
    pub fn reading_time(&self) -> &'static str {
        match self {
            StoryLength::Short => "2-3 minutes",
            StoryLength::Medium => "5-7 minutes",
            StoryLength::Long => "8-10 minutes",
        }
    }
}

impl Default for StoryLength {
    fn default() -> Self {
        StoryLength::Medium
    }
}

// ============================================================================
// 故事记录
// ============================================================================

/// 已持久化的故事记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// 用户输入的主题原文（保留大小写）
    pub theme: String,
    pub age_group: String,
    pub child_name: Option<String>,
    pub story_length: String,
    /// 创建时间（Unix 秒，创建后不可变）
    pub created_at: i64,
    pub user_notes: Option<String>,
}

impl Story {
    /// 创建时间对应的 UTC 时间
    pub fn created_date(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.created_at, 0).unwrap_or_else(Utc::now)
    }

    /// 按 "Month DD, YYYY" 格式化创建日期
    pub fn created_date_long(&self) -> String {
        self.created_date().format("%B %d, %Y").to_string()
    }

    /// 导出文件名：标题中的空格替换为下划线
    pub fn export_filename(&self) -> String {
        format!("{}.pdf", self.title.replace(' ', "_"))
    }
}

/// 待插入的故事记录（id 和创建时间由存储层分配）
#[derive(Debug, Clone)]
pub struct NewStory {
    pub title: String,
    pub content: String,
    pub theme: String,
    pub age_group: String,
    pub child_name: Option<String>,
    pub story_length: String,
}

// ============================================================================
// 主题目录
// ============================================================================

/// 主题目录条目
///
/// `name` 全局唯一且统一小写；`popularity_score` 单调不减。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub popularity_score: i64,
}

// ============================================================================
// 分页
// ============================================================================

/// 故事分页结果（每页固定 10 条，按创建时间倒序）
#[derive(Debug, Clone)]
pub struct StoryPage {
    pub stories: Vec<Story>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub pages: u32,
}

impl StoryPage {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}
