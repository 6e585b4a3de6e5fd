//! 故事生成器
//!
//! 在线模式下调用 OpenAI 生成正文和标题（两次请求），
//! 离线模式下从内置示例目录选取。离线标志在构造时注入，
//! 由配置决定，不读取全局状态。

use storynest_core::config::AppConfig;
use storynest_core::errors::GenerateError;
use storynest_core::models::story_model::StoryLength;

use crate::demo_stories;
use crate::openai::{ChatMessage, OpenAiClient};

/// 正文请求的输出上限
const STORY_MAX_TOKENS: u32 = 800;

/// 正文请求的采样温度
const STORY_TEMPERATURE: f32 = 0.7;

/// 标题请求的输出上限
const TITLE_MAX_TOKENS: u32 = 20;

/// 标题请求的采样温度
const TITLE_TEMPERATURE: f32 = 0.5;

/// 正文请求的系统指令：限定年龄适宜、正向、无暴力、结构清晰、安眠结尾
const STORY_SYSTEM_PROMPT: &str = "You are a skilled children's author who specializes in \
creating gentle, educational bedtime stories. Always create content that is completely \
appropriate for children and promotes positive values.";

/// 标题请求的系统指令
const TITLE_SYSTEM_PROMPT: &str = "You create short, child-friendly story titles.";

/// 一次生成的结果
#[derive(Debug, Clone)]
pub struct GeneratedStory {
    pub title: String,
    pub content: String,
    /// 是否来自离线示例目录
    pub is_fallback: bool,
}

/// 故事生成器
///
/// 除上游调用外无副作用；同样的输入在离线模式下产生同样的输出。
pub struct StoryGenerator {
    client: Option<OpenAiClient>,
}

impl StoryGenerator {
    /// 根据配置构造生成器；没有 API 密钥时进入离线模式
    pub fn new(config: &AppConfig) -> Result<Self, GenerateError> {
        let client = match &config.openai_api_key {
            Some(key) => Some(OpenAiClient::new(key, &config.openai_base_url)?),
            None => None,
        };
        Ok(Self { client })
    }

    /// 是否处于离线模式
    pub fn demo_mode(&self) -> bool {
        self.client.is_none()
    }

    /// 生成一个故事
    ///
    /// `theme` 非空由调用方保证；`length` 只影响提示词中的目标字数。
    pub async fn generate(
        &self,
        theme: &str,
        age_group: &str,
        child_name: Option<&str>,
        length: StoryLength,
    ) -> Result<GeneratedStory, GenerateError> {
        match &self.client {
            Some(client) => self.generate_live(client, theme, age_group, child_name, length).await,
            None => {
                tracing::debug!("[生成] 离线模式，从示例目录选取: theme={}", theme);
                Ok(demo_stories::pick_demo_story(theme, child_name))
            }
        }
    }

    /// 在线生成：先请求正文，再请求标题
    async fn generate_live(
        &self,
        client: &OpenAiClient,
        theme: &str,
        age_group: &str,
        child_name: Option<&str>,
        length: StoryLength,
    ) -> Result<GeneratedStory, GenerateError> {
        let prompt = build_story_prompt(theme, age_group, child_name, length);
        let story_messages = [
            ChatMessage::system(STORY_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];
        let content = client
            .chat(&story_messages, STORY_MAX_TOKENS, STORY_TEMPERATURE)
            .await?;

        let title_messages = [
            ChatMessage::system(TITLE_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Create a short, appealing title (maximum 6 words) for this bedtime story about {theme}:"
            )),
        ];
        let title = client
            .chat(&title_messages, TITLE_MAX_TOKENS, TITLE_TEMPERATURE)
            .await?
            .trim_matches('"')
            .to_string();

        tracing::info!("[生成] 在线生成完成: theme={} title={}", theme, title);

        Ok(GeneratedStory {
            title,
            content,
            is_fallback: false,
        })
    }
}

/// 构造正文提示词
///
/// 孩子名字按字面拼入提示词，不做额外转义。
fn build_story_prompt(
    theme: &str,
    age_group: &str,
    child_name: Option<&str>,
    length: StoryLength,
) -> String {
    let word_count = length.word_target();
    let name = child_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("[Child]");

    format!(
        "Create a gentle, calming bedtime story for a {age_group}-year-old child.\n\
         \n\
         Theme: {theme}\n\
         Length: Approximately {word_count} words\n\
         Child's name: {name}\n\
         \n\
         Requirements:\n\
         - Age-appropriate for {age_group} years old\n\
         - Positive, calming tone suitable for bedtime\n\
         - Include moral lessons about kindness, courage, or friendship\n\
         - No scary or violent content\n\
         - Clear beginning, middle, and end\n\
         - Use simple language appropriate for the age group\n\
         - If a child's name is provided, make them the main character\n\
         - End with a peaceful, sleepy conclusion\n\
         \n\
         Please write the story now:"
    )
}
