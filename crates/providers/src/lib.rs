//! 故事生成模块
//!
//! 包含 OpenAI 客户端、故事生成器和离线示例故事目录。

pub mod demo_stories;
pub mod generator;
pub mod openai;

pub use generator::{GeneratedStory, StoryGenerator};
pub use openai::OpenAiClient;
