//! StoryNest 核心模块
//!
//! 包含 config, errors, models, database 等功能

pub mod config;
pub mod database;
pub mod errors;
pub mod models;

pub use config::AppConfig;
pub use errors::{ExportError, GenerateError, StoryError, ThemeError};
pub use models::story_model::{NewStory, Story, StoryLength, StoryPage, Theme};
