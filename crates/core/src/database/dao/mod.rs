//! 数据访问层
//!
//! - `story_dao`: 故事记录的 CRUD 与分页
//! - `theme_dao`: 主题目录的计数与查询

pub mod story_dao;
pub mod theme_dao;

pub use story_dao::StoryDao;
pub use theme_dao::ThemeDao;
