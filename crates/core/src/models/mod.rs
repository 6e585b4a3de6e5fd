//! 数据模型模块

pub mod story_model;
