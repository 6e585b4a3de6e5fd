//! 请求处理模块
//!
//! - `api`: JSON 接口（状态、生成、主题）
//! - `pages`: HTML 页面与 PDF 导出

pub mod api;
pub mod pages;
