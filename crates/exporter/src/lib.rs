//! 故事 PDF 导出模块
//!
//! 导出分两步：`layout` 把故事记录整理成结构化的版面
//! （标题块、段落列表、元信息页脚），`pdf` 负责把版面渲染成
//! PDF 字节流。结构整理是纯函数，便于单独测试。

pub mod layout;
pub mod pdf;

pub use layout::{layout_story, StoryLayout};
pub use pdf::render_pdf;

use storynest_core::errors::ExportError;
use storynest_core::models::story_model::Story;

/// 把故事记录导出为 PDF 字节流
///
/// 同样的故事记录总是产生相同的版面结构。
pub fn export_story(story: &Story) -> Result<Vec<u8>, ExportError> {
    let layout = layout_story(story);
    render_pdf(&layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_story() -> Story {
        Story {
            id: 7,
            title: "Mia and the Sleepy Stars".into(),
            content: "Para one.\n\nPara two.".into(),
            theme: "space adventure".into(),
            age_group: "6".into(),
            child_name: Some("Mia".into()),
            story_length: "medium".into(),
            created_at: 1_700_000_000,
            user_notes: None,
        }
    }

    #[test]
    fn should_produce_pdf_bytes() {
        let bytes = export_story(&sample_story()).expect("export");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }
}
