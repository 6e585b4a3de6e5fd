//! 版面整理
//!
//! 把故事记录转换为结构化版面：标题、按空行切分的段落、
//! 元信息页脚。空白段落在裁剪后丢弃。

use storynest_core::models::story_model::Story;

/// 结构化版面
#[derive(Debug, Clone, PartialEq)]
pub struct StoryLayout {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub footer_lines: Vec<String>,
}

/// 把故事记录整理成版面结构
///
/// 页脚固定包含生成日期（Month DD, YYYY）、主题和年龄段，
/// 有孩子名字时追加一行。
pub fn layout_story(story: &Story) -> StoryLayout {
    let paragraphs = story
        .content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let mut footer_lines = vec![
        format!("Generated on: {}", story.created_date_long()),
        format!("Theme: {}", story.theme),
        format!("Age Group: {}", story.age_group),
    ];
    if let Some(name) = story.child_name.as_deref().filter(|n| !n.is_empty()) {
        footer_lines.push(format!("Created for: {name}"));
    }

    StoryLayout {
        title: story.title.clone(),
        paragraphs,
        footer_lines,
    }
}

/// 按单词折行，行宽以字符数近似
///
/// 超长单词独占一行，不截断。
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
