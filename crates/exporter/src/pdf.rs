//! PDF 渲染
//!
//! 用 printpdf 的内置 Helvetica 字体把版面渲染到 US Letter 页面，
//! 上下边距各 1 英寸。分页只在光标到达下边距时发生，
//! 没有分栏、图片或其他排版逻辑。

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocumentReference, PdfDocument, PdfLayerReference};
use storynest_core::errors::ExportError;

use crate::layout::{wrap_text, StoryLayout};

/// US Letter 页宽（mm）
const PAGE_WIDTH: f64 = 215.9;

/// US Letter 页高（mm）
const PAGE_HEIGHT: f64 = 279.4;

/// 上下左右边距：1 英寸
const MARGIN: f64 = 25.4;

/// 标题字号（pt）
const TITLE_SIZE: f64 = 18.0;

/// 正文字号（pt）
const BODY_SIZE: f64 = 12.0;

/// 页脚字号（pt）
const FOOTER_SIZE: f64 = 10.0;

/// 标题后的间距（pt）
const TITLE_SPACE_AFTER: f64 = 30.0;

/// 段落后的间距（pt）
const PARAGRAPH_SPACE_AFTER: f64 = 12.0;

/// 页脚前的间距（pt）
const FOOTER_SPACE_BEFORE: f64 = 30.0;

/// 行高系数
const LINE_HEIGHT_FACTOR: f64 = 1.4;

/// Helvetica 平均字符宽度系数（相对字号的近似值）
const AVG_CHAR_WIDTH_FACTOR: f64 = 0.5;

fn pt_to_mm(pt: f64) -> f64 {
    pt * 0.352_778
}

/// 内部计算统一用 f64，只在 printpdf 边界转换
fn mm(value: f64) -> Mm {
    Mm(value as _)
}

/// 按字号估算一行能容纳的字符数
fn max_chars_for(font_size: f64) -> usize {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    let char_width = pt_to_mm(font_size * AVG_CHAR_WIDTH_FACTOR);
    (usable / char_width).floor() as usize
}

/// 估算一段文本的渲染宽度（mm），用于标题居中
fn estimate_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * pt_to_mm(font_size * AVG_CHAR_WIDTH_FACTOR)
}

/// 渲染光标：跟踪当前页、图层和纵向位置
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
}

impl<'a> Cursor<'a> {
    /// 下移 `step` 毫米，越过下边距时开新页
    fn advance(&mut self, step: f64) {
        self.y -= step;
        if self.y < MARGIN {
            let (page, layer) = self.doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text(&self, content: &str, font_size: f64, x: f64, font: &IndirectFontRef) {
        self.layer
            .use_text(content, font_size as _, mm(x), mm(self.y), font);
    }
}

/// 把版面渲染为 PDF 字节流
pub fn render_pdf(layout: &StoryLayout) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        layout.title.clone(),
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    {
        let mut cursor = Cursor {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
        };

        // 标题块：居中
        for line in wrap_text(&layout.title, max_chars_for(TITLE_SIZE)) {
            let x = ((PAGE_WIDTH - estimate_width(&line, TITLE_SIZE)) / 2.0).max(MARGIN);
            cursor.text(&line, TITLE_SIZE, x, &title_font);
            cursor.advance(pt_to_mm(TITLE_SIZE * LINE_HEIGHT_FACTOR));
        }
        cursor.advance(pt_to_mm(TITLE_SPACE_AFTER));

        // 正文段落
        let body_width = max_chars_for(BODY_SIZE);
        for paragraph in &layout.paragraphs {
            for line in wrap_text(paragraph, body_width) {
                cursor.text(&line, BODY_SIZE, MARGIN, &body_font);
                cursor.advance(pt_to_mm(BODY_SIZE * LINE_HEIGHT_FACTOR));
            }
            cursor.advance(pt_to_mm(PARAGRAPH_SPACE_AFTER));
        }

        // 元信息页脚
        cursor.advance(pt_to_mm(FOOTER_SPACE_BEFORE));
        for line in &layout.footer_lines {
            cursor.text(line, FOOTER_SIZE, MARGIN, &body_font);
            cursor.advance(pt_to_mm(FOOTER_SIZE * LINE_HEIGHT_FACTOR));
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Render(e.to_string()))?;

    tracing::debug!("[导出] PDF 渲染完成: {} bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_minimal_layout() {
        let layout = StoryLayout {
            title: "A Quiet Night".into(),
            paragraphs: vec!["Para one.".into(), "Para two.".into()],
            footer_lines: vec!["Theme: dragons".into()],
        };

        let bytes = render_pdf(&layout).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn should_render_long_content_across_pages() {
        let paragraph = "sleepy ".repeat(200);
        let layout = StoryLayout {
            title: "Long Story".into(),
            paragraphs: (0..20).map(|_| paragraph.trim().to_string()).collect(),
            footer_lines: vec!["Theme: long".into()],
        };

        let bytes = render_pdf(&layout).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
        // 多页文档明显大于单页
        assert!(bytes.len() > 4_000);
    }

    #[test]
    fn should_be_deterministic_for_same_layout() {
        let layout = StoryLayout {
            title: "Same".into(),
            paragraphs: vec!["One.".into()],
            footer_lines: vec!["Theme: x".into()],
        };

        let a = render_pdf(&layout).expect("render a");
        let b = render_pdf(&layout).expect("render b");
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn should_estimate_line_capacity_from_font_size() {
        // 字号越大，单行可容纳字符越少
        assert!(max_chars_for(18.0) < max_chars_for(12.0));
        assert!(max_chars_for(12.0) > 50);
    }
}
