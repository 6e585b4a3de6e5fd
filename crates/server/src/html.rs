//! HTML 页面构建
//!
//! 用 format! 拼接的轻量页面，不引入模板引擎。
//! 所有用户可控文本都经过 `escape_html`。

use storynest_core::models::story_model::{Story, StoryPage, Theme};

/// HTML 转义
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 公共页面外壳
fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - StoryNest</title>\n\
         <style>\n\
         body {{ font-family: Georgia, serif; max-width: 760px; margin: 0 auto; padding: 1rem; color: #333; }}\n\
         header a {{ text-decoration: none; color: #5a4fcf; }}\n\
         .banner {{ background: #fff3cd; border: 1px solid #ffeeba; padding: .5rem 1rem; border-radius: 4px; }}\n\
         .story-card {{ border: 1px solid #ddd; border-radius: 6px; padding: 1rem; margin: .75rem 0; }}\n\
         .meta {{ color: #777; font-size: .85rem; }}\n\
         .pagination a {{ margin-right: 1rem; }}\n\
         form label {{ display: block; margin-top: .75rem; }}\n\
         input, select, textarea {{ width: 100%; padding: .4rem; }}\n\
         button {{ margin-top: 1rem; padding: .5rem 1.25rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <header><h1><a href=\"/\">StoryNest</a></h1>\
         <nav><a href=\"/\">Home</a> | <a href=\"/stories\">My Stories</a></nav></header>\n\
         {body}\n\
         </body>\n\
         </html>",
        title = escape_html(title),
        body = body,
    )
}

fn story_card(story: &Story) -> String {
    format!(
        "<div class=\"story-card\">\
         <h3><a href=\"/story/{id}\">{title}</a></h3>\
         <p class=\"meta\">Theme: {theme} · Age: {age} · {date}</p>\
         </div>",
        id = story.id,
        title = escape_html(&story.title),
        theme = escape_html(&story.theme),
        age = escape_html(&story.age_group),
        date = story.created_date_long(),
    )
}

/// 首页：生成表单 + 最近故事 + 热门主题
pub fn home_page(recent: &[Story], themes: &[Theme], demo_mode: bool) -> String {
    let banner = if demo_mode {
        "<p class=\"banner\">Demo mode: stories come from a built-in collection. \
         Set OPENAI_API_KEY to enable AI generation.</p>"
    } else {
        ""
    };

    let theme_list = themes
        .iter()
        .map(|t| {
            format!(
                "<li>{} <span class=\"meta\">({})</span></li>",
                escape_html(&t.name),
                t.popularity_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let recent_list = recent.iter().map(story_card).collect::<Vec<_>>().join("\n");

    let body = format!(
        "{banner}\n\
         <h2>Create a Bedtime Story</h2>\n\
         <form method=\"post\" action=\"/generate\">\n\
         <label>Theme <input name=\"theme\" required placeholder=\"e.g. space adventure\"></label>\n\
         <label>Age group <input name=\"age_group\" value=\"6\"></label>\n\
         <label>Child's name (optional) <input name=\"child_name\"></label>\n\
         <label>Length <select name=\"story_length\">\n\
         <option value=\"short\">Short (2-3 minutes)</option>\n\
         <option value=\"medium\" selected>Medium (5-7 minutes)</option>\n\
         <option value=\"long\">Long (8-10 minutes)</option>\n\
         </select></label>\n\
         <button type=\"submit\">Generate Story</button>\n\
         </form>\n\
         <h2>Recent Stories</h2>\n{recent_list}\n\
         <h2>Popular Themes</h2>\n<ul>{theme_list}</ul>",
    );

    page_shell("Home", &body)
}

/// 故事列表页（分页）
pub fn stories_page(page: &StoryPage) -> String {
    let cards = if page.stories.is_empty() {
        "<p>No stories yet. <a href=\"/\">Create one!</a></p>".to_string()
    } else {
        page.stories.iter().map(story_card).collect::<Vec<_>>().join("\n")
    };

    let mut nav = String::from("<p class=\"pagination\">");
    if page.has_prev() {
        nav.push_str(&format!(
            "<a href=\"/stories?page={}\">&laquo; Previous</a>",
            page.page - 1
        ));
    }
    nav.push_str(&format!("Page {} of {}", page.page, page.pages.max(1)));
    if page.has_next() {
        nav.push_str(&format!(
            " <a href=\"/stories?page={}\">Next &raquo;</a>",
            page.page + 1
        ));
    }
    nav.push_str("</p>");

    let body = format!("<h2>My Stories ({} total)</h2>\n{cards}\n{nav}", page.total);
    page_shell("My Stories", &body)
}

/// 故事详情页
pub fn story_page(story: &Story) -> String {
    let paragraphs = story
        .content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect::<Vec<_>>()
        .join("\n");

    let notes = match story.user_notes.as_deref().filter(|n| !n.is_empty()) {
        Some(notes) => format!("<h3>Notes</h3><p>{}</p>", escape_html(notes)),
        None => String::new(),
    };

    let body = format!(
        "<h2>{title}</h2>\n\
         <p class=\"meta\">Theme: {theme} · Age: {age} · {date}</p>\n\
         {paragraphs}\n\
         {notes}\n\
         <p>\n\
         <a href=\"/story/{id}/pdf\">Download PDF</a> | \
         <a href=\"/story/{id}/edit\">Edit</a>\n\
         </p>\n\
         <form method=\"post\" action=\"/story/{id}/delete\" \
         onsubmit=\"return confirm('Delete this story?')\">\
         <button type=\"submit\">Delete</button></form>",
        title = escape_html(&story.title),
        theme = escape_html(&story.theme),
        age = escape_html(&story.age_group),
        date = story.created_date_long(),
        id = story.id,
    );
    page_shell(&story.title, &body)
}

/// 编辑页：仅 title 和 user_notes 可编辑
pub fn edit_page(story: &Story) -> String {
    let body = format!(
        "<h2>Edit Story</h2>\n\
         <form method=\"post\" action=\"/story/{id}/edit\">\n\
         <label>Title <input name=\"title\" value=\"{title}\" required></label>\n\
         <label>Notes <textarea name=\"user_notes\" rows=\"4\">{notes}</textarea></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <p><a href=\"/story/{id}\">Cancel</a></p>",
        id = story.id,
        title = escape_html(&story.title),
        notes = escape_html(story.user_notes.as_deref().unwrap_or("")),
    );
    page_shell("Edit Story", &body)
}
