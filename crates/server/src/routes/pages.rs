//! HTML 页面与 PDF 导出处理器
//!
//! 变更类表单提交成功后统一 303 重定向；
//! id 不存在时返回 404，处理器不会 panic。

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use storynest_core::database::dao::{StoryDao, ThemeDao};
use storynest_core::models::story_model::Story;
use storynest_core::StoryError;

use crate::html;
use crate::response::ApiError;
use crate::state::AppState;

/// 首页展示的最近故事数
const HOME_RECENT_LIMIT: u32 = 5;

/// 首页展示的热门主题数
const HOME_THEME_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub user_notes: String,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let conn = state.db.lock().await;
    let recent = StoryDao::recent(&conn, HOME_RECENT_LIMIT)?;
    let themes = ThemeDao::top(&conn, HOME_THEME_LIMIT)
        .map_err(|e| ApiError::Internal(format!("Database error: {e}")))?;

    Ok(Html(html::home_page(
        &recent,
        &themes,
        state.generator.demo_mode(),
    )))
}

/// GET /stories?page=N
pub async fn list_stories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, ApiError> {
    let conn = state.db.lock().await;
    let page = StoryDao::list_page(&conn, params.page.unwrap_or(1))?;
    Ok(Html(html::stories_page(&page)))
}

/// GET /story/:id
pub async fn view_story(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let conn = state.db.lock().await;
    let story = get_or_404(&conn, id)?;
    Ok(Html(html::story_page(&story)))
}

/// GET /story/:id/edit
pub async fn edit_story_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let conn = state.db.lock().await;
    let story = get_or_404(&conn, id)?;
    Ok(Html(html::edit_page(&story)))
}

/// POST /story/:id/edit - 只更新 title 和 user_notes
pub async fn edit_story_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, ApiError> {
    let conn = state.db.lock().await;
    // 标题留空时保留原值，与笔记不同（笔记允许清空）
    let title = if form.title.trim().is_empty() {
        get_or_404(&conn, id)?.title
    } else {
        form.title.trim().to_string()
    };
    StoryDao::update_editable(&conn, id, &title, &form.user_notes)?;

    Ok(Redirect::to(&format!("/story/{id}")))
}

/// POST /story/:id/delete
pub async fn delete_story(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    let conn = state.db.lock().await;
    StoryDao::delete(&conn, id)?;
    tracing::info!("[故事] 已删除: id={}", id);

    Ok(Redirect::to("/stories"))
}

/// GET /story/:id/pdf
pub async fn export_pdf(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let story = {
        let conn = state.db.lock().await;
        get_or_404(&conn, id)?
    };

    let bytes = storynest_exporter::export_story(&story)?;
    let disposition = format!("attachment; filename=\"{}\"", story.export_filename());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

fn get_or_404(conn: &rusqlite::Connection, id: i64) -> Result<Story, ApiError> {
    match StoryDao::get(conn, id) {
        Ok(Some(story)) => Ok(story),
        Ok(None) => Err(StoryError::NotFound(id).into()),
        Err(err) => Err(err.into()),
    }
}
