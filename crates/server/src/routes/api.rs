//! JSON 接口处理器
//!
//! 生成接口同时接受 JSON 和表单编码的请求体，按 Content-Type 区分。
//! 生成成功后，故事写入与主题计数更新在同一事务内提交；
//! 生成失败时不产生任何持久化副作用。

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use storynest_core::database::dao::{StoryDao, ThemeDao};
use storynest_core::models::story_model::{NewStory, StoryLength};

use crate::response::ApiError;
use crate::state::AppState;

/// 生成请求体
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub story_length: Option<String>,
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let demo = state.generator.demo_mode();
    Json(json!({
        "demo_mode": demo,
        "openai_configured": !demo,
    }))
}

/// GET /api/themes - 按人气取前 20 个主题
pub async fn themes(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let conn = state.db.lock().await;
    let themes = ThemeDao::top(&conn, 20)
        .map_err(|e| ApiError::Internal(format!("Database error: {e}")))?;

    let payload: Vec<_> = themes
        .iter()
        .map(|t| {
            json!({
                "name": t.name,
                "description": t.description,
                "category": t.category,
                "popularity": t.popularity_score,
            })
        })
        .collect();

    Ok(Json(json!(payload)))
}

/// POST /generate
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request = parse_generate_request(&headers, &body)?;

    let theme = request
        .theme
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Theme is required".into()))?
        .to_string();

    let age_group = request
        .age_group
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or("6")
        .to_string();

    let child_name = request
        .child_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);

    let length = StoryLength::parse(request.story_length.as_deref().unwrap_or_default());

    // 生成失败直接返回，不写任何数据
    let generated = state
        .generator
        .generate(&theme, &age_group, child_name.as_deref(), length)
        .await?;

    let new_story = NewStory {
        title: generated.title,
        content: generated.content,
        theme,
        age_group,
        child_name,
        story_length: length.as_str().to_string(),
    };

    let mut conn = state.db.lock().await;
    let story = StoryDao::insert_with_theme(&mut conn, &new_story)?;

    tracing::info!(
        "[生成] 故事已保存: id={} theme={} demo={}",
        story.id,
        story.theme,
        generated.is_fallback
    );

    Ok(Json(json!({
        "success": true,
        "demo": generated.is_fallback,
        "story": {
            "id": story.id,
            "title": story.title,
            "content": story.content,
            "theme": story.theme,
            "age_group": story.age_group,
            "child_name": story.child_name,
            "created_at": story.created_date().format("%B %d, %Y at %I:%M %p").to_string(),
        }
    })))
}

/// 按 Content-Type 解析请求体：JSON 或表单编码
fn parse_generate_request(headers: &HeaderMap, body: &str) -> Result<GenerateRequest, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/json") {
        serde_json::from_str(body)
            .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {e}")))
    } else {
        serde_urlencoded::from_str(body)
            .map_err(|e| ApiError::Validation(format!("Invalid form body: {e}")))
    }
}
