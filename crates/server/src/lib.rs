//! StoryNest HTTP 服务
//!
//! 包含路由、请求处理器、HTML 页面构建和错误响应映射。

pub mod html;
pub mod response;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// 组装路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::pages::home))
        .route("/api/status", get(routes::api::status))
        .route("/api/themes", get(routes::api::themes))
        .route("/generate", post(routes::api::generate))
        .route("/stories", get(routes::pages::list_stories))
        .route("/story/:id", get(routes::pages::view_story))
        .route(
            "/story/:id/edit",
            get(routes::pages::edit_story_form).post(routes::pages::edit_story_submit),
        )
        .route("/story/:id/delete", post(routes::pages::delete_story))
        .route("/story/:id/pdf", get(routes::pages::export_pdf))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
