//! 路由集成测试
//!
//! 用内存 SQLite 和离线模式生成器构建完整路由，
//! 通过 tower 的 oneshot 逐个请求验证行为。

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use storynest_core::{config::AppConfig, database};
use storynest_providers::StoryGenerator;
use storynest_server::{router, AppState};
use tower::ServiceExt;

/// 构建离线模式下的测试应用（带种子主题）
fn test_app() -> Router {
    let conn = database::open_in_memory().expect("open db");
    database::seed_default_themes(&conn).expect("seed themes");

    let config = AppConfig::from_lookup(|_| None);
    let generator = StoryGenerator::new(&config).expect("build generator");
    router(AppState::new(conn, generator, config))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("collect body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

async fn generate_story(app: &Router, theme: &str, child_name: &str) -> serde_json::Value {
    let payload = serde_json::json!({ "theme": theme, "child_name": child_name });
    let response = app
        .clone()
        .oneshot(
            Request::post("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("build request"),
        )
        .await
        .expect("send request");

    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_string(response).await).expect("parse json")
}

#[tokio::test]
async fn should_report_demo_mode_on_status_endpoint() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("parse json");
    assert_eq!(json["demo_mode"], true);
    assert_eq!(json["openai_configured"], false);
}

#[tokio::test]
async fn should_reject_generate_without_theme() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::post("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"theme":"   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("parse json");
    assert_eq!(json["error"], "Theme is required");
}

#[tokio::test]
async fn should_generate_and_persist_demo_story() {
    let app = test_app();
    let json = generate_story(&app, "space adventure", "Mia").await;

    assert_eq!(json["success"], true);
    assert_eq!(json["demo"], true);
    assert_eq!(json["story"]["title"], "Mia and the Sleepy Stars");
    assert!(json["story"]["content"]
        .as_str()
        .expect("content string")
        .contains("Mia"));
    assert!(json["story"]["id"].as_i64().expect("story id") > 0);
}

#[tokio::test]
async fn should_accept_form_encoded_generate() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::post("/generate")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("theme=friendly+dragon&child_name=Leo"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("parse json");
    assert_eq!(json["story"]["title"], "Leo and the Rainbow Dragon");
}

#[tokio::test]
async fn should_list_newest_story_first_after_create() {
    let app = test_app();
    generate_story(&app, "brave princess", "Ada").await;
    let second = generate_story(&app, "underwater kingdom", "Sam").await;
    let latest_title = second["story"]["title"].as_str().expect("title");

    let response = app
        .clone()
        .oneshot(Request::get("/stories").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    let latest_pos = html.find(latest_title).expect("latest story listed");
    let older_pos = html
        .find("Ada and the Crystal Castle")
        .expect("older story listed");
    assert!(latest_pos < older_pos, "最新故事必须排在最前");
}

#[tokio::test]
async fn should_view_story_and_404_on_missing_id() {
    let app = test_app();
    let json = generate_story(&app, "magical forest", "Ida").await;
    let id = json["story"]["id"].as_i64().expect("id");

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/story/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response)
        .await
        .contains("Ida and the Whispering Trees"));

    let response = app
        .clone()
        .oneshot(Request::get("/story/99999").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_edit_only_title_and_notes() {
    let app = test_app();
    let json = generate_story(&app, "space adventure", "Mia").await;
    let id = json["story"]["id"].as_i64().expect("id");

    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/story/{id}/edit"))
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("title=New+Title&user_notes=loved+it"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/story/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = body_string(response).await;
    assert!(html.contains("New Title"));
    assert!(html.contains("loved it"));
    // 主题与正文不变
    assert!(html.contains("space adventure"));
    assert!(html.contains("Sleepy Stars") || html.contains("moonbeam dust"));
}

#[tokio::test]
async fn should_404_on_edit_of_missing_story() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::post("/story/424242/edit")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("title=X&user_notes="))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_delete_story_and_error_on_repeat() {
    let app = test_app();
    let json = generate_story(&app, "talking toys", "Ben").await;
    let id = json["story"]["id"].as_i64().expect("id");

    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/story/{id}/delete"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // 重复删除是错误而不是 no-op
    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/story/{id}/delete"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_export_pdf_with_attachment_filename() {
    let app = test_app();
    let json = generate_story(&app, "space adventure", "Mia").await;
    let id = json["story"]["id"].as_i64().expect("id");

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/story/{id}/pdf"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"Mia_and_the_Sleepy_Stars.pdf\"")
    );

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("collect body");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn should_404_on_pdf_of_missing_story() {
    let app = test_app();
    let response = app
        .oneshot(Request::get("/story/31337/pdf").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_rank_generated_theme_on_top_of_api_themes() {
    let app = test_app();
    // 种子分数 1，两次生成后 space adventure 应为 3 分居首
    generate_story(&app, "Space Adventure", "Mia").await;
    generate_story(&app, "space adventure", "Tom").await;

    let response = app
        .clone()
        .oneshot(Request::get("/api/themes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("parse json");
    let themes = json.as_array().expect("array");
    assert_eq!(themes.len(), 8, "大小写不同的主题不应产生新条目");
    assert_eq!(themes[0]["name"], "space adventure");
    assert_eq!(themes[0]["popularity"], 3);
}

#[tokio::test]
async fn should_render_home_page_with_demo_banner() {
    let app = test_app();
    generate_story(&app, "space adventure", "Mia").await;

    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Demo mode"));
    assert!(html.contains("Mia and the Sleepy Stars"));
    assert!(html.contains("Popular Themes"));
}
