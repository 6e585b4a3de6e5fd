//! OpenAI Chat Completions 客户端
//!
//! 只覆盖故事生成需要的最小接口：单轮非流式补全。
//! 错误按 HTTP 状态码和 API 错误码分类为 GenerateError 的具体类型，
//! 不对错误消息文本做关键字匹配。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use storynest_core::errors::GenerateError;

/// 使用的模型
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// 单次请求超时
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 连接超时
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// 请求 / 响应数据模型
// ============================================================================

/// 对话消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// OpenAI 错误响应体
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize, Default)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

// ============================================================================
// 客户端
// ============================================================================

/// OpenAI API 客户端
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// 创建客户端，带显式请求超时
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GenerateError::Config(format!("HTTP 客户端构建失败: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// 发送一次补全请求，返回首个 choice 的文本内容
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerateError> {
        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL,
            messages,
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GenerateError::InvalidResponse("响应中没有可用的 choice".into()))?;

        Ok(content)
    }
}

// ============================================================================
// 错误分类
// ============================================================================

/// 传输层错误映射：超时和连接失败视为暂时性错误
fn map_transport_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() || err.is_connect() {
        GenerateError::Transient(err.to_string())
    } else {
        GenerateError::Unknown(err.to_string())
    }
}

/// 按状态码和 API 错误码选择错误类型
///
/// - 401 或 `invalid_api_key` → Config
/// - 429 或 `insufficient_quota` / billing 类错误码 → Quota
/// - 5xx → Transient
fn classify_api_error(status: u16, body: &str) -> GenerateError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_default();

    let code = detail.code.as_deref().unwrap_or("");
    let kind = detail.kind.as_deref().unwrap_or("");
    let message = if detail.message.is_empty() {
        format!("HTTP {status}")
    } else {
        detail.message.clone()
    };

    if status == 401 || code == "invalid_api_key" {
        return GenerateError::Config(message);
    }
    if status == 429 || code == "insufficient_quota" || kind == "billing" {
        return GenerateError::Quota(message);
    }
    if status >= 500 {
        return GenerateError::Transient(message);
    }
    GenerateError::Unknown(message)
}
