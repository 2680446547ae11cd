//! 补全服务客户端
//!
//! 封装对上游文本补全服务（Anthropic messages 风格 API）的单次调用。
//! 每次流水线运行恰好发出一个请求：不重试，单次失败即单次流水线失败。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::RenderedPrompt;

/// 生成参数：输出长度上限
const MAX_TOKENS: u32 = 800;

/// 生成参数：中等采样温度，偏向多样但连贯的行文
const TEMPERATURE: f32 = 0.7;

/// 补全请求体
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// 单条消息
#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// 补全响应信封
#[derive(Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

/// 响应内容块
#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// 补全服务客户端
///
/// 进程启动时随配置构造一次，此后以只读引用注入流水线复用。
/// 内部的 reqwest 客户端自带连接池，可安全地跨并发调用共享。
pub struct LlmClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl LlmClient {
    /// 创建新的补全客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.claude_api_key.clone(),
            endpoint: config.claude_api_endpoint.clone(),
            model: config.claude_model.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// 发送一次补全请求，返回回复首段文本
    ///
    /// 非 2xx 状态、传输失败、信封缺少文本内容均映射为 UpstreamError，
    /// 携带状态码与响应体便于诊断。上游原本没有超时约束，
    /// 这里按配置施加了有界超时，超时同样表现为传输失败。
    pub async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, UpstreamError> {
        debug!(
            "调用补全 API，模型: {}，用户内容长度: {} 字符",
            self.model,
            prompt.user_content.len()
        );

        let body = CompletionRequest {
            model: &self.model,
            system: &prompt.system_instruction,
            messages: vec![Message {
                role: "user",
                content: &prompt.user_content,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("补全请求传输失败: {}", e);
                UpstreamError::RequestFailed {
                    endpoint: self.endpoint.clone(),
                    source: Box::new(e),
                }
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| {
            warn!("读取补全响应体失败: {}", e);
            UpstreamError::RequestFailed {
                endpoint: self.endpoint.clone(),
                source: Box::new(e),
            }
        })?;

        if !status.is_success() {
            warn!("补全请求返回非 2xx 状态: {}", status);
            return Err(UpstreamError::BadStatus {
                status: status.as_u16(),
                body: body_text,
            });
        }

        // 取信封的首段文本作为原始回复
        let envelope: CompletionResponse = serde_json::from_str(&body_text).map_err(|e| {
            warn!("补全响应信封解码失败: {}", e);
            UpstreamError::EmptyContent { body: body_text.clone() }
        })?;

        let reply = envelope
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| {
                warn!("补全响应信封不含内容块");
                UpstreamError::EmptyContent { body: body_text }
            })?;

        debug!("补全调用成功，回复长度: {} 字符", reply.len());

        Ok(reply)
    }
}
