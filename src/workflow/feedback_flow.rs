//! 反馈生成流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整处理流程
//!
//! 流程顺序（严格线性，无环无重试，任一阶段失败即终止）：
//! 校验 → 构建提示词 → 调用补全 → 提取 JSON → 规整结果

use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::clients::LlmClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::FeedbackResponse;
use crate::services::{extract_json_object, normalize, prompt_builder, validate};
use crate::utils::logging;

/// 反馈生成流程
///
/// - 编排完整的五阶段流水线
/// - 持有随配置构造一次的补全客户端（注入复用，不是可变单例）
/// - 调用之间不保留任何状态，可安全重入
pub struct FeedbackFlow {
    llm_client: LlmClient,
}

impl FeedbackFlow {
    /// 创建新的反馈生成流程
    pub fn new(config: &Config) -> Self {
        Self {
            llm_client: LlmClient::new(config),
        }
    }

    /// 处理一次原始提交
    ///
    /// 输入是 HTTP 层递进来的松散 JSON 记录，输出要么是形状有保证的
    /// FeedbackResponse，要么是标记了失败阶段与原因的 AppError。
    /// 全有或全无：核心内部不存在部分成功或兜底伪造反馈的路径。
    pub async fn run(&self, raw: &JsonValue) -> AppResult<FeedbackResponse> {
        // ========== 阶段 1: 校验 ==========
        let request = validate(raw)?;

        info!(
            "开始生成反馈: {} / {}",
            request.paper, request.question_type
        );
        debug!(
            "题目预览: {}",
            logging::truncate_text(&request.exam_question, 80)
        );

        // ========== 阶段 2: 构建提示词 ==========
        let prompt = prompt_builder::build(&request);
        debug!("提示词渲染完成，{} 字符", prompt.user_content.len());

        // ========== 阶段 3: 调用补全服务 ==========
        let reply = self.llm_client.complete(&prompt).await?;

        // ========== 阶段 4 + 5: 提取并规整 ==========
        let response = self.process_reply(&reply)?;

        info!("✓ 反馈生成完成");

        Ok(response)
    }

    /// 流水线的后半段：从原始回复文本到规整结果
    ///
    /// 单独成函数，便于在不触网的情况下测试提取与规整两个阶段
    pub fn process_reply(&self, reply: &str) -> AppResult<FeedbackResponse> {
        let candidate = extract_json_object(reply).map_err(|e| {
            warn!("⚠️ 回复中未能提取 JSON: {}", e);
            e
        })?;

        debug!("提取出候选 JSON，{} 字符", candidate.len());

        let response = normalize(candidate).map_err(|e| {
            warn!("⚠️ 候选 JSON 解析失败: {}", e);
            e
        })?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_flow() -> FeedbackFlow {
        let config = Config {
            claude_api_key: "test-key".to_string(),
            claude_api_endpoint: "http://127.0.0.1:9".to_string(),
            claude_model: "claude-3-5-haiku-20241022".to_string(),
            request_timeout_secs: 1,
        };
        FeedbackFlow::new(&config)
    }

    #[test]
    fn test_process_reply_with_noisy_text() {
        let flow = test_flow();
        let reply = "Here is my analysis:\n{\"strengths\":[\"Clear structure\"],\"weaknesses\":[],\"improvements\":[\"Add examples\"],\"technicalNotes\":[]}";
        let resp = flow.process_reply(reply).unwrap();
        assert_eq!(resp.strengths, vec!["Clear structure".to_string()]);
        assert_eq!(resp.improvements, vec!["Add examples".to_string()]);
        assert!(resp.weaknesses.is_empty());
        assert!(resp.technical_notes.is_empty());
    }

    #[test]
    fn test_process_reply_without_json_fails() {
        let flow = test_flow();
        let err = flow.process_reply("I cannot help with that.").unwrap_err();
        assert_eq!(err.kind(), "no-json-start");
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_submission_before_any_network_use() {
        // 端点指向丢弃端口：校验失败必须在触网之前短路
        let flow = test_flow();
        let raw = json!({
            "paper": "UK Government and Politics",
            "questionType": "Comparative essay",
            "examQuestion": "q",
            "studentResponse": "a",
        });
        let err = flow.run(&raw).await.unwrap_err();
        assert_eq!(err.kind(), "invalid-question-type");
        assert!(err.is_client_error());
    }
}
