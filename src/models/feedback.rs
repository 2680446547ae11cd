use crate::models::paper::{Paper, QuestionType};
use serde::{Deserialize, Serialize};

/// 反馈请求
///
/// 校验器的输出：恰好五个语义字段，类型已收紧，未知字段在校验时丢弃。
/// 每次入站调用构造一次，随即消费，不做持久化。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// 试卷
    pub paper: Paper,
    /// 题型（已确认在该试卷允许集合内）
    pub question_type: QuestionType,
    /// 考试题目
    pub exam_question: String,
    /// 材料文本（Extract question 必填，其余题型可选）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_text: Option<String>,
    /// 学生作答
    pub student_response: String,
}

/// 渲染后的提示词
///
/// 由 FeedbackRequest 纯函数派生，不可变、无隐藏状态，
/// 相同输入必然产出逐字节相同的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// 固定的系统指令（评分人设 + 评分标准背景）
    pub system_instruction: String,
    /// 插值后的用户内容
    pub user_content: String,
}

/// 反馈响应
///
/// 不变式：四个字段永远以（可能为空的）序列形式存在，
/// 无论上游模型返回了什么
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    /// 优点
    #[serde(default)]
    pub strengths: Vec<String>,
    /// 不足
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// 改进建议
    #[serde(default)]
    pub improvements: Vec<String>,
    /// 技术性批注（用词、论据衔接、段落结构等）
    #[serde(default)]
    pub technical_notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_response_wire_shape() {
        let resp = FeedbackResponse {
            strengths: vec!["Clear structure".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&resp).unwrap();
        // 线上形状为 camelCase，且空字段序列化为空数组而非缺失
        assert_eq!(json["strengths"][0], "Clear structure");
        assert_eq!(json["technicalNotes"], serde_json::json!([]));
        assert_eq!(json["weaknesses"], serde_json::json!([]));
    }

    #[test]
    fn test_feedback_request_serializes_canonical_names() {
        let req = FeedbackRequest {
            paper: Paper::UsAndComparativePolitics,
            question_type: QuestionType::ComparativeEssay,
            exam_question: "q".to_string(),
            extract_text: None,
            student_response: "a".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["paper"], "US and Comparative Politics");
        assert_eq!(json["questionType"], "Comparative essay");
        assert!(json.get("extractText").is_none());
    }
}
