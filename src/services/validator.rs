//! 请求校验 - 业务能力层
//!
//! 把 HTTP 层递进来的松散 JSON 记录收紧成类型化的 FeedbackRequest。
//! 所有拒绝都携带稳定错误码和可供调用方二次提示用户的上下文数据。

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::ValidationError;
use crate::models::{FeedbackRequest, Paper, QuestionType};

/// 校验原始提交记录
///
/// 按固定顺序检查：paper → questionType → examQuestion → studentResponse → extractText。
/// paper 与 questionType 是联合约束：题型必须落在已确认试卷的允许集合内。
///
/// 成功时返回恰好五个语义字段的 FeedbackRequest，丢弃一切未知输入字段。
pub fn validate(raw: &JsonValue) -> Result<FeedbackRequest, ValidationError> {
    // 校验 paper
    let paper = match raw.get("paper").and_then(JsonValue::as_str) {
        Some(s) => match Paper::from_str(s) {
            Some(p) => p,
            None => {
                debug!("拒绝请求：未知试卷 '{}'", s);
                return Err(ValidationError::InvalidPaper {
                    valid_papers: Paper::valid_names(),
                });
            }
        },
        None => {
            debug!("拒绝请求：paper 缺失或非字符串");
            return Err(ValidationError::InvalidPaper {
                valid_papers: Paper::valid_names(),
            });
        }
    };

    // 校验 questionType（允许集合依赖于已确认的 paper）
    let valid_question_types = || {
        paper
            .question_types()
            .iter()
            .map(|t| t.name().to_string())
            .collect::<Vec<_>>()
    };

    let question_type = match raw.get("questionType").and_then(JsonValue::as_str) {
        Some(s) => match QuestionType::from_str(s) {
            Some(t) if paper.allows(t) => t,
            _ => {
                debug!("拒绝请求：试卷 '{}' 不允许题型 '{}'", paper, s);
                return Err(ValidationError::QuestionTypeNotAllowed {
                    paper: paper.name().to_string(),
                    valid_question_types: valid_question_types(),
                });
            }
        },
        None => {
            debug!("拒绝请求：questionType 缺失或非字符串");
            return Err(ValidationError::MissingQuestionType {
                valid_question_types: valid_question_types(),
            });
        }
    };

    // 校验必填文本字段
    let exam_question = required_text(raw, "examQuestion")?;
    let student_response = required_text(raw, "studentResponse")?;

    // Extract question 必须附材料文本；其余题型按实际提供透传
    let extract_text = raw
        .get("extractText")
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if question_type.requires_extract() && extract_text.is_none() {
        debug!("拒绝请求：Extract question 缺少材料文本");
        return Err(ValidationError::MissingExtractText);
    }

    Ok(FeedbackRequest {
        paper,
        question_type,
        exam_question,
        extract_text,
        student_response,
    })
}

/// 读取必填文本字段，缺失、非字符串或去空白后为空均拒绝
fn required_text(
    raw: &JsonValue,
    field: &'static str,
) -> Result<String, ValidationError> {
    match raw.get(field).and_then(JsonValue::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => {
            debug!("拒绝请求：字段 '{}' 缺失或为空", field);
            Err(ValidationError::MissingField { field })
        }
    }
}
