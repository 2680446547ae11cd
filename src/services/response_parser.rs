//! 响应解析 - 业务能力层
//!
//! 上游模型的回复不可信：JSON 主体前后可能夹杂解说、markdown
//! 代码围栏等多余文本，字段可能缺失，甚至完全不可解析。
//! 本模块分两步兜底：先定位回复中的平衡 JSON 对象，
//! 再把解析结果规整成形状有保证的 FeedbackResponse。

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{ExtractionError, ParseError};
use crate::models::FeedbackResponse;

/// 提取回复中第一个平衡的 JSON 对象
///
/// 花括号配平扫描，线性时间：从第一个 '{' 起维护深度计数，
/// 计数首次归零处即对象结尾（含）。后续再出现的 JSON 一律忽略。
///
/// 已知简化：不区分字符串字面量内部的花括号——上游被要求输出
/// 纯 JSON 反馈文本，其中出现未转义的结构性花括号极为罕见，
/// 真正的语法错误会在下一步解析时被捕获。
pub fn extract_json_object(reply: &str) -> Result<&str, ExtractionError> {
    let start = reply.find('{').ok_or(ExtractionError::NoJsonStart)?;

    let mut depth: i64 = 0;
    for (i, b) in reply.as_bytes().iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&reply[start..=i]);
                }
            }
            _ => {}
        }
    }

    Err(ExtractionError::Unbalanced)
}

/// 把候选 JSON 串规整成 FeedbackResponse
///
/// 四个期望字段中，凡是数组就原样采用（元素统一转为字符串显示形式），
/// 缺失或类型不符的一律归一为空序列——调用方拿到的永远是完整形状。
/// 本层只保证形状，不伪造占位内容。
pub fn normalize(candidate: &str) -> Result<FeedbackResponse, ParseError> {
    let parsed: JsonValue = serde_json::from_str(candidate)
        .map_err(|source| ParseError::MalformedJson { source })?;

    let response = FeedbackResponse {
        strengths: string_items(parsed.get("strengths")),
        weaknesses: string_items(parsed.get("weaknesses")),
        improvements: string_items(parsed.get("improvements")),
        technical_notes: string_items(parsed.get("technicalNotes")),
    };

    debug!(
        "规整完成：strengths={} weaknesses={} improvements={} technicalNotes={}",
        response.strengths.len(),
        response.weaknesses.len(),
        response.improvements.len(),
        response.technical_notes.len(),
    );

    Ok(response)
}

/// 字段为数组时逐元素转为字符串显示形式，否则归一为空序列
fn string_items(field: Option<&JsonValue>) -> Vec<String> {
    match field.and_then(JsonValue::as_array) {
        Some(items) => items
            .iter()
            .map(|item| match item.as_str() {
                Some(s) => s.to_string(),
                None => item.to_string(),
            })
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_balanced_object() {
        let reply = r#"noise {"a":1} trailing noise {"b":2}"#;
        assert_eq!(extract_json_object(reply).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_extracts_nested_object() {
        let reply = r#"Here is my analysis: {"outer":{"inner":[1,2]},"x":"y"} done"#;
        assert_eq!(
            extract_json_object(reply).unwrap(),
            r#"{"outer":{"inner":[1,2]},"x":"y"}"#
        );
    }

    #[test]
    fn test_no_json_start() {
        let err = extract_json_object("the model refused to answer").unwrap_err();
        assert_eq!(err, ExtractionError::NoJsonStart);
        assert_eq!(err.kind(), "no-json-start");
    }

    #[test]
    fn test_unbalanced() {
        let err = extract_json_object(r#"{"a": [1,2"#).unwrap_err();
        assert_eq!(err, ExtractionError::Unbalanced);
        assert_eq!(err.kind(), "unbalanced");
    }

    #[test]
    fn test_tolerates_markdown_fences() {
        let reply = "```json\n{\"strengths\":[\"x\"]}\n```";
        assert_eq!(
            extract_json_object(reply).unwrap(),
            r#"{"strengths":["x"]}"#
        );
    }

    #[test]
    fn test_normalize_total_shape_guarantee() {
        // 其余三个字段缺失也必须以空序列形式存在
        let resp = normalize(r#"{"strengths":["x"]}"#).unwrap();
        assert_eq!(resp.strengths, vec!["x".to_string()]);
        assert!(resp.weaknesses.is_empty());
        assert!(resp.improvements.is_empty());
        assert!(resp.technical_notes.is_empty());
    }

    #[test]
    fn test_normalize_coerces_non_string_elements() {
        let resp = normalize(r#"{"weaknesses":[1,true,"ok"]}"#).unwrap();
        assert_eq!(
            resp.weaknesses,
            vec!["1".to_string(), "true".to_string(), "ok".to_string()]
        );
    }

    #[test]
    fn test_normalize_wrong_typed_field_becomes_empty() {
        let resp = normalize(r#"{"strengths":"not an array","improvements":{"a":1}}"#).unwrap();
        assert!(resp.strengths.is_empty());
        assert!(resp.improvements.is_empty());
    }

    #[test]
    fn test_normalize_never_fabricates_content() {
        let resp = normalize("{}").unwrap();
        // 空就是空，不填充 "No strengths provided" 之类的占位文案
        assert_eq!(resp, FeedbackResponse::default());
    }

    #[test]
    fn test_normalize_malformed_json() {
        let err = normalize(r#"{"strengths": [,]}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed-json");
    }
}
