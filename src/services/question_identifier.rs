//! 题型识别 - 业务能力层
//!
//! 根据题目文本中的分值标记和关键词推测题型。
//! 仅作提示用途：识别结果从不覆盖调用方声明的 questionType，
//! 两者不一致时由调用侧记一条提示日志。

use regex::Regex;

use crate::models::QuestionType;

/// 从题目文本识别可能的题型
///
/// 识别顺序：extract 关键词 → 分值标记（9 / 25 / 30 分）→ 比较类关键词。
/// 9 分题叠加比较类关键词时识别为比较类 9 分题。
/// 无法判断时返回 None。
pub fn identify_question_type(question_text: &str) -> Option<QuestionType> {
    let lower = question_text.to_lowercase();
    let comparative = lower.contains("compare") || lower.contains("contrast");

    if lower.contains("extract") {
        return Some(QuestionType::ExtractQuestion);
    }

    // 分值标记容忍 "[9 marks]" / "(9 marks)" / "9 marks" 写法
    let marks = Regex::new(r"[\[(]?\s*(\d+)\s*marks?\s*[\])]?").ok()?;
    if let Some(cap) = marks.captures(&lower) {
        match cap.get(1).map(|m| m.as_str()) {
            Some("9") => {
                return Some(if comparative {
                    QuestionType::ComparativeNineMarker
                } else {
                    QuestionType::NineMarker
                });
            }
            Some("25") => return Some(QuestionType::Essay),
            Some("30") => return Some(QuestionType::ComparativeEssay),
            _ => {}
        }
    }

    if comparative {
        return Some(QuestionType::ComparativeEssay);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifies_nine_marker_from_mark_tag() {
        assert_eq!(
            identify_question_type("Explain three ways the House of Lords scrutinises government. [9 marks]"),
            Some(QuestionType::NineMarker)
        );
    }

    #[test]
    fn test_identifies_comparative_nine_marker() {
        assert_eq!(
            identify_question_type("Compare the committee systems of the US and UK. [9 marks]"),
            Some(QuestionType::ComparativeNineMarker)
        );
    }

    #[test]
    fn test_identifies_essay_tiers() {
        assert_eq!(
            identify_question_type("Evaluate the view that the UK constitution needs codifying. [25 marks]"),
            Some(QuestionType::Essay)
        );
        assert_eq!(
            identify_question_type("Analyse the significance of federalism. [30 marks]"),
            Some(QuestionType::ComparativeEssay)
        );
    }

    #[test]
    fn test_extract_keyword_wins() {
        assert_eq!(
            identify_question_type("Using the extract, evaluate the argument made. [25 marks]"),
            Some(QuestionType::ExtractQuestion)
        );
    }

    #[test]
    fn test_unknown_text_gives_none() {
        assert_eq!(identify_question_type("Discuss devolution in Wales."), None);
    }
}
