//! 提示词构建 - 业务能力层
//!
//! 把类型化的 FeedbackRequest 确定性地渲染为上游补全服务的
//! 系统指令 + 用户内容。纯函数，无 I/O，无失败路径。

use crate::models::{FeedbackRequest, QuestionType, RenderedPrompt};

/// 固定的系统指令：评分人设与评分标准背景，不随输入变化
const SYSTEM_INSTRUCTION: &str = "You are an experienced A-Level Politics teacher grading \
student responses. Provide detailed, constructive feedback based on AQA marking criteria. \
Tailor your feedback based on the paper and question type provided.";

/// 渲染提示词
///
/// 模板字段顺序固定：paper → questionType → examQuestion →（extractText）→ studentResponse。
/// 结构相等的两个请求必然产出逐字节相同的 RenderedPrompt。
///
/// 模板末尾声明了机器可读的输出契约（四个数组字段的扁平 JSON），
/// 并要求模型只输出该 JSON；即便如此，后续提取器仍需容忍多余文本。
pub fn build(req: &FeedbackRequest) -> RenderedPrompt {
    // 材料行只在材料存在时插入
    let extract_part = match &req.extract_text {
        Some(text) => format!("- Extract Text: {}\n", text),
        None => String::new(),
    };

    let user_content = format!(
        r#"Analyze the following student response in detail. Provide strengths, weaknesses, improvements, and technicalNotes.

Feedback Context:
- Paper: {}
- Question Type: {}
- Exam Question: {}
{}
Student Response:
{}

Guidelines:
- {}
- Avoid boilerplate remarks; provide detailed, personalized feedback.
- Include technical notes on vocabulary, linking evidence, paragraph structure, and overall relevance.

Return your answer strictly as valid JSON with exactly these properties: strengths, weaknesses, improvements, technicalNotes (each a flat array of strings). Output only the JSON object and nothing else."#,
        req.paper,
        req.question_type,
        req.exam_question,
        extract_part,
        req.student_response,
        guidance(req.question_type),
    );

    RenderedPrompt {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_content,
    }
}

/// 按题型族选择指导语
///
/// 仅影响提示词文案，不产生不同的输出形状
fn guidance(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::ExtractQuestion => {
            "Focus on key quotes, provenance, and integration of wider knowledge."
        }
        QuestionType::NineMarker | QuestionType::ComparativeNineMarker => {
            "Emphasize three distinct analytical points with robust evidence."
        }
        QuestionType::Essay | QuestionType::ComparativeEssay => {
            "Focus on sustained analysis, synoptic links, current examples, and well-rounded evaluation."
        }
    }
}
