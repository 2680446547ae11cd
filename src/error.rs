use serde_json::{json, Value as JsonValue};
use std::fmt;

/// 应用程序错误类型
///
/// 五个子类型分别对应流水线的失败阶段：
/// - 校验失败是调用方缺陷，可在不重新请求上游的情况下修复
/// - 上游 / 提取 / 解析失败是服务侧缺陷，直接终止本次请求
#[derive(Debug)]
pub enum AppError {
    /// 请求校验错误
    Validation(ValidationError),
    /// 上游补全服务错误
    Upstream(UpstreamError),
    /// 响应 JSON 提取错误
    Extraction(ExtractionError),
    /// JSON 解析错误
    Parse(ParseError),
    /// 配置错误
    Config(ConfigError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "validation error: {}", e),
            AppError::Upstream(e) => write!(f, "upstream error: {}", e),
            AppError::Extraction(e) => write!(f, "extraction error: {}", e),
            AppError::Parse(e) => write!(f, "parse error: {}", e),
            AppError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Upstream(e) => Some(e),
            AppError::Extraction(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::Config(e) => Some(e),
        }
    }
}

/// 请求校验错误
///
/// 每个变体都携带可供调用方二次提示用户的上下文数据，
/// 避免为了拿到合法取值再发一次请求
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// paper 缺失、非字符串或不在合法集合内
    InvalidPaper { valid_papers: Vec<String> },
    /// questionType 缺失或非字符串
    MissingQuestionType { valid_question_types: Vec<String> },
    /// questionType 不在该 paper 的允许集合内
    QuestionTypeNotAllowed {
        paper: String,
        valid_question_types: Vec<String>,
    },
    /// 必填文本字段缺失、非字符串或去空白后为空
    MissingField { field: &'static str },
    /// Extract question 缺少 extractText
    MissingExtractText,
}

impl ValidationError {
    /// 稳定错误码
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidPaper { .. } => "invalid-paper",
            ValidationError::MissingQuestionType { .. } => "invalid-question-type",
            ValidationError::QuestionTypeNotAllowed { .. } => "invalid-question-type",
            ValidationError::MissingField { .. } => "missing-field",
            ValidationError::MissingExtractText => "missing-extract",
        }
    }

    /// 供调用方二次提示用户的上下文数据
    pub fn context(&self) -> JsonValue {
        match self {
            ValidationError::InvalidPaper { valid_papers } => {
                json!({ "validPapers": valid_papers })
            }
            ValidationError::MissingQuestionType {
                valid_question_types,
            }
            | ValidationError::QuestionTypeNotAllowed {
                valid_question_types,
                ..
            } => json!({ "validQuestionTypes": valid_question_types }),
            ValidationError::MissingField { field } => {
                let mut required = serde_json::Map::new();
                required.insert(
                    (*field).to_string(),
                    JsonValue::String("string (required)".to_string()),
                );
                json!({ "requiredFields": required })
            }
            ValidationError::MissingExtractText => {
                json!({ "requiredFields": { "extractText": "string (required for Extract question)" } })
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidPaper { .. } => {
                write!(f, "Paper is required and must be one of the valid options")
            }
            ValidationError::MissingQuestionType { .. } => {
                write!(f, "Question type is required and must be a string")
            }
            ValidationError::QuestionTypeNotAllowed { paper, .. } => {
                write!(
                    f,
                    "Invalid question type for the selected paper '{}'",
                    paper
                )
            }
            ValidationError::MissingField { field } => {
                write!(
                    f,
                    "Field '{}' is required and must be a non-empty string",
                    field
                )
            }
            ValidationError::MissingExtractText => {
                write!(f, "For an Extract question, extract text is required")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 上游补全服务错误
///
/// 单次失败即单次流水线失败，不做重试
#[derive(Debug)]
pub enum UpstreamError {
    /// 传输层失败（连接失败、超时等）
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 非 2xx 响应
    BadStatus { status: u16, body: String },
    /// 响应信封缺少首段文本内容
    EmptyContent { body: String },
}

impl UpstreamError {
    /// 稳定错误码
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::RequestFailed { .. } => "upstream-request-failed",
            UpstreamError::BadStatus { .. } => "upstream-bad-status",
            UpstreamError::EmptyContent { .. } => "upstream-empty-content",
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::RequestFailed { endpoint, source } => {
                write!(f, "completion request to {} failed: {}", endpoint, source)
            }
            UpstreamError::BadStatus { status, body } => {
                write!(
                    f,
                    "completion request failed with status {}: {}",
                    status, body
                )
            }
            UpstreamError::EmptyContent { .. } => {
                write!(f, "completion reply is missing text content")
            }
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 响应 JSON 提取错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    /// 文本中不存在 '{'
    NoJsonStart,
    /// 扫描到文本结尾花括号仍未配平
    Unbalanced,
}

impl ExtractionError {
    /// 稳定错误码
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::NoJsonStart => "no-json-start",
            ExtractionError::Unbalanced => "unbalanced",
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::NoJsonStart => write!(f, "no JSON object found in reply"),
            ExtractionError::Unbalanced => write!(f, "incomplete JSON object in reply"),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// JSON 解析错误
#[derive(Debug)]
pub enum ParseError {
    /// 提取出的候选串不是合法 JSON
    MalformedJson { source: serde_json::Error },
}

impl ParseError {
    /// 稳定错误码
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::MalformedJson { .. } => "malformed-json",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedJson { source } => {
                write!(f, "extracted candidate is not valid JSON: {}", source)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::MalformedJson { source } => Some(source),
        }
    }
}

/// 配置错误
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// 必需的环境变量不存在
    EnvVarNotFound { var_name: &'static str },
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: &'static str,
        value: String,
        expected_type: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "{} is not defined in environment variables", var_name)
            }
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "environment variable {} has value '{}' which is not a valid {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从子错误类型转换 ==========

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err)
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Extraction(err)
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::Parse(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

// ========== HTTP 层消费的失败描述 ==========

impl AppError {
    /// 稳定错误码
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.kind(),
            AppError::Upstream(e) => e.kind(),
            AppError::Extraction(e) => e.kind(),
            AppError::Parse(e) => e.kind(),
            AppError::Config(_) => "config",
        }
    }

    /// 是否为调用方缺陷（HTTP 层映射为 4xx，其余映射为 5xx）
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// 渲染 HTTP 层消费的 `{ kind, message, context }` 失败描述
    ///
    /// 服务侧失败附带时间戳，便于日志对账
    pub fn descriptor(&self) -> JsonValue {
        let context = match self {
            AppError::Validation(e) => e.context(),
            _ => json!({
                "details": {
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                }
            }),
        };
        json!({
            "kind": self.kind(),
            "message": self.to_string(),
            "context": context,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
