use crate::error::ConfigError;

/// 程序配置文件
///
/// 进程启动时从环境变量加载一次，此后只读。
/// API 密钥和端点缺失属于启动级致命错误，不在每次请求时重新校验。
#[derive(Clone, Debug)]
pub struct Config {
    // --- 上游补全服务配置 ---
    /// API 密钥
    pub claude_api_key: String,
    /// 补全端点 URL（/v1/messages）
    pub claude_api_endpoint: String,
    /// 模型名称
    pub claude_model: String,
    /// 单次上游请求超时（秒）
    pub request_timeout_secs: u64,
}

/// 默认模型
const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

/// 默认上游请求超时（秒）
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let claude_api_key = required_var("CLAUDE_API_KEY")?;
        let claude_api_endpoint = required_var("CLAUDE_API_ENDPOINT")?;

        let claude_model =
            std::env::var("CLAUDE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout_secs = match std::env::var("FEEDBACK_REQUEST_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::EnvVarParseFailed {
                    var_name: "FEEDBACK_REQUEST_TIMEOUT_SECS",
                    value: v,
                    expected_type: "u64",
                })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            claude_api_key,
            claude_api_endpoint,
            claude_model,
            request_timeout_secs,
        })
    }
}

/// 读取必需的环境变量，缺失或为空串均视为未定义
fn required_var(var_name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::EnvVarNotFound { var_name }),
    }
}
