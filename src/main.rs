use std::io::Read;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use exam_feedback::services::identify_question_type;
use exam_feedback::utils::logging;
use exam_feedback::{Config, FeedbackFlow};

/// 手动联调入口
///
/// 从参数指定的文件（或标准输入）读取一条提交 JSON，
/// 跑一遍完整流水线并打印结构化反馈或失败描述。
#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置（密钥或端点缺失直接启动失败）
    let config = Config::from_env().context("加载配置失败")?;

    // 读取提交
    let raw = read_submission().context("读取提交 JSON 失败")?;

    // 题型识别提示：识别结果与声明不一致时记一条日志，不覆盖声明
    if let (Some(declared), Some(question)) = (
        raw.get("questionType").and_then(JsonValue::as_str),
        raw.get("examQuestion").and_then(JsonValue::as_str),
    ) {
        if let Some(identified) = identify_question_type(question) {
            if identified.name() != declared {
                warn!(
                    "⚠️ 声明题型 '{}' 与题目文本识别结果 '{}' 不一致",
                    declared, identified
                );
            }
        }
    }

    // 跑流水线
    let flow = FeedbackFlow::new(&config);
    match flow.run(&raw).await {
        Ok(feedback) => {
            info!("✓ 反馈生成成功");
            println!("{}", serde_json::to_string_pretty(&feedback)?);
        }
        Err(e) => {
            warn!("❌ 反馈生成失败: {}", e);
            println!("{}", serde_json::to_string_pretty(&e.descriptor())?);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// 从参数路径或标准输入读取提交 JSON
fn read_submission() -> Result<JsonValue> {
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("无法读取文件: {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&text).context("提交内容不是合法 JSON")
}
