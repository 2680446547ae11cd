//! # Exam Feedback
//!
//! A-Level Politics 学生作答反馈生成核心
//!
//! ## 架构设计
//!
//! 核心是一条严格线性的五阶段流水线，任一阶段失败即整体失败：
//!
//! ### ① 模型层（Models）
//! - `models/` - 领域类型：试卷 / 题型枚举、请求与响应形状
//! - `Paper` × `QuestionType` 的联合合法性在模型层一处编码
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单次提交
//! - `validator` - 松散输入收紧为类型化请求
//! - `prompt_builder` - 确定性渲染提示词（纯函数）
//! - `response_parser` - 从不可信回复中提取并规整 JSON
//! - `question_identifier` - 题型识别提示（不覆盖调用方声明）
//!
//! ### ③ 客户端层（Clients）
//! - `clients/llm_client` - 单次上游补全调用，有界超时，不重试
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/feedback_flow` - 流程编排（校验 → 提示词 → 补全 → 提取 → 规整）
//!
//! HTTP 路由、静态文件、健康检查等均视为外部协作方：
//! 它们传入一条松散 JSON 记录，拿回结构化反馈或带错误码的失败描述。

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::LlmClient;
pub use config::Config;
pub use error::{
    AppError, AppResult, ConfigError, ExtractionError, ParseError, UpstreamError,
    ValidationError,
};
pub use models::{FeedbackRequest, FeedbackResponse, Paper, QuestionType, RenderedPrompt};
pub use workflow::FeedbackFlow;
