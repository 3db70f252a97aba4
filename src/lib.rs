//! # DigComp Quiz Tools
//!
//! DigComp 题库维护与成绩提交工具
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目、作答记录、等级、领域，以及 JSON 读写
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `DistractorClassifier` - 识别劣质干扰项
//! - `ReplacementTable` - 按规则顺序挑选替换候选
//! - `aggregate_domains` / `global_score` - 成绩汇总
//! - `FormTransport` / `LinkPresenter` - 表单投递与预填链接展示
//! - `WarnWriter` - 写待复核文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"和"一次提交"的完整流程
//! - `DistractorFlow` - 识别 → 选桶 → 替换
//! - `DeliveryFlow` - 校验 → POST → 预填链接兜底
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 按配置装配并运行，对应三个可执行程序
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerEvent, Domain, Level, Question, QuestionOption};
pub use orchestrator::{BankRewriter, QuizSummary};
pub use workflow::{DeliveryFlow, DeliveryOutcome, DistractorFlow, RewriteReport};
