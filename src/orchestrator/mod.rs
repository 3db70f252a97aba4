//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责按配置装配各层并调度整体流程，是每个可执行程序的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `bank_rewriter` - 题库清洗器
//! - 加载题库和替换规则表
//! - 逐题调用 DistractorFlow
//! - 保存题库、写入待复核记录、输出统计
//!
//! ### `submission` - 成绩提交器
//! - 按配置组装 DeliveryFlow（HTTP 客户端 + 链接展示）
//! - 汇总作答记录为领域成绩并投递
//!
//! ### `quiz_session` - 终端测验
//! - 均衡抽题并在终端作答
//! - 保存作答记录供成绩提交器使用
//!
//! ## 层次关系
//!
//! ```text
//! bank_rewriter / submission / quiz_session (整体调度)
//!     ↓
//! workflow::DistractorFlow / DeliveryFlow (单道题 / 单次提交)
//!     ↓
//! services (能力层：classifier / selector / aggregator / transport / presenter)
//!     ↓
//! models (数据：Question / AnswerEvent / Domain)
//! ```

pub mod bank_rewriter;
pub mod quiz_session;
pub mod submission;

pub use bank_rewriter::BankRewriter;
pub use quiz_session::{run_quiz, QuizSummary};
pub use submission::{
    build_delivery_flow, submit_domain_results, submit_from_files, submitter_from_config, DefaultDeliveryFlow,
};
