//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `session` - 澄清会话
//! - 由调用方持有，取代全局会话状态
//! - 管理阶段流转（Input → Questions → Done）
//! - 按索引写回回答
//!
//! ### `app` - 终端交互程序
//! - 持有检测流程和报告写入服务
//! - 驱动读入需求、逐题提问、导出报告的循环
//!
//! ## 层次关系
//!
//! ```text
//! app (终端交互)
//!     ↓
//! session (单次会话状态)
//!     ↓
//! workflow::ClarifyFlow (处理单条需求)
//!     ↓
//! services (能力层：prompt / parse / llm / report)
//! ```

pub mod app;
pub mod session;

pub use app::App;
pub use session::{ClarifySession, Explanation, Stage, SubmitOutcome};
