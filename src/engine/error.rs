// ==========================================
// 志愿者值班排班系统 - 引擎错误类型
// ==========================================
// 说明: 只有顶层输入结构错误是致命的;
//       岗位空缺、缺勤行格式错误、未知姓名引用均不是错误
// 工具: thiserror 派生宏
// ==========================================

use crate::config::error::ConfigError;
use thiserror::Error;

/// 排班引擎错误类型（输入校验失败）
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("配置无效: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("成员姓名为空 (名册第 {0} 项)")]
    MissingMemberName(usize),

    #[error("成员姓名重复: {0}")]
    DuplicateMember(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, ScheduleError>;
