// ==========================================
// 志愿者值班排班系统 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 配置错误类型（致命，排班开始前终止）
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 周期错误 =====
    #[error("周期无效: 结束日期 {end} 早于开始日期 {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("月份无效: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("未选择任何值班日类型")]
    NoServiceDayTypes,

    // ===== 岗位错误 =====
    #[error("岗位名称为空 (布局第 {0} 项)")]
    BlankSlotRole(usize),

    #[error("附加岗位名称为空 (第 {0} 项)")]
    BlankSecondaryRole(usize),

    #[error("圣餐团队配置无效: per_gender={per_gender} 大于 quota={quota}")]
    InvalidTeamQuota { quota: usize, per_gender: usize },

    // ===== 文件错误 =====
    #[error("配置文件读取失败: {0}")]
    FileReadError(String),

    #[error("配置文件解析失败: {0}")]
    ParseError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
