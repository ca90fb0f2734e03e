// ==========================================
// 志愿者值班排班系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV/Excel 导入 + JSON 配置
// 系统定位: 按周期生成值班表（人工审核后发布）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排班规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    Capability, DayType, Gender, RequiredGender, RoleTrigger, SlotWeight,
};

// 领域实体
pub use domain::{
    AbsenceRecord, DayRecord, EquityState, HistoryTable, Member, PairRule, RoleRestriction,
    RosterInput, SlotAssignment, SlotEntry,
};

// 配置
pub use config::{AppConfig, RunConfig, SourcePaths};

// 引擎
pub use engine::{RosterScheduler, RosterSummary, ScheduleError, ScheduleResult};

// 导入
pub use importer::{ImportError, RosterImporter, RosterSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "志愿者值班排班系统";
