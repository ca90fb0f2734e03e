// ==========================================
// 志愿者值班排班系统 - 配置层
// ==========================================
// 职责: 运行配置、默认岗位布局、配置文件加载
// 存储: JSON 配置文件（引擎本身不持久化任何状态）
// ==========================================

pub mod app_config;
pub mod defaults;
pub mod error;
pub mod run_config;

// 重导出核心配置
pub use app_config::{AppConfig, SourcePaths};
pub use error::{ConfigError, ConfigResult};
pub use run_config::RunConfig;
