// ==========================================
// 志愿者值班排班系统 - 引擎层
// ==========================================
// 职责: 实现排班规则（约束过滤、公平选取、特殊岗位）
// 红线: 引擎不读文件; 同样输入必须产出同样结果
// ==========================================

pub mod calendar;
pub mod constraint_engine;
pub mod constraint_index;
pub mod day_context;
pub mod error;
pub mod scheduler;
pub mod slot_resolver;
pub mod special_event;
pub mod summary;

// 重导出核心引擎
pub use calendar::ServiceCalendar;
pub use constraint_engine::ConstraintEngine;
pub use constraint_index::{AbsenceInterval, ConstraintIndex};
pub use day_context::DayContext;
pub use error::{EngineResult, ScheduleError};
pub use scheduler::{RosterScheduler, ScheduleResult};
pub use slot_resolver::SlotResolver;
pub use special_event::SpecialEventResolver;
pub use summary::{MemberLoad, RosterSummary};
