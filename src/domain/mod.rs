// ==========================================
// 志愿者值班排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod day_record;
pub mod equity;
pub mod history;
pub mod member;
pub mod slot;
pub mod types;

// 重导出核心类型
pub use day_record::{DayRecord, DayRecordView, SlotAssignment, SlotEntry};
pub use equity::{EquityEntry, EquityState};
pub use history::HistoryTable;
pub use member::{AbsenceRecord, Member, PairRule, RoleRestriction, RosterInput};
pub use slot::{SecondaryRole, SlotDefinition, SlotLayout, TeamRole};
pub use types::{Capability, DayType, Gender, RequiredGender, RoleTrigger, SlotWeight};
