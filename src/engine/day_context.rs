// ==========================================
// 志愿者值班排班系统 - 值班日上下文
// ==========================================

use crate::domain::types::DayType;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// 单个值班日的解析上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayContext {
    pub date: NaiveDate,
    pub day_type: DayType,

    /// 在周期值班日序列中的序号（从 0 开始）
    pub day_index: usize,

    /// 上一个值班日的全部值班成员（不重复规则使用）
    pub previous_served: BTreeSet<String>,

    /// 是否圣餐日
    pub is_special: bool,
}

impl DayContext {
    pub fn new(date: NaiveDate, day_index: usize) -> Self {
        Self {
            date,
            day_type: DayType::from_date(date),
            day_index,
            previous_served: BTreeSet::new(),
            is_special: false,
        }
    }

    pub fn with_previous_served(mut self, previous_served: BTreeSet<String>) -> Self {
        self.previous_served = previous_served;
        self
    }

    pub fn with_special(mut self, is_special: bool) -> Self {
        self.is_special = is_special;
        self
    }
}
