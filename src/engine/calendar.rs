// ==========================================
// 志愿者值班排班系统 - 值班日历
// ==========================================
// 职责: 把周期展开为值班日期序列
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::types::DayType;
use chrono::NaiveDate;
use std::collections::BTreeSet;

// ==========================================
// ServiceCalendar - 纯函数工具类
// ==========================================
pub struct ServiceCalendar;

impl ServiceCalendar {
    /// 判定是否为值班日
    ///
    /// # 规则
    /// - 日类型在所选值班日类型中
    /// - 且不在排除日期集合中
    pub fn is_service_date(
        date: NaiveDate,
        service_day_types: &BTreeSet<DayType>,
        excluded_dates: &BTreeSet<NaiveDate>,
    ) -> bool {
        service_day_types.contains(&DayType::from_date(date)) && !excluded_dates.contains(&date)
    }

    /// 展开周期内的值班日期（升序，首尾均包含）
    ///
    /// # 参数
    /// - start / end: 周期首尾日期
    /// - service_day_types: 所选值班日类型
    /// - excluded_dates: 排除日期
    pub fn service_dates(
        start: NaiveDate,
        end: NaiveDate,
        service_day_types: &BTreeSet<DayType>,
        excluded_dates: &BTreeSet<NaiveDate>,
    ) -> Vec<NaiveDate> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| Self::is_service_date(*d, service_day_types, excluded_dates))
            .collect()
    }
}
