// ==========================================
// 志愿者值班排班系统 - 排班汇总
// ==========================================
// 职责: 由日记录与最终公平状态计算本周期指标
//       （成员负荷表、空缺数、负荷极差）
// ==========================================

use crate::domain::day_record::DayRecord;
use crate::domain::equity::EquityState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个成员的本周期统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberLoad {
    pub name: String,
    pub load: f64,
    pub primary_count: u32,
    pub secondary_count: u32,
    pub team_count: u32,
}

/// 本周期排班指标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub service_days: usize,
    pub filled_slots: usize,
    pub vacant_slots: usize,
    pub secondary_vacancies: usize,

    /// 按姓名排序的成员统计
    pub members: Vec<MemberLoad>,

    pub max_load: f64,
    pub min_load: f64,
}

impl RosterSummary {
    /// 计算汇总指标
    ///
    /// # 参数
    /// - `records`: 本周期全部日记录
    /// - `equity`: 运行结束时的公平状态（提供负荷与成员全集）
    pub fn calculate(records: &[DayRecord], equity: &EquityState) -> Self {
        let mut by_name: BTreeMap<&str, MemberLoad> = equity
            .iter()
            .map(|(name, entry)| {
                (
                    name,
                    MemberLoad {
                        name: name.to_string(),
                        load: entry.load,
                        ..Default::default()
                    },
                )
            })
            .collect();

        let mut filled_slots = 0;
        let mut vacant_slots = 0;
        let mut secondary_vacancies = 0;

        for record in records {
            for entry in &record.slots {
                match entry.assignment.member() {
                    Some(name) => {
                        filled_slots += 1;
                        if let Some(stats) = by_name.get_mut(name) {
                            stats.primary_count += 1;
                        }
                    }
                    None => vacant_slots += 1,
                }
            }
            for entry in &record.secondary {
                match entry.assignment.member() {
                    Some(name) => {
                        if let Some(stats) = by_name.get_mut(name) {
                            stats.secondary_count += 1;
                        }
                    }
                    None => secondary_vacancies += 1,
                }
            }
            for name in record.team.iter().flatten() {
                if let Some(stats) = by_name.get_mut(name.as_str()) {
                    stats.team_count += 1;
                }
            }
        }

        let members: Vec<MemberLoad> = by_name.into_values().collect();
        let max_load = members.iter().map(|m| m.load).fold(f64::NAN, f64::max);
        let min_load = members.iter().map(|m| m.load).fold(f64::NAN, f64::min);

        Self {
            service_days: records.len(),
            filled_slots,
            vacant_slots,
            secondary_vacancies,
            members,
            max_load: if max_load.is_nan() { 0.0 } else { max_load },
            min_load: if min_load.is_nan() { 0.0 } else { min_load },
        }
    }

    /// 负荷极差（最大负荷 − 最小负荷）
    pub fn load_spread(&self) -> f64 {
        self.max_load - self.min_load
    }
}
