// ==========================================
// 志愿者值班排班系统 - 历史计数表
// ==========================================
// 职责: 跨周期公平计数（圣餐服事次数）的汇总与提交
// 红线: 引擎运行期间不修改历史计数; 增量只在提交步骤产生
// ==========================================

use crate::domain::day_record::DayRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// HistoryTable - 姓名 → 历史次数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryTable {
    counts: BTreeMap<String, u32>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 汇总多个历史来源（同名累加）
    pub fn merge_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = HistoryTable>,
    {
        let mut merged = HistoryTable::new();
        for source in sources {
            for (name, count) in source.counts {
                merged.add(&name, count);
            }
        }
        merged
    }

    /// 未记录的成员视为 0
    pub fn get(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn add(&mut self, name: &str, count: u32) {
        let entry = self.counts.entry(name.to_string()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 提交本周期的圣餐服事增量
    ///
    /// 每条日记录中的圣餐团队成员各 +1，返回新表（不修改自身）
    pub fn with_team_increments(&self, records: &[DayRecord]) -> HistoryTable {
        let mut updated = self.clone();
        for record in records {
            if let Some(team) = &record.team {
                for name in team {
                    updated.add(name, 1);
                }
            }
        }
        updated
    }
}

impl FromIterator<(String, u32)> for HistoryTable {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        let mut table = HistoryTable::new();
        for (name, count) in iter {
            table.add(&name, count);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DayType;
    use chrono::NaiveDate;

    #[test]
    fn test_merge_sources_sums_counts() {
        let a: HistoryTable = vec![("Ana".to_string(), 2), ("Bruno".to_string(), 1)]
            .into_iter()
            .collect();
        let b: HistoryTable = vec![("Ana".to_string(), 3)].into_iter().collect();

        let merged = HistoryTable::merge_sources(vec![a, b]);
        assert_eq!(merged.get("Ana"), 5);
        assert_eq!(merged.get("Bruno"), 1);
        assert_eq!(merged.get("Carla"), 0);
    }

    #[test]
    fn test_team_increments_leave_base_untouched() {
        let base: HistoryTable = vec![("Ana".to_string(), 1)].into_iter().collect();
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut record = DayRecord::new(date, DayType::Sunday);
        record.team = Some(vec!["Ana".to_string(), "Bruno".to_string()]);

        let updated = base.with_team_increments(&[record]);
        assert_eq!(base.get("Ana"), 1);
        assert_eq!(updated.get("Ana"), 2);
        assert_eq!(updated.get("Bruno"), 1);
    }
}
