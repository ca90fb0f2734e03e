// ==========================================
// 志愿者值班排班系统 - 公平状态
// ==========================================
// 职责: 成员本周期负荷、最近值班序号、历史计数
// 红线: 负荷在周期内单调不减; 每次运行重新构建
// ==========================================

use crate::domain::history::HistoryTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// EquityEntry - 单个成员的公平计数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityEntry {
    /// 本周期负荷（主岗位 +1.0，附加岗位 +0.5）
    pub load: f64,

    /// 最近一次值班的日序号（None = 本周期未值班）
    pub last_served_index: Option<usize>,

    /// 外部汇总的历史计数
    pub historical_count: u32,
}

// ==========================================
// EquityState - 全体成员公平状态
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquityState {
    entries: BTreeMap<String, EquityEntry>,
}

impl EquityState {
    /// 以名册成员初始化（负荷清零，历史计数取自历史表）
    ///
    /// 历史表中不在名册的姓名被忽略
    pub fn new<'a, I>(names: I, history: &HistoryTable) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let entries = names
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    EquityEntry {
                        load: 0.0,
                        last_served_index: None,
                        historical_count: history.get(name),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn entry(&self, name: &str) -> Option<&EquityEntry> {
        self.entries.get(name)
    }

    pub fn load(&self, name: &str) -> f64 {
        self.entries.get(name).map(|e| e.load).unwrap_or(0.0)
    }

    pub fn historical_count(&self, name: &str) -> u32 {
        self.entries.get(name).map(|e| e.historical_count).unwrap_or(0)
    }

    /// 距上次值班经过的值班日数
    ///
    /// None 表示本周期从未值班（视为休息最久）
    pub fn rest_days(&self, name: &str, day_index: usize) -> Option<usize> {
        self.entries
            .get(name)
            .and_then(|e| e.last_served_index)
            .map(|last| day_index.saturating_sub(last))
    }

    /// 记入一次值班: 负荷 += weight，最近值班序号 = day_index
    pub fn credit(&mut self, name: &str, weight: f64, day_index: usize) {
        let entry = self.entries.entry(name.to_string()).or_default();
        entry.load += weight;
        entry.last_served_index = Some(day_index);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EquityEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
