// ==========================================
// 志愿者值班排班系统 - 日排班记录
// ==========================================
// 职责: 单个值班日的输出（主岗位 + 圣餐团队 + 附加岗位）
// ==========================================

use crate::domain::types::DayType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// SlotAssignment - 岗位分配结果
// ==========================================
// 空缺是合法结果，不是错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "member", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotAssignment {
    Assigned(String),
    Vacant,
}

impl SlotAssignment {
    pub fn member(&self) -> Option<&str> {
        match self {
            SlotAssignment::Assigned(name) => Some(name.as_str()),
            SlotAssignment::Vacant => None,
        }
    }

    pub fn is_vacant(&self) -> bool {
        matches!(self, SlotAssignment::Vacant)
    }
}

impl fmt::Display for SlotAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotAssignment::Assigned(name) => write!(f, "{}", name),
            SlotAssignment::Vacant => write!(f, "VACANT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub role: String,
    pub assignment: SlotAssignment,
}

// ==========================================
// DayRecord - 日排班记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub day_type: DayType,

    /// 主岗位（布局顺序）
    pub slots: Vec<SlotEntry>,

    /// 圣餐团队（仅圣餐日）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<String>>,

    /// 附加岗位（开门、布置）
    #[serde(default)]
    pub secondary: Vec<SlotEntry>,
}

impl DayRecord {
    pub fn new(date: NaiveDate, day_type: DayType) -> Self {
        Self {
            date,
            day_type,
            slots: Vec::new(),
            team: None,
            secondary: Vec::new(),
        }
    }

    /// 展示用日期标签, 形如 `01/03 (Sun)`
    pub fn label(&self) -> String {
        self.date.format("%d/%m (%a)").to_string()
    }

    /// 按岗位名称查询主岗位分配
    pub fn assignment(&self, role: &str) -> Option<&SlotAssignment> {
        self.slots
            .iter()
            .find(|e| e.role == role)
            .map(|e| &e.assignment)
    }

    /// 按岗位名称查询附加岗位分配
    pub fn secondary_assignment(&self, label: &str) -> Option<&SlotAssignment> {
        self.secondary
            .iter()
            .find(|e| e.role == label)
            .map(|e| &e.assignment)
    }

    /// 主岗位上的成员（布局顺序）
    pub fn primary_assignees(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter_map(|e| e.assignment.member())
            .collect()
    }

    /// 当日全部值班成员（主岗位 + 附加岗位，去重，保持出现顺序）
    pub fn assignees(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in self.slots.iter().chain(self.secondary.iter()) {
            if let Some(name) = entry.assignment.member() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// 主岗位空缺数
    pub fn vacancy_count(&self) -> usize {
        self.slots.iter().filter(|e| e.assignment.is_vacant()).count()
    }

    /// 导出视图（附带展示标签）
    pub fn view(&self) -> DayRecordView<'_> {
        DayRecordView {
            label: self.label(),
            record: self,
        }
    }
}

/// 日记录导出视图: `label` + 日记录全部字段
#[derive(Debug, Serialize)]
pub struct DayRecordView<'a> {
    pub label: String,

    #[serde(flatten)]
    pub record: &'a DayRecord,
}
