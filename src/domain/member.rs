// ==========================================
// 志愿者值班排班系统 - 成员与名册规则
// ==========================================
// 职责: 成员主数据、缺勤区间、禁止搭档、禁止岗位
// 红线: 名字是唯一身份键
// ==========================================

use crate::domain::history::HistoryTable;
use crate::domain::types::{Capability, DayType, Gender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// Member - 成员主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// 姓名（唯一身份键）
    pub name: String,

    /// 可值班的日类型
    pub availability: BTreeSet<DayType>,

    pub gender: Gender,

    /// 可负责开门
    #[serde(default)]
    pub can_open: bool,

    /// 可负责布置
    #[serde(default)]
    pub can_decorate: bool,

    /// 禁止搭档原文（逗号/分号分隔的姓名）
    #[serde(default)]
    pub forbidden_partners_raw: Option<String>,

    /// 禁止岗位原文（逗号/分号分隔的岗位文本）
    #[serde(default)]
    pub forbidden_roles_raw: Option<String>,
}

impl Member {
    /// 创建成员（默认全部日类型可用，无能力标记）
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            availability: DayType::ALL.iter().copied().collect(),
            gender,
            can_open: false,
            can_decorate: false,
            forbidden_partners_raw: None,
            forbidden_roles_raw: None,
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::CanOpen => self.can_open,
            Capability::CanDecorate => self.can_decorate,
        }
    }
}

// ==========================================
// AbsenceRecord - 缺勤记录
// ==========================================
// start/end 为 None 表示原始日期无法解析，该行整体忽略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    pub member: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

// ==========================================
// PairRule - 禁止同日搭档
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRule {
    pub member_a: String,
    pub member_b: String,
}

// ==========================================
// RoleRestriction - 禁止岗位
// ==========================================
// role_text 按"包含"匹配岗位名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRestriction {
    pub member: String,
    pub role_text: String,
}

// ==========================================
// RosterInput - 一次排班运行的全部输入
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterInput {
    pub members: Vec<Member>,
    #[serde(default)]
    pub pair_rules: Vec<PairRule>,
    #[serde(default)]
    pub role_restrictions: Vec<RoleRestriction>,
    #[serde(default)]
    pub absences: Vec<AbsenceRecord>,
    /// 已汇总的历史计数（如圣餐服事次数）
    #[serde(default)]
    pub history: HistoryTable,
}

/// 拆分名册中的多值原文
///
/// 分隔符: `,` 或 `;`，空白片段丢弃
pub fn split_raw_list(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_raw_list() {
        assert_eq!(
            split_raw_list(" Ana ; Bruno,, Carla "),
            vec!["Ana".to_string(), "Bruno".to_string(), "Carla".to_string()]
        );
        assert!(split_raw_list(" ; ").is_empty());
    }

    #[test]
    fn test_member_defaults() {
        let m = Member::new("Ana", Gender::Female);
        assert_eq!(m.availability.len(), 7);
        assert!(!m.has_capability(Capability::CanOpen));
        assert!(!m.has_capability(Capability::CanDecorate));
    }
}
