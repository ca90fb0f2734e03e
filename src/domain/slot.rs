// ==========================================
// 志愿者值班排班系统 - 岗位定义
// ==========================================
// 职责: 主岗位、附加岗位（开门/布置）、圣餐团队岗位
// 红线: 岗位布局顺序即解析优先级
// ==========================================

use crate::domain::types::{Capability, DayType, RequiredGender, RoleTrigger, SlotWeight};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// SlotDefinition - 主岗位
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// 岗位名称（同时用于禁止岗位的包含匹配）
    pub role: String,

    #[serde(default)]
    pub required_gender: RequiredGender,

    /// 适用的日类型
    pub day_types: BTreeSet<DayType>,

    #[serde(default)]
    pub weight: SlotWeight,
}

impl SlotDefinition {
    pub fn new<I>(role: &str, required_gender: RequiredGender, day_types: I) -> Self
    where
        I: IntoIterator<Item = DayType>,
    {
        Self {
            role: role.to_string(),
            required_gender,
            day_types: day_types.into_iter().collect(),
            weight: SlotWeight::Primary,
        }
    }

    pub fn applies_to(&self, day_type: DayType) -> bool {
        self.day_types.contains(&day_type)
    }
}

// ==========================================
// SlotLayout - 有序岗位布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotLayout {
    slots: Vec<SlotDefinition>,
}

impl SlotLayout {
    pub fn new(slots: Vec<SlotDefinition>) -> Self {
        Self { slots }
    }

    /// 指定日类型的岗位（保持布局顺序）
    pub fn slots_for(&self, day_type: DayType) -> Vec<&SlotDefinition> {
        self.slots.iter().filter(|s| s.applies_to(day_type)).collect()
    }

    pub fn slots(&self) -> &[SlotDefinition] {
        &self.slots
    }
}

// ==========================================
// SecondaryRole - 半权重附加岗位
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryRole {
    pub label: String,
    pub capability: Capability,
    pub trigger: RoleTrigger,
}

impl SecondaryRole {
    pub fn is_triggered(&self, is_special_date: bool) -> bool {
        match self.trigger {
            RoleTrigger::EveryServiceDay => true,
            RoleTrigger::SpecialDateOnly => is_special_date,
        }
    }
}

// ==========================================
// TeamRole - 圣餐团队
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRole {
    pub label: String,

    /// 团队总人数
    pub quota: usize,

    /// 每种性别的优先名额
    pub per_gender: usize,
}
