// ==========================================
// 志愿者值班排班系统 - 领域类型定义
// ==========================================
// 职责: 值班日类型、性别、岗位权重等基础枚举
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 值班日类型 (Day Type)
// ==========================================
// 按星期区分; 不同日类型对应不同的岗位布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayType {
    /// 全部日类型（周一 → 周日）
    pub const ALL: [DayType; 7] = [
        DayType::Monday,
        DayType::Tuesday,
        DayType::Wednesday,
        DayType::Thursday,
        DayType::Friday,
        DayType::Saturday,
        DayType::Sunday,
    ];

    /// 由日期推导日类型
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayType::Monday,
            Weekday::Tue => DayType::Tuesday,
            Weekday::Wed => DayType::Wednesday,
            Weekday::Thu => DayType::Thursday,
            Weekday::Fri => DayType::Friday,
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Monday => write!(f, "MONDAY"),
            DayType::Tuesday => write!(f, "TUESDAY"),
            DayType::Wednesday => write!(f, "WEDNESDAY"),
            DayType::Thursday => write!(f, "THURSDAY"),
            DayType::Friday => write!(f, "FRIDAY"),
            DayType::Saturday => write!(f, "SATURDAY"),
            DayType::Sunday => write!(f, "SUNDAY"),
        }
    }
}

// ==========================================
// 成员性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Unspecified, // 名册未填写或无法识别
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
            Gender::Unspecified => write!(f, "-"),
        }
    }
}

// ==========================================
// 岗位性别要求 (Required Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredGender {
    #[default]
    Any,
    Male,
    Female,
}

impl RequiredGender {
    /// 判断成员性别是否满足岗位要求
    ///
    /// Unspecified 只能进入不限性别的岗位
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            RequiredGender::Any => true,
            RequiredGender::Male => gender == Gender::Male,
            RequiredGender::Female => gender == Gender::Female,
        }
    }
}

impl fmt::Display for RequiredGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredGender::Any => write!(f, "ANY"),
            RequiredGender::Male => write!(f, "M"),
            RequiredGender::Female => write!(f, "F"),
        }
    }
}

// ==========================================
// 岗位权重 (Slot Weight)
// ==========================================
// Primary 计 1.0 负荷, Half 计 0.5 负荷
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotWeight {
    #[default]
    Primary,
    Half,
}

impl SlotWeight {
    pub fn value(&self) -> f64 {
        match self {
            SlotWeight::Primary => 1.0,
            SlotWeight::Half => 0.5,
        }
    }
}

impl fmt::Display for SlotWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotWeight::Primary => write!(f, "PRIMARY"),
            SlotWeight::Half => write!(f, "HALF"),
        }
    }
}

// ==========================================
// 成员能力标记 (Capability)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capability {
    CanOpen,     // 可负责开门
    CanDecorate, // 可负责布置
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::CanOpen => write!(f, "CAN_OPEN"),
            Capability::CanDecorate => write!(f, "CAN_DECORATE"),
        }
    }
}

// ==========================================
// 附加岗位触发方式 (Role Trigger)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleTrigger {
    EveryServiceDay, // 每个值班日
    SpecialDateOnly, // 仅圣餐日
}

impl fmt::Display for RoleTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleTrigger::EveryServiceDay => write!(f, "EVERY_SERVICE_DAY"),
            RoleTrigger::SpecialDateOnly => write!(f, "SPECIAL_DATE_ONLY"),
        }
    }
}
