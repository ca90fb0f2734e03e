// ==========================================
// 志愿者值班排班系统 - 运行配置
// ==========================================
// 职责: 周期、值班日类型、排除日期、圣餐日、岗位布局
// 红线: 配置非法时在排班开始前失败
// ==========================================

use crate::config::defaults;
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::slot::{SecondaryRole, SlotLayout, TeamRole};
use crate::domain::types::DayType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// RunConfig - 单次排班运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// 周期开始日期（含）
    pub period_start: NaiveDate,

    /// 周期结束日期（含）
    pub period_end: NaiveDate,

    #[serde(default = "defaults::service_day_types")]
    pub service_day_types: BTreeSet<DayType>,

    /// 排除日期（不生成记录）
    #[serde(default)]
    pub excluded_dates: BTreeSet<NaiveDate>,

    /// 圣餐日
    #[serde(default)]
    pub communion_date: Option<NaiveDate>,

    /// 连续两个值班日不得重复值班
    #[serde(default = "defaults::no_repeat")]
    pub no_repeat: bool,

    #[serde(default = "defaults::slot_layout")]
    pub slot_layout: SlotLayout,

    /// 街门岗位（不参与圣餐团队与附加岗位的优先选取）
    #[serde(default = "defaults::street_door_role")]
    pub street_door_role: String,

    #[serde(default = "defaults::team_role")]
    pub team_role: TeamRole,

    #[serde(default = "defaults::secondary_roles")]
    pub secondary_roles: Vec<SecondaryRole>,
}

impl RunConfig {
    /// 以默认参数创建指定周期的配置
    pub fn new(period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Self {
            period_start,
            period_end,
            service_day_types: defaults::service_day_types(),
            excluded_dates: BTreeSet::new(),
            communion_date: None,
            no_repeat: defaults::no_repeat(),
            slot_layout: defaults::slot_layout(),
            street_door_role: defaults::street_door_role(),
            team_role: defaults::team_role(),
            secondary_roles: defaults::secondary_roles(),
        }
    }

    /// 以整月为周期创建配置
    pub fn for_month(year: i32, month: u32) -> ConfigResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ConfigError::InvalidMonth { year, month })?;
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(ConfigError::InvalidMonth { year, month })?;
        let end = next_month_start
            .pred_opt()
            .ok_or(ConfigError::InvalidMonth { year, month })?;

        Ok(Self::new(start, end))
    }

    pub fn with_service_day_types<I>(mut self, day_types: I) -> Self
    where
        I: IntoIterator<Item = DayType>,
    {
        self.service_day_types = day_types.into_iter().collect();
        self
    }

    pub fn with_communion_date(mut self, date: NaiveDate) -> Self {
        self.communion_date = Some(date);
        self
    }

    pub fn with_excluded_date(mut self, date: NaiveDate) -> Self {
        self.excluded_dates.insert(date);
        self
    }

    pub fn with_no_repeat(mut self, no_repeat: bool) -> Self {
        self.no_repeat = no_repeat;
        self
    }

    pub fn with_slot_layout(mut self, layout: SlotLayout) -> Self {
        self.slot_layout = layout;
        self
    }

    pub fn with_secondary_roles(mut self, roles: Vec<SecondaryRole>) -> Self {
        self.secondary_roles = roles;
        self
    }

    pub fn is_special_date(&self, date: NaiveDate) -> bool {
        self.communion_date == Some(date)
    }

    /// 校验配置
    ///
    /// # 规则
    /// 1. period_end >= period_start
    /// 2. 至少选择一个值班日类型
    /// 3. 岗位/附加岗位名称非空
    /// 4. 圣餐团队 per_gender <= quota
    pub fn validate(&self) -> ConfigResult<()> {
        if self.period_end < self.period_start {
            return Err(ConfigError::InvalidDateRange {
                start: self.period_start,
                end: self.period_end,
            });
        }

        if self.service_day_types.is_empty() {
            return Err(ConfigError::NoServiceDayTypes);
        }

        for (idx, slot) in self.slot_layout.slots().iter().enumerate() {
            if slot.role.trim().is_empty() {
                return Err(ConfigError::BlankSlotRole(idx + 1));
            }
        }

        for (idx, role) in self.secondary_roles.iter().enumerate() {
            if role.label.trim().is_empty() {
                return Err(ConfigError::BlankSecondaryRole(idx + 1));
            }
        }

        if self.team_role.per_gender > self.team_role.quota {
            return Err(ConfigError::InvalidTeamQuota {
                quota: self.team_role.quota,
                per_gender: self.team_role.per_gender,
            });
        }

        Ok(())
    }
}
