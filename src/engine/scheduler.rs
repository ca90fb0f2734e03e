// ==========================================
// 志愿者值班排班系统 - 排班调度器
// ==========================================
// 用途: 协调约束过滤、岗位选取、特殊岗位解析的执行顺序
// 流程: 初始化 → 逐值班日 {主岗位 → 特殊岗位 → 输出日记录 → 推进上一日值班集合} → 汇总
// 红线: 日期严格顺序执行; 同日岗位严格按布局顺序执行
// ==========================================

use crate::config::RunConfig;
use crate::domain::day_record::{DayRecord, SlotEntry};
use crate::domain::equity::EquityState;
use crate::domain::history::HistoryTable;
use crate::domain::member::RosterInput;
use crate::engine::calendar::ServiceCalendar;
use crate::engine::constraint_engine::ConstraintEngine;
use crate::engine::constraint_index::ConstraintIndex;
use crate::engine::day_context::DayContext;
use crate::engine::error::EngineResult;
use crate::engine::slot_resolver::SlotResolver;
use crate::engine::special_event::SpecialEventResolver;
use crate::engine::summary::RosterSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

// ==========================================
// ScheduleResult - 排班结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// 日记录（值班日顺序）
    pub day_records: Vec<DayRecord>,

    /// 运行结束时的公平状态
    pub equity: EquityState,

    pub summary: RosterSummary,
}

impl ScheduleResult {
    /// 提交本周期圣餐服事增量，返回新的历史计数表
    ///
    /// 仅在本周期结果确认导出后调用
    pub fn updated_history(&self, base: &HistoryTable) -> HistoryTable {
        base.with_team_increments(&self.day_records)
    }

    pub fn vacancy_count(&self) -> usize {
        self.day_records.iter().map(|r| r.vacancy_count()).sum()
    }
}

// ==========================================
// RosterScheduler - 排班调度器
// ==========================================
pub struct RosterScheduler {
    config: RunConfig,
    constraint_engine: ConstraintEngine,
    resolver: SlotResolver,
    special: SpecialEventResolver,
}

impl RosterScheduler {
    /// 创建调度器（配置非法时失败）
    pub fn new(config: RunConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            constraint_engine: ConstraintEngine::new(config.no_repeat),
            resolver: SlotResolver::new(),
            special: SpecialEventResolver::new(),
            config,
        })
    }

    /// 执行整个周期的排班
    ///
    /// # 参数
    /// - input: 名册、规则、缺勤与已汇总的历史计数
    ///
    /// # 返回
    /// 排班结果; 仅名册身份错误会导致失败
    #[instrument(skip_all, fields(
        period_start = %self.config.period_start,
        period_end = %self.config.period_end,
        members = input.members.len()
    ))]
    pub fn run(&self, input: &RosterInput) -> EngineResult<ScheduleResult> {
        // ==========================================
        // 初始化: 约束索引 + 公平状态
        // ==========================================
        let index = ConstraintIndex::build(input)?;
        let mut equity = EquityState::new(
            index.members().iter().map(|m| m.name.as_str()),
            &input.history,
        );

        let dates = ServiceCalendar::service_dates(
            self.config.period_start,
            self.config.period_end,
            &self.config.service_day_types,
            &self.config.excluded_dates,
        );

        if let Some(communion_date) = self.config.communion_date {
            if !dates.contains(&communion_date) {
                warn!(%communion_date, "圣餐日不是本周期的值班日，圣餐团队不会生成");
            }
        }

        info!(service_days = dates.len(), "开始执行排班");

        // ==========================================
        // 逐值班日解析
        // ==========================================
        let mut records = Vec::with_capacity(dates.len());
        let mut previous_served: BTreeSet<String> = BTreeSet::new();

        for (day_index, date) in dates.into_iter().enumerate() {
            let ctx = DayContext::new(date, day_index)
                .with_previous_served(std::mem::take(&mut previous_served))
                .with_special(self.config.is_special_date(date));

            let record = self.schedule_day(&index, &ctx, &mut equity);

            // 推进上一值班日集合
            previous_served = record.assignees().into_iter().map(str::to_string).collect();
            records.push(record);
        }

        // ==========================================
        // 汇总
        // ==========================================
        let summary = RosterSummary::calculate(&records, &equity);
        info!(
            service_days = summary.service_days,
            filled_slots = summary.filled_slots,
            vacant_slots = summary.vacant_slots,
            load_spread = summary.load_spread(),
            "排班完成"
        );

        Ok(ScheduleResult {
            day_records: records,
            equity,
            summary,
        })
    }

    /// 解析单个值班日
    #[instrument(skip_all, fields(
        date = %ctx.date,
        day_index = ctx.day_index,
        special = ctx.is_special
    ))]
    fn schedule_day(
        &self,
        index: &ConstraintIndex,
        ctx: &DayContext,
        equity: &mut EquityState,
    ) -> DayRecord {
        let mut record = DayRecord::new(ctx.date, ctx.day_type);
        let day_pool = self.constraint_engine.day_pool(index, ctx);
        let mut assigned_today: Vec<String> = Vec::new();

        debug!(pool_size = day_pool.len(), "当日候选池构建完成");

        // ===== 步骤1: 主岗位 =====
        let slots = self.config.slot_layout.slots_for(ctx.day_type);
        if slots.is_empty() {
            warn!(day_type = %ctx.day_type, "该日类型没有配置岗位");
        }

        for slot in slots {
            let candidates = self.constraint_engine.filter(
                index,
                &day_pool,
                ctx,
                &slot.role,
                slot.required_gender,
                &assigned_today,
            );
            let assignment = self
                .resolver
                .resolve(&candidates, equity, ctx.day_index, slot.weight);

            match assignment.member() {
                Some(name) => assigned_today.push(name.to_string()),
                None => warn!(role = %slot.role, "没有合格成员，岗位空缺"),
            }

            record.slots.push(SlotEntry {
                role: slot.role.clone(),
                assignment,
            });
        }

        // ===== 步骤2: 圣餐团队 =====
        if ctx.is_special {
            let team = self.special.resolve_team(
                index,
                &record.slots,
                &self.config.street_door_role,
                &self.config.team_role,
                equity,
            );
            if team.len() < self.config.team_role.quota {
                warn!(
                    selected = team.len(),
                    quota = self.config.team_role.quota,
                    "圣餐团队人数不足"
                );
            }
            record.team = Some(team);
        }

        // ===== 步骤3: 半权重附加岗位 =====
        for role in &self.config.secondary_roles {
            if !role.is_triggered(ctx.is_special) {
                continue;
            }
            let assignment = self.special.resolve_secondary(
                index,
                &self.constraint_engine,
                ctx,
                role,
                &record.slots,
                &self.config.street_door_role,
                &day_pool,
                &mut assigned_today,
                equity,
            );
            if assignment.is_vacant() {
                warn!(role = %role.label, "附加岗位空缺");
            }
            record.secondary.push(SlotEntry {
                role: role.label.clone(),
                assignment,
            });
        }

        record
    }
}
