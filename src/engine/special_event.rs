// ==========================================
// 志愿者值班排班系统 - 特殊岗位解析引擎
// ==========================================
// 职责: 主岗位之后的附加岗位
//       1) 圣餐团队: 从当日主岗位成员中选取
//       2) 半权重附加岗位（开门/布置）: 优先当日主岗位成员
// 红线: 圣餐团队不修改历史计数，计数增量由提交步骤单独产生
// ==========================================

use crate::domain::day_record::{SlotAssignment, SlotEntry};
use crate::domain::equity::EquityState;
use crate::domain::member::Member;
use crate::domain::slot::{SecondaryRole, TeamRole};
use crate::domain::types::{Gender, RequiredGender, SlotWeight};
use crate::engine::constraint_engine::ConstraintEngine;
use crate::engine::constraint_index::ConstraintIndex;
use crate::engine::day_context::DayContext;
use crate::engine::slot_resolver::SlotResolver;
use tracing::{debug, instrument};

// ==========================================
// SpecialEventResolver - 特殊岗位解析引擎
// ==========================================
pub struct SpecialEventResolver {
    resolver: SlotResolver,
}

impl SpecialEventResolver {
    pub fn new() -> Self {
        Self {
            resolver: SlotResolver::new(),
        }
    }

    /// 选取圣餐团队
    ///
    /// # 规则
    /// 1. 候选 = 当日主岗位成员 − 街门岗位成员 − 被禁止担任团队岗位的成员
    /// 2. 男女各取至多 per_gender 人，按历史计数升序（同值保持岗位顺序）
    /// 3. 不足 quota 时，从剩余候选中按历史计数升序补足（不限性别）
    /// 4. 候选耗尽时返回不足 quota 的名单，不是错误
    ///
    /// # 返回
    /// 团队名单: 男性 → 女性 → 补位
    #[instrument(skip_all, fields(team = %team.label, quota = team.quota))]
    pub fn resolve_team(
        &self,
        index: &ConstraintIndex,
        slots: &[SlotEntry],
        street_door_role: &str,
        team: &TeamRole,
        equity: &EquityState,
    ) -> Vec<String> {
        let street_door_member = street_door_occupant(slots, street_door_role);

        let eligible: Vec<&Member> = slots
            .iter()
            .filter_map(|e| e.assignment.member())
            .filter(|name| Some(*name) != street_door_member)
            .filter(|name| !index.is_role_forbidden(name, &team.label))
            .filter_map(|name| index.member(name))
            .collect();

        // 稳定排序: 历史计数相同保持岗位顺序
        let mut by_history = eligible.clone();
        by_history.sort_by_key(|m| equity.historical_count(&m.name));

        let mut team_members: Vec<String> = Vec::with_capacity(team.quota);
        for gender in [Gender::Male, Gender::Female] {
            team_members.extend(
                by_history
                    .iter()
                    .filter(|m| m.gender == gender)
                    .take(team.per_gender)
                    .map(|m| m.name.clone()),
            );
        }
        team_members.truncate(team.quota);

        if team_members.len() < team.quota {
            let padding: Vec<String> = by_history
                .iter()
                .filter(|m| !team_members.contains(&m.name))
                .take(team.quota - team_members.len())
                .map(|m| m.name.clone())
                .collect();
            team_members.extend(padding);
        }

        debug!(
            eligible = eligible.len(),
            selected = team_members.len(),
            "圣餐团队选取完成"
        );
        team_members
    }

    /// 解析半权重附加岗位
    ///
    /// # 规则
    /// 1. 优先: 当日主岗位成员（岗位顺序，排除街门岗位）中具备能力且未被禁止者
    /// 2. 否则: 当日尚未分配、具备能力且通过全部约束过滤的成员，按岗位排序键选取，
    ///    并登记为当日已分配
    /// 3. 入选者负荷 +0.5，最近值班序号 = 当日
    ///
    /// # 参数
    /// - `day_pool`: 当日候选池
    /// - `assigned_today`: 当日已分配成员（回退选取时追加）
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_secondary(
        &self,
        index: &ConstraintIndex,
        engine: &ConstraintEngine,
        ctx: &DayContext,
        role: &SecondaryRole,
        slots: &[SlotEntry],
        street_door_role: &str,
        day_pool: &[&Member],
        assigned_today: &mut Vec<String>,
        equity: &mut EquityState,
    ) -> SlotAssignment {
        let street_door_member = street_door_occupant(slots, street_door_role);

        // 1. 优先当日主岗位成员
        let preferred = slots
            .iter()
            .filter_map(|e| e.assignment.member())
            .filter(|name| Some(*name) != street_door_member)
            .filter_map(|name| index.member(name))
            .find(|m| {
                m.has_capability(role.capability) && !index.is_role_forbidden(&m.name, &role.label)
            });

        if let Some(member) = preferred {
            equity.credit(&member.name, SlotWeight::Half.value(), ctx.day_index);
            debug!(role = %role.label, member = %member.name, "附加岗位由当日值班成员兼任");
            return SlotAssignment::Assigned(member.name.clone());
        }

        // 2. 回退: 当日未分配的合格成员
        let candidates: Vec<&Member> = engine
            .filter(
                index,
                day_pool,
                ctx,
                &role.label,
                RequiredGender::Any,
                assigned_today.as_slice(),
            )
            .into_iter()
            .filter(|m| m.has_capability(role.capability))
            .collect();

        let assignment = self
            .resolver
            .resolve(&candidates, equity, ctx.day_index, SlotWeight::Half);
        if let Some(name) = assignment.member() {
            assigned_today.push(name.to_string());
            debug!(role = %role.label, member = name, "附加岗位由未分配成员承担");
        }
        assignment
    }
}

impl Default for SpecialEventResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn street_door_occupant<'a>(slots: &'a [SlotEntry], street_door_role: &str) -> Option<&'a str> {
    slots
        .iter()
        .find(|e| e.role == street_door_role)
        .and_then(|e| e.assignment.member())
}
