// ==========================================
// 志愿者值班排班系统 - 约束过滤引擎
// ==========================================
// 职责: 给定值班日与岗位，把候选池过滤为合格成员
// 输入: 候选池 + 约束索引 + 当日已分配成员
// 输出: 合格成员（保持候选池顺序）
// 红线: 纯过滤，无副作用; 结果为空即岗位空缺，不是错误
// ==========================================

use crate::domain::member::Member;
use crate::domain::types::RequiredGender;
use crate::engine::constraint_index::ConstraintIndex;
use crate::engine::day_context::DayContext;
use std::collections::BTreeSet;

// ==========================================
// ConstraintEngine - 约束过滤引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEngine {
    no_repeat: bool,
}

impl ConstraintEngine {
    /// # 参数
    /// - no_repeat: 是否启用"连续值班日不重复"规则
    pub fn new(no_repeat: bool) -> Self {
        Self { no_repeat }
    }

    /// 当日候选池: 可用 + 未缺勤 + （不重复规则）上一值班日未值班
    pub fn day_pool<'a>(&self, index: &'a ConstraintIndex, ctx: &DayContext) -> Vec<&'a Member> {
        index
            .members()
            .iter()
            .filter(|m| index.is_available(&m.name, ctx.day_type))
            .filter(|m| !index.is_absent(&m.name, ctx.date))
            .filter(|m| !(self.no_repeat && ctx.previous_served.contains(&m.name)))
            .collect()
    }

    /// 过滤候选池
    ///
    /// # 规则（依次执行）
    /// 1. 移除该日类型不可用的成员
    /// 2. 移除当日缺勤的成员
    /// 3. 移除当日已分配的成员
    /// 4. 不重复规则启用时，移除上一值班日值班的成员
    /// 5. 移除当日已分配成员的禁止搭档
    /// 6. 移除被禁止担任该岗位的成员（包含匹配）
    /// 7. 岗位限定性别时，移除性别不符的成员
    ///
    /// # 参数
    /// - pool: 候选池
    /// - ctx: 值班日上下文
    /// - slot_role: 岗位名称
    /// - required_gender: 岗位性别要求
    /// - assigned_today: 当日已分配成员（分配顺序）
    pub fn filter<'a>(
        &self,
        index: &ConstraintIndex,
        pool: &[&'a Member],
        ctx: &DayContext,
        slot_role: &str,
        required_gender: RequiredGender,
        assigned_today: &[String],
    ) -> Vec<&'a Member> {
        // 规则 5 的排除集合随当日分配动态变化，每次调用重新计算
        let excluded_partners: BTreeSet<&str> = assigned_today
            .iter()
            .flat_map(|name| index.forbidden_partners(name).iter())
            .map(String::as_str)
            .collect();

        pool.iter()
            .copied()
            // 规则 1: 可用性
            .filter(|m| index.is_available(&m.name, ctx.day_type))
            // 规则 2: 缺勤
            .filter(|m| !index.is_absent(&m.name, ctx.date))
            // 规则 3: 每人每天一个岗位
            .filter(|m| !assigned_today.contains(&m.name))
            // 规则 4: 连续值班日不重复
            .filter(|m| !(self.no_repeat && ctx.previous_served.contains(&m.name)))
            // 规则 5: 禁止搭档
            .filter(|m| !excluded_partners.contains(m.name.as_str()))
            // 规则 6: 禁止岗位
            .filter(|m| !index.is_role_forbidden(&m.name, slot_role))
            // 规则 7: 性别
            .filter(|m| required_gender.admits(m.gender))
            .collect()
    }
}
