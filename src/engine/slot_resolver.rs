// ==========================================
// 志愿者值班排班系统 - 岗位选取引擎
// ==========================================
// 职责: 对合格成员排序并选出获胜者（或标记空缺）
// 输入: 过滤后的候选池 + 公平状态
// 输出: 岗位分配结果; 获胜者的公平状态被更新
// ==========================================

use crate::domain::day_record::SlotAssignment;
use crate::domain::equity::EquityState;
use crate::domain::member::Member;
use crate::domain::types::SlotWeight;
use std::cmp::Ordering;
use tracing::debug;

#[cfg(test)]
mod tests;

// ==========================================
// SlotResolver - 岗位选取引擎
// ==========================================
pub struct SlotResolver {
    // 无状态引擎，不需要注入依赖
}

impl SlotResolver {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 选取岗位获胜者并记入公平状态
    ///
    /// # 参数
    /// - `pool`: 过滤后的候选池
    /// - `equity`: 公平状态（获胜者会被更新）
    /// - `day_index`: 当前值班日序号
    /// - `weight`: 岗位权重
    ///
    /// # 返回
    /// - `Assigned(name)`: 排序最小者
    /// - `Vacant`: 候选池为空
    pub fn resolve(
        &self,
        pool: &[&Member],
        equity: &mut EquityState,
        day_index: usize,
        weight: SlotWeight,
    ) -> SlotAssignment {
        match self.pick(pool, equity, day_index) {
            Some(winner) => {
                equity.credit(&winner.name, weight.value(), day_index);
                debug!(
                    member = %winner.name,
                    load = equity.load(&winner.name),
                    candidates = pool.len(),
                    "岗位选取完成"
                );
                SlotAssignment::Assigned(winner.name.clone())
            }
            None => SlotAssignment::Vacant,
        }
    }

    /// 返回排序最小的候选者（不修改状态）
    pub fn pick<'a>(
        &self,
        pool: &[&'a Member],
        equity: &EquityState,
        day_index: usize,
    ) -> Option<&'a Member> {
        pool.iter()
            .copied()
            .min_by(|a, b| self.compare(a, b, equity, day_index))
    }

    /// 按排序键对候选池排序（优先者在前）
    pub fn sort<'a>(
        &self,
        mut pool: Vec<&'a Member>,
        equity: &EquityState,
        day_index: usize,
    ) -> Vec<&'a Member> {
        pool.sort_by(|a, b| self.compare(a, b, equity, day_index));
        pool
    }

    // ==========================================
    // 比较方法
    // ==========================================

    /// 比较两个候选者的优先级
    ///
    /// 排序键依次为:
    /// 1. 本周期负荷 升序
    /// 2. 休息值班日数 降序（从未值班视为最久）
    /// 3. 历史计数 升序
    /// 4. 姓名 升序（保证结果可复现）
    ///
    /// # 返回
    /// Ordering::Less 表示 a 优先于 b
    fn compare(&self, a: &Member, b: &Member, equity: &EquityState, day_index: usize) -> Ordering {
        // 1. 负荷
        match equity.load(&a.name).total_cmp(&equity.load(&b.name)) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. 休息天数（降序）
        let rest = |name: &str| equity.rest_days(name, day_index).unwrap_or(usize::MAX);
        match rest(&b.name).cmp(&rest(&a.name)) {
            Ordering::Equal => {}
            other => return other,
        }

        // 3. 历史计数
        match equity
            .historical_count(&a.name)
            .cmp(&equity.historical_count(&b.name))
        {
            Ordering::Equal => {}
            other => return other,
        }

        // 4. 姓名
        a.name.cmp(&b.name)
    }
}

impl Default for SlotResolver {
    fn default() -> Self {
        Self::new()
    }
}
