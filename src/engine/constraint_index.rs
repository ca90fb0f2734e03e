// ==========================================
// 志愿者值班排班系统 - 约束索引
// ==========================================
// 职责: 由名册一次性构建查找结构
//       禁止搭档表 / 禁止岗位表 / 缺勤区间表 / 可用性矩阵
// 红线: 构建后只读; 引用未知姓名的规则静默忽略
// ==========================================

use crate::domain::member::{split_raw_list, AbsenceRecord, Member, RosterInput};
use crate::domain::types::DayType;
use crate::engine::error::{EngineResult, ScheduleError};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

static NO_PARTNERS: BTreeSet<String> = BTreeSet::new();

// ==========================================
// AbsenceInterval - 缺勤区间（首尾均包含）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsenceInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AbsenceInterval {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ==========================================
// ConstraintIndex - 约束索引
// ==========================================
#[derive(Debug, Clone)]
pub struct ConstraintIndex {
    members: Vec<Member>,
    positions: HashMap<String, usize>,
    forbidden_partners: HashMap<String, BTreeSet<String>>,
    forbidden_roles: HashMap<String, Vec<String>>,
    absences: HashMap<String, Vec<AbsenceInterval>>,
}

impl ConstraintIndex {
    /// 由名册输入构建索引
    ///
    /// # 规则
    /// 1. 姓名为空或重复 → 致命错误
    /// 2. 禁止搭档对称登记; 任一方未知则忽略
    /// 3. 禁止岗位文本去空白后登记; 空文本忽略
    /// 4. 缺勤日期缺失或首尾倒置 → 跳过该行
    pub fn build(input: &RosterInput) -> EngineResult<Self> {
        let mut positions = HashMap::with_capacity(input.members.len());
        for (idx, member) in input.members.iter().enumerate() {
            let name = member.name.trim();
            if name.is_empty() {
                return Err(ScheduleError::MissingMemberName(idx + 1));
            }
            if positions.insert(name.to_string(), idx).is_some() {
                return Err(ScheduleError::DuplicateMember(name.to_string()));
            }
        }

        let mut index = Self {
            members: input
                .members
                .iter()
                .cloned()
                .map(|mut m| {
                    m.name = m.name.trim().to_string();
                    m
                })
                .collect(),
            positions,
            forbidden_partners: HashMap::new(),
            forbidden_roles: HashMap::new(),
            absences: HashMap::new(),
        };

        // ===== 禁止搭档 =====
        for rule in &input.pair_rules {
            index.register_pair(&rule.member_a, &rule.member_b);
        }
        for member in &input.members {
            if let Some(raw) = &member.forbidden_partners_raw {
                for partner in split_raw_list(raw) {
                    index.register_pair(&member.name, &partner);
                }
            }
        }

        // ===== 禁止岗位 =====
        for rule in &input.role_restrictions {
            index.register_role_restriction(&rule.member, &rule.role_text);
        }
        for member in &input.members {
            if let Some(raw) = &member.forbidden_roles_raw {
                for role_text in split_raw_list(raw) {
                    index.register_role_restriction(&member.name, &role_text);
                }
            }
        }

        // ===== 缺勤区间 =====
        for record in &input.absences {
            index.register_absence(record);
        }

        info!(
            members = index.members.len(),
            pair_entries = index.forbidden_partners.len(),
            role_restricted = index.forbidden_roles.len(),
            absent_members = index.absences.len(),
            "约束索引构建完成"
        );

        Ok(index)
    }

    fn register_pair(&mut self, a: &str, b: &str) {
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() || a == b {
            return;
        }
        if !self.contains(a) || !self.contains(b) {
            debug!(member_a = a, member_b = b, "禁止搭档引用未知成员，忽略");
            return;
        }
        self.forbidden_partners
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.forbidden_partners
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    fn register_role_restriction(&mut self, member: &str, role_text: &str) {
        let (member, role_text) = (member.trim(), role_text.trim());
        if member.is_empty() || role_text.is_empty() {
            return;
        }
        if !self.contains(member) {
            debug!(member, role_text, "禁止岗位引用未知成员，忽略");
            return;
        }
        let roles = self.forbidden_roles.entry(member.to_string()).or_default();
        if !roles.iter().any(|r| r == role_text) {
            roles.push(role_text.to_string());
        }
    }

    fn register_absence(&mut self, record: &AbsenceRecord) {
        let member = record.member.trim();
        let (start, end) = match (record.start, record.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                warn!(member, "缺勤记录日期无效，跳过该行");
                return;
            }
        };
        if start > end {
            warn!(member, %start, %end, "缺勤记录首尾倒置，跳过该行");
            return;
        }
        if !self.contains(member) {
            debug!(member, "缺勤记录引用未知成员，忽略");
            return;
        }
        self.absences
            .entry(member.to_string())
            .or_default()
            .push(AbsenceInterval { start, end });
    }

    // ==========================================
    // 查询方法
    // ==========================================

    /// 名册成员（保持输入顺序）
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.positions.get(name).map(|&idx| &self.members[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// 成员在该日类型是否可值班（未知成员 → false）
    pub fn is_available(&self, name: &str, day_type: DayType) -> bool {
        self.member(name)
            .map(|m| m.availability.contains(&day_type))
            .unwrap_or(false)
    }

    /// 日期是否落在成员任一缺勤区间内
    pub fn is_absent(&self, name: &str, date: NaiveDate) -> bool {
        self.absences
            .get(name)
            .map(|intervals| intervals.iter().any(|i| i.contains(date)))
            .unwrap_or(false)
    }

    pub fn forbidden_partners(&self, name: &str) -> &BTreeSet<String> {
        self.forbidden_partners.get(name).unwrap_or(&NO_PARTNERS)
    }

    /// 成员是否被禁止担任该岗位
    ///
    /// 包含匹配: 禁止文本出现在岗位名称中即命中
    /// （"Frente Templo" 同时命中 "Frente Templo (M)"）
    pub fn is_role_forbidden(&self, name: &str, slot_role: &str) -> bool {
        self.forbidden_roles
            .get(name)
            .map(|roles| roles.iter().any(|r| slot_role.contains(r.as_str())))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::{PairRule, RoleRestriction};
    use crate::domain::types::Gender;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn roster(names: &[&str]) -> RosterInput {
        RosterInput {
            members: names.iter().map(|n| Member::new(*n, Gender::Female)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_rejects_blank_and_duplicate_names() {
        let input = roster(&["Ana", "  "]);
        assert!(matches!(
            ConstraintIndex::build(&input),
            Err(ScheduleError::MissingMemberName(2))
        ));

        let input = roster(&["Ana", "Bia", "Ana"]);
        assert!(matches!(
            ConstraintIndex::build(&input),
            Err(ScheduleError::DuplicateMember(name)) if name == "Ana"
        ));
    }

    #[test]
    fn test_pairs_are_symmetric_and_unknown_ignored() {
        let mut input = roster(&["Ana", "Bia", "Caio"]);
        input.pair_rules.push(PairRule {
            member_a: "Ana".into(),
            member_b: "Bia".into(),
        });
        input.pair_rules.push(PairRule {
            member_a: "Caio".into(),
            member_b: "Fantasma".into(),
        });
        input.members[2].forbidden_partners_raw = Some("Ana; Ninguém".into());

        let index = ConstraintIndex::build(&input).unwrap();
        assert!(index.forbidden_partners("Bia").contains("Ana"));
        assert!(index.forbidden_partners("Ana").contains("Bia"));
        assert!(index.forbidden_partners("Ana").contains("Caio"));
        assert_eq!(index.forbidden_partners("Caio").len(), 1);
        assert!(index.forbidden_partners("Fantasma").is_empty());
    }

    #[test]
    fn test_role_restriction_uses_contains_semantics() {
        let mut input = roster(&["Ana", "Bia"]);
        input.role_restrictions.push(RoleRestriction {
            member: "Ana".into(),
            role_text: "Frente Templo".into(),
        });
        input.role_restrictions.push(RoleRestriction {
            member: "Bia".into(),
            role_text: "   ".into(),
        });
        input.members[1].forbidden_roles_raw = Some("Santa Ceia".into());

        let index = ConstraintIndex::build(&input).unwrap();
        assert!(index.is_role_forbidden("Ana", "Frente Templo"));
        assert!(index.is_role_forbidden("Ana", "Frente Templo (M)"));
        assert!(!index.is_role_forbidden("Ana", "Portaria 1 (Rua)"));
        assert!(index.is_role_forbidden("Bia", "Servir Santa Ceia"));
        // 空白文本不得命中所有岗位
        assert!(!index.is_role_forbidden("Bia", "Portaria 2 (A)"));
    }

    #[test]
    fn test_absence_inclusive_and_malformed_rows_skipped() {
        let mut input = roster(&["Ana", "Bia"]);
        input.absences.push(AbsenceRecord {
            member: "Ana".into(),
            start: Some(date(2026, 3, 1)),
            end: Some(date(2026, 3, 8)),
        });
        input.absences.push(AbsenceRecord {
            member: "Bia".into(),
            start: None,
            end: Some(date(2026, 3, 8)),
        });
        input.absences.push(AbsenceRecord {
            member: "Bia".into(),
            start: Some(date(2026, 3, 9)),
            end: Some(date(2026, 3, 1)),
        });

        let index = ConstraintIndex::build(&input).unwrap();
        assert!(index.is_absent("Ana", date(2026, 3, 1)));
        assert!(index.is_absent("Ana", date(2026, 3, 8)));
        assert!(!index.is_absent("Ana", date(2026, 3, 9)));
        assert!(!index.is_absent("Bia", date(2026, 3, 4)));
    }

    #[test]
    fn test_availability_matrix() {
        let mut input = roster(&["Ana"]);
        input.members[0].availability.remove(&DayType::Wednesday);

        let index = ConstraintIndex::build(&input).unwrap();
        assert!(index.is_available("Ana", DayType::Sunday));
        assert!(!index.is_available("Ana", DayType::Wednesday));
        assert!(!index.is_available("Fantasma", DayType::Sunday));
    }
}
