// ==========================================
// 志愿者值班排班系统 - 默认配置
// ==========================================
// 职责: 默认岗位布局、附加岗位、圣餐团队参数
// 说明: 周日为重日（5 个岗位），其余日为 3 个岗位
// ==========================================

use crate::domain::slot::{SecondaryRole, SlotDefinition, SlotLayout, TeamRole};
use crate::domain::types::{Capability, DayType, RequiredGender, RoleTrigger};
use std::collections::BTreeSet;

// ===== 岗位名称 =====
pub const STREET_DOOR: &str = "Portaria 1 (Rua)";
pub const INNER_DOOR: &str = "Portaria 2 (Templo)";
pub const INNER_DOOR_A: &str = "Portaria 2 (A)";
pub const INNER_DOOR_B: &str = "Portaria 2 (B)";
pub const TEMPLE_FRONT: &str = "Frente Templo";
pub const TEMPLE_FRONT_MALE: &str = "Frente Templo (M)";
pub const TEMPLE_FRONT_FEMALE: &str = "Frente Templo (F)";

// ===== 附加岗位名称 =====
pub const COMMUNION_TEAM: &str = "Servir Santa Ceia";
pub const OPENING: &str = "Abertura";
pub const DECORATION: &str = "Decoração";

// ===== 圣餐团队参数 =====
pub const TEAM_QUOTA: usize = 4;
pub const TEAM_PER_GENDER: usize = 2;

/// 重日（5 岗位）的日类型
pub const HEAVY_DAY: DayType = DayType::Sunday;

/// 默认岗位布局
///
/// 顺序即解析优先级; 街门岗位排在最前
pub fn slot_layout() -> SlotLayout {
    let light_days: Vec<DayType> = DayType::ALL
        .iter()
        .copied()
        .filter(|d| *d != HEAVY_DAY)
        .collect();

    SlotLayout::new(vec![
        SlotDefinition::new(STREET_DOOR, RequiredGender::Any, DayType::ALL),
        SlotDefinition::new(INNER_DOOR, RequiredGender::Any, light_days.clone()),
        SlotDefinition::new(INNER_DOOR_A, RequiredGender::Any, [HEAVY_DAY]),
        SlotDefinition::new(INNER_DOOR_B, RequiredGender::Any, [HEAVY_DAY]),
        SlotDefinition::new(TEMPLE_FRONT, RequiredGender::Any, light_days),
        SlotDefinition::new(TEMPLE_FRONT_MALE, RequiredGender::Male, [HEAVY_DAY]),
        SlotDefinition::new(TEMPLE_FRONT_FEMALE, RequiredGender::Female, [HEAVY_DAY]),
    ])
}

/// 默认附加岗位: 开门每个值班日，布置仅圣餐日
pub fn secondary_roles() -> Vec<SecondaryRole> {
    vec![
        SecondaryRole {
            label: OPENING.to_string(),
            capability: Capability::CanOpen,
            trigger: RoleTrigger::EveryServiceDay,
        },
        SecondaryRole {
            label: DECORATION.to_string(),
            capability: Capability::CanDecorate,
            trigger: RoleTrigger::SpecialDateOnly,
        },
    ]
}

pub fn team_role() -> TeamRole {
    TeamRole {
        label: COMMUNION_TEAM.to_string(),
        quota: TEAM_QUOTA,
        per_gender: TEAM_PER_GENDER,
    }
}

/// 默认值班日类型: 周日 + 周三
pub fn service_day_types() -> BTreeSet<DayType> {
    [DayType::Sunday, DayType::Wednesday].into_iter().collect()
}

pub fn street_door_role() -> String {
    STREET_DOOR.to_string()
}

pub fn no_repeat() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_slot_counts() {
        let layout = slot_layout();
        assert_eq!(layout.slots_for(DayType::Sunday).len(), 5);
        assert_eq!(layout.slots_for(DayType::Wednesday).len(), 3);
        assert_eq!(layout.slots_for(DayType::Sunday)[0].role, STREET_DOOR);
        assert_eq!(layout.slots_for(DayType::Wednesday)[0].role, STREET_DOOR);
    }

    #[test]
    fn test_sunday_front_slots_are_gendered() {
        let layout = slot_layout();
        let sunday = layout.slots_for(DayType::Sunday);
        let male = sunday.iter().find(|s| s.role == TEMPLE_FRONT_MALE).unwrap();
        assert_eq!(male.required_gender, RequiredGender::Male);
        let female = sunday.iter().find(|s| s.role == TEMPLE_FRONT_FEMALE).unwrap();
        assert_eq!(female.required_gender, RequiredGender::Female);
    }
}
