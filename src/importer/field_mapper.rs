// ==========================================
// 志愿者值班排班系统 - 字段映射器实现
// ==========================================
// 职责: 源列（葡/英别名） → 领域结构 + 类型转换
// ==========================================

use crate::domain::member::{AbsenceRecord, Member, PairRule, RoleRestriction};
use crate::domain::types::DayType;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::roster_importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait, RawRecord,
};

// ==========================================
// 列名别名
// ==========================================

pub const MEMBER_NAME: &[&str] = &["Nome", "Name"];
pub const MEMBER_GENDER: &[&str] = &["Sexo", "Gender"];
pub const MEMBER_CAN_OPEN: &[&str] = &["Abertura", "CanOpen"];
pub const MEMBER_CAN_DECORATE: &[&str] = &["Decoração", "Decoracao", "CanDecorate"];
pub const MEMBER_FORBIDDEN_PARTNERS: &[&str] = &["Duplas Proibidas", "ForbiddenPartners"];
pub const MEMBER_FORBIDDEN_ROLES: &[&str] = &["Funções Proibidas", "ForbiddenRoles"];

pub const PAIR_A: &[&str] = &["Pessoa A", "PersonA"];
pub const PAIR_B: &[&str] = &["Pessoa B", "PersonB"];

pub const RULE_MEMBER: &[&str] = &["Membro", "Member"];
pub const RESTRICTION_ROLE: &[&str] = &["Função Proibida", "ForbiddenRole"];
pub const ABSENCE_START: &[&str] = &["Início", "Inicio", "Start"];
pub const ABSENCE_END: &[&str] = &["Fim", "End"];

pub const HISTORY_NAME: &[&str] = &["Nome", "Membro", "Name"];
pub const HISTORY_COUNT: &[&str] = &["Contagem", "Count", "Santa Ceia"];

/// 日类型对应的可用性列
pub fn day_columns(day_type: DayType) -> &'static [&'static str] {
    match day_type {
        DayType::Monday => &["Segunda", "Monday"],
        DayType::Tuesday => &["Terça", "Terca", "Tuesday"],
        DayType::Wednesday => &["Quarta", "Wednesday"],
        DayType::Thursday => &["Quinta", "Thursday"],
        DayType::Friday => &["Sexta", "Friday"],
        DayType::Saturday => &["Sábado", "Sabado", "Saturday"],
        DayType::Sunday => &["Domingo", "Sunday"],
    }
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 提取字段（按别名顺序取第一个非空值）
    fn get_string(&self, record: &RawRecord, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .find_map(|alias| {
                self.cleaner
                    .normalize_null(record.fields.get(*alias).map(String::as_str))
            })
    }

    /// 提取原始字段（不区分空白与缺列时返回 None）
    fn get_raw<'a>(&self, record: &'a RawRecord, aliases: &[&str]) -> Option<&'a str> {
        aliases
            .iter()
            .find_map(|alias| record.fields.get(*alias).map(String::as_str))
    }

    /// 解析非负整数计数（兼容 Excel 的 "3.0"）
    fn parse_count(&self, value: &str, row_number: usize) -> ImportResult<u32> {
        if let Ok(count) = value.parse::<u32>() {
            return Ok(count);
        }
        match value.parse::<f64>() {
            Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
            _ => Err(ImportError::TypeConversionError {
                row: row_number,
                field: HISTORY_COUNT[0].to_string(),
                message: format!("无法解析为非负整数: {}", value),
            }),
        }
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_member(&self, record: &RawRecord) -> ImportResult<Member> {
        let name = self
            .get_string(record, MEMBER_NAME)
            .ok_or(ImportError::PrimaryKeyMissing(record.row_number))?;

        let gender = self
            .cleaner
            .parse_gender(self.get_raw(record, MEMBER_GENDER));

        let mut member = Member::new(name, gender);
        member.availability = DayType::ALL
            .iter()
            .copied()
            .filter(|day| {
                self.cleaner
                    .parse_available(self.get_raw(record, day_columns(*day)))
            })
            .collect();
        member.can_open = self.cleaner.parse_flag(self.get_raw(record, MEMBER_CAN_OPEN));
        member.can_decorate = self
            .cleaner
            .parse_flag(self.get_raw(record, MEMBER_CAN_DECORATE));
        member.forbidden_partners_raw = self.get_string(record, MEMBER_FORBIDDEN_PARTNERS);
        member.forbidden_roles_raw = self.get_string(record, MEMBER_FORBIDDEN_ROLES);

        Ok(member)
    }

    fn map_pair_rule(&self, record: &RawRecord) -> Option<PairRule> {
        Some(PairRule {
            member_a: self.get_string(record, PAIR_A)?,
            member_b: self.get_string(record, PAIR_B)?,
        })
    }

    fn map_role_restriction(&self, record: &RawRecord) -> Option<RoleRestriction> {
        Some(RoleRestriction {
            member: self.get_string(record, RULE_MEMBER)?,
            role_text: self.get_string(record, RESTRICTION_ROLE)?,
        })
    }

    fn map_absence(&self, record: &RawRecord) -> Option<AbsenceRecord> {
        Some(AbsenceRecord {
            member: self.get_string(record, RULE_MEMBER)?,
            start: self.cleaner.parse_date(self.get_raw(record, ABSENCE_START)),
            end: self.cleaner.parse_date(self.get_raw(record, ABSENCE_END)),
        })
    }

    fn map_history_row(&self, record: &RawRecord) -> ImportResult<Option<(String, u32)>> {
        let name = self
            .get_string(record, HISTORY_NAME)
            .ok_or(ImportError::PrimaryKeyMissing(record.row_number))?;

        match self.get_string(record, HISTORY_COUNT) {
            None => Ok(None),
            Some(value) => Ok(Some((name, self.parse_count(&value, record.row_number)?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Gender;
    use chrono::NaiveDate;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        RawRecord {
            row_number: 2,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_map_member_portuguese_columns() {
        let mapper = FieldMapper::new();
        let member = mapper
            .map_member(&record(&[
                ("Nome", "Ana"),
                ("Sexo", "F"),
                ("Abertura", "SIM"),
                ("Domingo", "SIM"),
                ("Quarta", "NÃO"),
                ("Duplas Proibidas", "Bruno; Carla"),
            ]))
            .unwrap();

        assert_eq!(member.name, "Ana");
        assert_eq!(member.gender, Gender::Female);
        assert!(member.can_open);
        assert!(!member.can_decorate);
        assert!(member.availability.contains(&DayType::Sunday));
        assert!(!member.availability.contains(&DayType::Wednesday));
        // 缺列视为可用
        assert!(member.availability.contains(&DayType::Friday));
        assert_eq!(member.forbidden_partners_raw.as_deref(), Some("Bruno; Carla"));
        assert_eq!(member.forbidden_roles_raw, None);
    }

    #[test]
    fn test_map_member_english_columns() {
        let mapper = FieldMapper::new();
        let member = mapper
            .map_member(&record(&[
                ("Name", "Bruno"),
                ("Gender", "M"),
                ("CanDecorate", "yes"),
                ("Sunday", "no"),
            ]))
            .unwrap();

        assert_eq!(member.gender, Gender::Male);
        assert!(member.can_decorate);
        assert!(!member.availability.contains(&DayType::Sunday));
    }

    #[test]
    fn test_map_member_without_name_is_fatal() {
        let mapper = FieldMapper::new();
        let result = mapper.map_member(&record(&[("Nome", "  "), ("Sexo", "F")]));
        assert!(matches!(result, Err(ImportError::PrimaryKeyMissing(2))));
    }

    #[test]
    fn test_map_rules() {
        let mapper = FieldMapper::new();

        let pair = mapper
            .map_pair_rule(&record(&[("Pessoa A", "Ana"), ("Pessoa B", "Bruno")]))
            .unwrap();
        assert_eq!(pair.member_b, "Bruno");
        assert!(mapper.map_pair_rule(&record(&[("Pessoa A", "Ana")])).is_none());

        let restriction = mapper
            .map_role_restriction(&record(&[("Membro", "Ana"), ("Função Proibida", "Portaria")]))
            .unwrap();
        assert_eq!(restriction.role_text, "Portaria");
    }

    #[test]
    fn test_map_absence_keeps_unparsable_dates_as_none() {
        let mapper = FieldMapper::new();
        let absence = mapper
            .map_absence(&record(&[
                ("Membro", "Ana"),
                ("Início", "01/03/2026"),
                ("Fim", "???"),
            ]))
            .unwrap();
        assert_eq!(absence.start, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(absence.end, None);
    }

    #[test]
    fn test_map_history_row() {
        let mapper = FieldMapper::new();
        assert_eq!(
            mapper
                .map_history_row(&record(&[("Nome", "Ana"), ("Santa Ceia", "3.0")]))
                .unwrap(),
            Some(("Ana".to_string(), 3))
        );
        assert_eq!(
            mapper.map_history_row(&record(&[("Nome", "Ana")])).unwrap(),
            None
        );
        assert!(matches!(
            mapper.map_history_row(&record(&[("Nome", "Ana"), ("Contagem", "-1")])),
            Err(ImportError::TypeConversionError { row: 2, .. })
        ));
    }
}
