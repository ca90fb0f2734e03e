// ==========================================
// 志愿者值班排班系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 是否标记 / 性别 / 日期解析
// ==========================================

use crate::domain::types::Gender;
use crate::importer::roster_importer_trait::DataCleaner as DataCleanerTrait;
use chrono::NaiveDate;

/// 肯定值（大写比较）
const YES_VALUES: [&str; 6] = ["SIM", "S", "YES", "Y", "TRUE", "1"];

/// 否定值（大写比较）
const NO_VALUES: [&str; 6] = ["NÃO", "NAO", "NO", "N", "FALSE", "0"];

/// 接受的日期格式（依次尝试）
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d"];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_flag(&self, value: Option<&str>) -> bool {
        self.normalize_null(value)
            .map(|v| YES_VALUES.contains(&v.to_uppercase().as_str()))
            .unwrap_or(false)
    }

    fn parse_available(&self, value: Option<&str>) -> bool {
        self.normalize_null(value)
            .map(|v| !NO_VALUES.contains(&v.to_uppercase().as_str()))
            .unwrap_or(true)
    }

    fn parse_gender(&self, value: Option<&str>) -> Gender {
        match self.normalize_null(value).map(|v| v.to_uppercase()).as_deref() {
            Some("M" | "H" | "MALE" | "MASCULINO") => Gender::Male,
            Some("F" | "FEMALE" | "FEMININO") => Gender::Female,
            _ => Gender::Unspecified,
        }
    }

    fn parse_date(&self, value: Option<&str>) -> Option<NaiveDate> {
        let value = self.normalize_null(value)?;
        // Excel 导出的日期时间只取日期部分
        let date_part = value.split_whitespace().next().unwrap_or(&value);
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
    }
}
