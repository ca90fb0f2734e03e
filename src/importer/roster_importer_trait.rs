// ==========================================
// 志愿者值班排班系统 - 名册导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 字段映射（含清洗） → 汇总为 RosterInput
// ==========================================

use crate::config::SourcePaths;
use crate::domain::member::{AbsenceRecord, Member, PairRule, RoleRestriction, RosterInput};
use crate::domain::types::Gender;
use crate::importer::error::ImportResult;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// 原始数据结构
// ==========================================

/// 单行原始记录（列名 → 去空白后的单元格文本）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// 表格中的行号（表头为第 1 行）
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

/// 单个工作表 / CSV 文件的原始内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>,

    /// 数据行（已跳过完全空白的行）
    pub records: Vec<RawRecord>,
}

impl RawSheet {
    /// 是否包含任一别名列
    pub fn has_any_column(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|a| self.headers.iter().any(|h| h == a))
    }
}

// ==========================================
// RosterSource Trait
// ==========================================
// 用途: 名册导入主接口
// 实现者: RosterImporter
pub trait RosterSource {
    /// 从配置的数据源文件加载完整排班输入
    ///
    /// # 返回
    /// - Ok(RosterInput): 成员、规则、缺勤、已汇总的历史计数
    /// - Err: 文件读取错误、缺列、主键缺失、类型转换错误
    fn load(&self, sources: &SourcePaths) -> ImportResult<RosterInput>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始工作表
    fn parse_to_raw_sheet(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单元格清洗与值解析接口
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 空白 → None，其余去空白
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 是/否标记（SIM/YES/TRUE/1 等为真，其余为假）
    fn parse_flag(&self, value: Option<&str>) -> bool;

    /// 日类型可用性（仅明确的否定值为不可用）
    fn parse_available(&self, value: Option<&str>) -> bool;

    fn parse_gender(&self, value: Option<&str>) -> Gender;

    /// 宽松日期解析（无法解析 → None）
    fn parse_date(&self, value: Option<&str>) -> Option<NaiveDate>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    fn map_member(&self, record: &RawRecord) -> ImportResult<Member>;

    /// 任一姓名为空时返回 None
    fn map_pair_rule(&self, record: &RawRecord) -> Option<PairRule>;

    fn map_role_restriction(&self, record: &RawRecord) -> Option<RoleRestriction>;

    fn map_absence(&self, record: &RawRecord) -> Option<AbsenceRecord>;

    /// 历史计数行 → (姓名, 计数)
    fn map_history_row(&self, record: &RawRecord) -> ImportResult<Option<(String, u32)>>;
}
