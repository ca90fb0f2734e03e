// ==========================================
// 志愿者值班排班系统 - 名册导入器实现
// ==========================================
// 职责: 整合导入流程，从数据源文件到 RosterInput
// 流程: 解析 → 表头校验 → 逐行映射 → 历史计数汇总
// ==========================================

use crate::config::SourcePaths;
use crate::domain::history::HistoryTable;
use crate::domain::member::{AbsenceRecord, Member, PairRule, RoleRestriction, RosterInput};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{self, FieldMapper as FieldMapperImpl};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::roster_importer_trait::{FieldMapper, RawSheet, RosterSource};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// RosterImporter - 名册导入器
// ==========================================
pub struct RosterImporter {
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,
}

impl RosterImporter {
    pub fn new() -> Self {
        Self::with_mapper(Box::new(FieldMapperImpl::new()))
    }

    /// 使用自定义字段映射器
    pub fn with_mapper(field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper,
        }
    }

    /// 解析文件并校验必需列
    fn parse_sheet(&self, path: &Path, required: &[&[&str]]) -> ImportResult<RawSheet> {
        let sheet = self.file_parser.parse(path)?;
        for aliases in required {
            if !sheet.has_any_column(aliases) {
                return Err(ImportError::MissingColumn {
                    file: path.display().to_string(),
                    expected: aliases.join(" / "),
                });
            }
        }
        Ok(sheet)
    }

    // ==========================================
    // 分表加载
    // ==========================================

    /// 加载成员名册
    ///
    /// 姓名为主键，重复姓名在导入阶段即失败
    pub fn load_members(&self, path: &Path) -> ImportResult<Vec<Member>> {
        let sheet = self.parse_sheet(path, &[field_mapper::MEMBER_NAME])?;
        let mut members = Vec::with_capacity(sheet.records.len());
        let mut seen: HashSet<String> = HashSet::new();
        for record in &sheet.records {
            let member = self.field_mapper.map_member(record)?;
            if !seen.insert(member.name.clone()) {
                return Err(ImportError::DuplicateMember {
                    row: record.row_number,
                    name: member.name,
                });
            }
            members.push(member);
        }

        info!(file = %path.display(), count = members.len(), "成员名册加载完成");
        Ok(members)
    }

    /// 加载禁止搭档表（不完整的行跳过）
    pub fn load_pair_rules(&self, path: &Path) -> ImportResult<Vec<PairRule>> {
        let sheet = self.parse_sheet(path, &[field_mapper::PAIR_A, field_mapper::PAIR_B])?;
        let mut rules = Vec::with_capacity(sheet.records.len());
        for record in &sheet.records {
            match self.field_mapper.map_pair_rule(record) {
                Some(rule) => rules.push(rule),
                None => warn!(row = record.row_number, "禁止搭档行不完整，已跳过"),
            }
        }

        info!(file = %path.display(), count = rules.len(), "禁止搭档表加载完成");
        Ok(rules)
    }

    /// 加载禁止岗位表（不完整的行跳过）
    pub fn load_role_restrictions(&self, path: &Path) -> ImportResult<Vec<RoleRestriction>> {
        let sheet = self.parse_sheet(
            path,
            &[field_mapper::RULE_MEMBER, field_mapper::RESTRICTION_ROLE],
        )?;
        let mut restrictions = Vec::with_capacity(sheet.records.len());
        for record in &sheet.records {
            match self.field_mapper.map_role_restriction(record) {
                Some(restriction) => restrictions.push(restriction),
                None => warn!(row = record.row_number, "禁止岗位行不完整，已跳过"),
            }
        }

        info!(file = %path.display(), count = restrictions.len(), "禁止岗位表加载完成");
        Ok(restrictions)
    }

    /// 加载缺勤表
    ///
    /// 日期无法解析的行保留为 None，由引擎跳过
    pub fn load_absences(&self, path: &Path) -> ImportResult<Vec<AbsenceRecord>> {
        let sheet = self.parse_sheet(
            path,
            &[
                field_mapper::RULE_MEMBER,
                field_mapper::ABSENCE_START,
                field_mapper::ABSENCE_END,
            ],
        )?;
        let mut absences = Vec::with_capacity(sheet.records.len());
        for record in &sheet.records {
            match self.field_mapper.map_absence(record) {
                Some(absence) => absences.push(absence),
                None => warn!(row = record.row_number, "缺勤行没有成员姓名，已跳过"),
            }
        }

        info!(file = %path.display(), count = absences.len(), "缺勤表加载完成");
        Ok(absences)
    }

    /// 加载单个历史计数来源
    pub fn load_history(&self, path: &Path) -> ImportResult<HistoryTable> {
        let sheet = self.parse_sheet(
            path,
            &[field_mapper::HISTORY_NAME, field_mapper::HISTORY_COUNT],
        )?;
        let mut table = HistoryTable::new();
        for record in &sheet.records {
            match self.field_mapper.map_history_row(record)? {
                Some((name, count)) => table.add(&name, count),
                None => debug!(row = record.row_number, "历史计数为空，已跳过"),
            }
        }

        info!(file = %path.display(), count = table.len(), "历史计数加载完成");
        Ok(table)
    }
}

impl Default for RosterImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterSource for RosterImporter {
    #[instrument(skip_all, fields(members = %sources.members.display()))]
    fn load(&self, sources: &SourcePaths) -> ImportResult<RosterInput> {
        let members = self.load_members(&sources.members)?;

        let pair_rules = match &sources.pairs {
            Some(path) => self.load_pair_rules(path)?,
            None => Vec::new(),
        };
        let role_restrictions = match &sources.restrictions {
            Some(path) => self.load_role_restrictions(path)?,
            None => Vec::new(),
        };
        let absences = match &sources.absences {
            Some(path) => self.load_absences(path)?,
            None => Vec::new(),
        };

        // 多个历史来源同名累加
        let history = HistoryTable::merge_sources(
            sources
                .history
                .iter()
                .map(|path| self.load_history(path))
                .collect::<ImportResult<Vec<_>>>()?,
        );

        info!(
            members = members.len(),
            pair_rules = pair_rules.len(),
            role_restrictions = role_restrictions.len(),
            absences = absences.len(),
            history_entries = history.len(),
            "名册导入完成"
        );

        Ok(RosterInput {
            members,
            pair_rules,
            role_restrictions,
            absences,
            history,
        })
    }
}
