// ==========================================
// 志愿者值班排班系统 - 导入层
// ==========================================
// 职责: 外部数据导入，生成 RosterInput
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod roster_importer;
pub mod roster_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use roster_importer::RosterImporter;

// 重导出 Trait 接口
pub use roster_importer_trait::{
    DataCleaner, FieldMapper, FileParser, RawRecord, RawSheet, RosterSource,
};
