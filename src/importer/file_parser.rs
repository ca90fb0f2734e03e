// ==========================================
// 志愿者值班排班系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls，取第一个工作表) / CSV (.csv，UTF-8)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::roster_importer_trait::{FileParser, RawRecord, RawSheet};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Days, NaiveDate};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 检查文件存在且扩展名在允许列表中
fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let ext = extension_of(path);
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 按表头组装一行; 完全空白的行返回 None
fn build_record(
    headers: &[String],
    cells: impl Iterator<Item = String>,
    row_number: usize,
) -> Option<RawRecord> {
    let mut fields = HashMap::new();
    for (header, value) in headers.iter().zip(cells) {
        if header.is_empty() {
            continue;
        }
        fields.insert(header.clone(), value.trim().to_string());
    }

    if fields.values().all(|v| v.is_empty()) {
        return None;
    }
    Some(RawRecord { row_number, fields })
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_file(file_path, &["csv"])?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头（去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let cells = record.iter().map(str::to_string);
            if let Some(raw) = build_record(&headers, cells, idx + 2) {
                records.push(raw);
            }
        }

        Ok(RawSheet { headers, records })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → 文本; 日期单元格统一为 YYYY-MM-DD
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::DateTime(dt) => {
                excel_serial_to_date(dt.as_f64())
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| cell.to_string())
            }
            Data::DateTimeIso(iso) => iso.chars().take(10).collect(),
            Data::Empty => String::new(),
            _ => cell.to_string(),
        }
    }
}

/// Excel 序列日期（1900 日期系统）
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

impl FileParser for ExcelParser {
    fn parse_to_raw_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_file(file_path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| Self::cell_to_string(cell).trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let cells = data_row.iter().map(Self::cell_to_string);
            if let Some(raw) = build_record(&headers, cells, idx + 2) {
                records.push(raw);
            }
        }

        Ok(RawSheet { headers, records })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawSheet> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_sheet(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_sheet(path),
            other => {
                if !path.exists() {
                    return Err(ImportError::FileNotFound(path.display().to_string()));
                }
                Err(ImportError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = csv_file(&["Nome,Sexo,Domingo", "Ana,F,SIM", "Bruno,M,NÃO"]);

        let sheet = CsvParser.parse_to_raw_sheet(file.path()).unwrap();

        assert_eq!(sheet.headers, vec!["Nome", "Sexo", "Domingo"]);
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[0].fields.get("Nome"), Some(&"Ana".to_string()));
        assert_eq!(sheet.records[1].fields.get("Domingo"), Some(&"NÃO".to_string()));
        assert_eq!(sheet.records[1].row_number, 3);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_sheet(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let file = csv_file(&["Nome,Sexo", "Ana,F", " , ", "Bruno,M"]);

        let sheet = CsvParser.parse_to_raw_sheet(file.path()).unwrap();

        // 应跳过空行
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[1].row_number, 4);
    }

    #[test]
    fn test_csv_parser_strips_bom() {
        let file = csv_file(&["\u{feff}Nome,Sexo", "Ana,F"]);
        let sheet = CsvParser.parse_to_raw_sheet(file.path()).unwrap();
        assert!(sheet.has_any_column(&["Nome"]));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_excel_serial_to_date() {
        // 45658 = 2025-01-01
        assert_eq!(
            excel_serial_to_date(45658.0),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert_eq!(excel_serial_to_date(-1.0), None);
    }
}
