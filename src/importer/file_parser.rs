// ==========================================
// Excel 用户导入 - 文件解析器实现
// ==========================================
// 职责: xlsx 字节 → 第一个工作表的单元格矩阵
// 工具: calamine
// ==========================================

use crate::domain::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::user_importer_trait::SheetParser;
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

// ==========================================
// SheetRows - 工作表行数据
// ==========================================
// 第 0 行为表头；行号按工作表使用区间的相对位置计算
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRows {
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetRows {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// 表头行
    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// 最后一行的索引（0 基，含表头），即数据行数上限口径
    pub fn last_row_index(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// 数据行迭代器: (1 基行号, 单元格)
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[CellValue])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| (idx + 1, row.as_slice()))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl SheetParser for ExcelParser {
    fn parse_first_sheet(&self, bytes: &[u8]) -> ImportResult<SheetRows> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

        // 读取第一个 sheet
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Err(ImportError::NoSheets),
        };

        if range.is_empty() {
            return Err(ImportError::EmptySheet);
        }

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();

        Ok(SheetRows::new(rows))
    }
}

/// calamine 单元格 → CellValue
fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn build_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "username").unwrap();
        sheet.write_string(0, 1, "age").unwrap();
        sheet.write_string(1, 0, "alice").unwrap();
        sheet.write_number(1, 1, 30).unwrap();
        sheet.write_boolean(2, 0, true).unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_first_sheet() {
        let sheet = ExcelParser.parse_first_sheet(&build_workbook()).unwrap();

        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.last_row_index(), 2);
        assert_eq!(
            sheet.header().unwrap(),
            &[
                CellValue::Text("username".to_string()),
                CellValue::Text("age".to_string())
            ]
        );
        assert_eq!(sheet.rows[1][1], CellValue::Number(30.0));
        assert_eq!(sheet.rows[2][0], CellValue::Bool(true));
        assert_eq!(sheet.rows[2][1], CellValue::Empty);
    }

    #[test]
    fn test_data_rows_numbering_starts_at_two() {
        let sheet = ExcelParser.parse_first_sheet(&build_workbook()).unwrap();
        let numbers: Vec<usize> = sheet.data_rows().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn test_parse_garbage_fails() {
        let result = ExcelParser.parse_first_sheet(b"PK\x03\x04 not really a zip");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }
}
