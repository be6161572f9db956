// ==========================================
// Excel 用户导入 - 表头解析
// ==========================================
// 职责: 首行 → 规范化列名到列位置的映射
// 约束: 每次上传新建，只读传递，不跨请求共享
// ==========================================

use crate::domain::{CellValue, UserField};
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use tracing::{debug, error, warn};

// ==========================================
// HeaderIndex - 表头索引
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// 由表头行构建索引（不做必填校验）
    ///
    /// 列名重复时后出现的位置覆盖前者
    pub fn from_row(header_row: &[CellValue]) -> Self {
        let mut positions = HashMap::new();

        for (idx, cell) in header_row.iter().enumerate() {
            let name = normalize_header(cell);
            debug!(header = %name, index = idx, "表头");
            if let Some(prev) = positions.insert(name.clone(), idx) {
                if !name.is_empty() {
                    warn!(header = %name, previous = prev, current = idx, "表头重复，取后者");
                }
            }
        }

        Self { positions }
    }

    /// 构建索引并校验全部必填列
    ///
    /// # 返回
    /// - Ok(HeaderIndex): 全部必填列存在
    /// - Err(MissingHeaders): 缺失列（按固定顺序）
    pub fn resolve(header_row: &[CellValue]) -> ImportResult<Self> {
        let index = Self::from_row(header_row);
        let missing = index.missing_fields();

        if !missing.is_empty() {
            error!(missing = ?missing, "缺少必填表头");
            return Err(ImportError::MissingHeaders { missing });
        }

        Ok(index)
    }

    /// 缺失的必填列
    pub fn missing_fields(&self) -> Vec<String> {
        UserField::ALL
            .iter()
            .filter(|f| !self.positions.contains_key(f.header_name()))
            .map(|f| f.header_name().to_string())
            .collect()
    }

    /// 字段所在列
    pub fn position(&self, field: UserField) -> Option<usize> {
        self.positions.get(field.header_name()).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// 表头单元格规范化: 字符串化 → TRIM → 小写
fn normalize_header(cell: &CellValue) -> String {
    cell.to_text()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(values: &[&str]) -> Vec<CellValue> {
        values
            .iter()
            .map(|v| CellValue::Text(v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_case_and_order_insensitive() {
        let header = row(&["Email", "USERNAME", "age", "department", "salary", "is_active"]);
        let index = HeaderIndex::resolve(&header).unwrap();

        assert_eq!(index.position(UserField::Email), Some(0));
        assert_eq!(index.position(UserField::Username), Some(1));
        assert_eq!(index.position(UserField::IsActive), Some(5));
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let header = row(&[" username ", "email", "age\t", "department", "salary", "is_active"]);
        assert!(HeaderIndex::resolve(&header).is_ok());
    }

    #[test]
    fn test_missing_headers_in_fixed_order() {
        let header = row(&["is_active", "username", "age"]);
        let err = HeaderIndex::resolve(&header).unwrap_err();

        match err {
            ImportError::MissingHeaders { missing } => {
                assert_eq!(missing, vec!["email", "department", "salary"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let header = row(&["username", "email", "age", "department", "salary", "is_active", "Email"]);
        let index = HeaderIndex::resolve(&header).unwrap();
        assert_eq!(index.position(UserField::Email), Some(6));
    }

    #[test]
    fn test_non_text_header_cells() {
        let header = vec![
            CellValue::Number(2024.0),
            CellValue::Bool(true),
            CellValue::Other,
            CellValue::Empty,
        ];
        let index = HeaderIndex::from_row(&header);

        assert_eq!(index.positions.get("2024"), Some(&0));
        assert_eq!(index.positions.get("true"), Some(&1));
        // Other 与 Empty 都映射为空字符串，后者覆盖
        assert_eq!(index.positions.get(""), Some(&3));
    }
}
