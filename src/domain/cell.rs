// ==========================================
// Excel 用户导入 - 单元格值模型
// ==========================================
// 职责: 以封闭枚举表达单元格类型（文本/数值/布尔/其他）
// 约束: 类型分派只能通过 match，不做运行时类型探测
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
// 用途: 文件解析层输出，字段映射层输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// 空单元格（含行长度不足时的缺省列）
    Empty,
    /// 字符串单元格
    Text(String),
    /// 数值单元格（Excel 日期同样以序列号数值保存）
    Number(f64),
    /// 布尔单元格
    Bool(bool),
    /// 公式错误等无法识别的单元格
    Other,
}

impl CellValue {
    /// 单元格字符串化
    ///
    /// # 规则
    /// - Text: 原样返回
    /// - Number: 整数值不带小数位（25 而非 25.0）
    /// - Bool: "true" / "false"
    /// - Empty / Other: None
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Empty | CellValue::Other => None,
        }
    }

    /// 是否为空白单元格（空或仅含空白字符的文本）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text().unwrap_or_default())
    }
}

/// 数值格式化（最短表示）
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text_number_without_trailing_zero() {
        assert_eq!(CellValue::Number(25.0).to_text(), Some("25".to_string()));
        assert_eq!(CellValue::Number(2.5).to_text(), Some("2.5".to_string()));
        assert_eq!(CellValue::Number(-3.0).to_text(), Some("-3".to_string()));
    }

    #[test]
    fn test_to_text_bool_and_empty() {
        assert_eq!(CellValue::Bool(true).to_text(), Some("true".to_string()));
        assert_eq!(CellValue::Empty.to_text(), None);
        assert_eq!(CellValue::Other.to_text(), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".to_string()).is_blank());
        assert!(!CellValue::Text("a".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Other.is_blank());
    }
}
