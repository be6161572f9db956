// ==========================================
// Excel 用户导入 - 单元格类型转换
// ==========================================
// 职责: 每种目标类型一个显式转换函数
// 约束: 空单元格返回 None，由字段校验决定是否必填
// ==========================================

use crate::domain::CellValue;
use crate::importer::error::RowError;

/// 转换为文本
pub fn to_text(cell: &CellValue) -> Option<String> {
    cell.to_text()
}

/// 转换为整数
///
/// # 规则
/// - Number: 截断小数部分
/// - Text: TRIM 后按十进制整数解析，失败为处理错误
/// - Empty / Bool / Other: None
pub fn to_integer(cell: &CellValue) -> Result<Option<i32>, RowError> {
    match cell {
        CellValue::Number(n) => {
            if !n.is_finite() || *n < i32::MIN as f64 || *n > i32::MAX as f64 {
                return Err(invalid_integer());
            }
            Ok(Some(n.trunc() as i32))
        }
        CellValue::Text(s) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| invalid_integer()),
        CellValue::Empty | CellValue::Bool(_) | CellValue::Other => Ok(None),
    }
}

/// 转换为小数
///
/// # 规则
/// - Number: 原值
/// - Text: TRIM 后解析，NaN/无穷视为处理错误
/// - Empty / Bool / Other: None
pub fn to_decimal(cell: &CellValue) -> Result<Option<f64>, RowError> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid_decimal())?,
        CellValue::Empty | CellValue::Bool(_) | CellValue::Other => return Ok(None),
    };

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(invalid_decimal())
    }
}

/// 转换为布尔
///
/// # 规则
/// - Bool: 原值
/// - Text: true/false/yes/no/y/n/1/0（忽略大小写）
/// - Number: 恰为 1 为 true，其余为 false
/// - Empty / 无法识别: 处理错误
pub fn to_flag(cell: &CellValue) -> Result<bool, RowError> {
    match cell {
        CellValue::Bool(b) => Ok(*b),
        CellValue::Number(n) => Ok(*n == 1.0),
        CellValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(true),
            "false" | "no" | "n" | "0" => Ok(false),
            _ => Err(RowError::Processing("Invalid boolean value in cell".to_string())),
        },
        CellValue::Empty => Err(RowError::Processing(
            "Is active flag cannot be empty".to_string(),
        )),
        CellValue::Other => Err(RowError::Processing(
            "Invalid boolean value in cell".to_string(),
        )),
    }
}

fn invalid_integer() -> RowError {
    RowError::Processing("Invalid integer value in cell".to_string())
}

fn invalid_decimal() -> RowError {
    RowError::Processing("Invalid decimal value in cell".to_string())
}
