// ==========================================
// Excel 用户导入 - 行映射器
// ==========================================
// 职责: 单行单元格 → 候选记录
// 流程: 按表头位置取值 → 类型转换 → 清洗 → 字段校验
// 约束: 遇到第一个失败字段即返回（每行至多一条错误）
// ==========================================

use crate::domain::{CellValue, NewUserRecord, UserField};
use crate::importer::cell_coercion::{to_decimal, to_flag, to_integer, to_text};
use crate::importer::error::RowError;
use crate::importer::field_validator::{
    validate_age, validate_department, validate_email, validate_salary, validate_username,
};
use crate::importer::header_resolver::HeaderIndex;
use crate::importer::sanitizer::Sanitizer;

// ==========================================
// RowMapper - 行映射器
// ==========================================
pub struct RowMapper<'a> {
    headers: &'a HeaderIndex,
    sanitizer: Sanitizer,
}

impl<'a> RowMapper<'a> {
    pub fn new(headers: &'a HeaderIndex, sanitizer: Sanitizer) -> Self {
        Self { headers, sanitizer }
    }

    /// 映射一行
    ///
    /// # 返回
    /// - Ok(NewUserRecord): 全部字段通过清洗与校验
    /// - Err(RowError): 第一个失败字段的错误
    pub fn map_row(&self, row: &[CellValue]) -> Result<NewUserRecord, RowError> {
        let username = self.sanitized_text(row, UserField::Username)?.unwrap_or_default();
        validate_username(&username)?;

        let email = self.sanitized_text(row, UserField::Email)?.unwrap_or_default();
        validate_email(&email)?;

        let age = validate_age(to_integer(self.cell(row, UserField::Age))?)?;

        // 空部门视为未填写
        let department = self
            .sanitized_text(row, UserField::Department)?
            .filter(|d| !d.is_empty());
        validate_department(department.as_deref())?;

        let salary = validate_salary(to_decimal(self.cell(row, UserField::Salary))?)?;

        let is_active = to_flag(self.cell(row, UserField::IsActive))?;

        Ok(NewUserRecord {
            username,
            email,
            age,
            department,
            salary,
            is_active,
        })
    }

    /// 字段对应单元格（行尾缺列视为空）
    fn cell<'r>(&self, row: &'r [CellValue], field: UserField) -> &'r CellValue {
        self.headers
            .position(field)
            .and_then(|idx| row.get(idx))
            .unwrap_or(&CellValue::Empty)
    }

    fn sanitized_text(
        &self,
        row: &[CellValue],
        field: UserField,
    ) -> Result<Option<String>, RowError> {
        let text = to_text(self.cell(row, field));
        Ok(self.sanitizer.sanitize_opt(text.as_deref())?)
    }
}
