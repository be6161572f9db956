// ==========================================
// Excel 用户导入 - 导出报表生成器
// ==========================================
// 职责: 全部用户记录 → 格式化 xlsx 字节
// 格式: 表头加粗居中；数值 #,##0；时间 yyyy-mm-dd hh:mm:ss；列宽自适应
// 工具: rust_xlsxwriter + 文档属性清理
// ==========================================

use crate::domain::UserRecord;
use crate::exporter::error::ExportResult;
use crate::exporter::metadata::strip_document_metadata;
use crate::repository::UserRecordRepository;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use tracing::{info, instrument};

/// 导出工作表名称
pub const EXPORT_SHEET_NAME: &str = "Users Data";

/// 导出表头（固定顺序）
pub const EXPORT_HEADERS: [&str; 8] = [
    "ID",
    "Username",
    "Email",
    "Age",
    "Department",
    "Salary",
    "Is Active",
    "Created At",
];

const NUMBER_FORMAT: &str = "#,##0";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

// ==========================================
// ReportBuilder - 导出报表生成器
// ==========================================
pub struct ReportBuilder<R>
where
    R: UserRecordRepository,
{
    repo: R,
}

impl<R> ReportBuilder<R>
where
    R: UserRecordRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 生成全部用户记录的 xlsx
    #[instrument(skip(self))]
    pub fn build_report(&self) -> ExportResult<Vec<u8>> {
        let records = self.repo.find_all()?;
        let bytes = render_users(&records)?;
        let bytes = strip_document_metadata(&bytes)?;

        info!(records = records.len(), bytes = bytes.len(), "导出工作簿生成完成");
        Ok(bytes)
    }
}

/// 渲染用户记录（不含文档属性清理）
pub fn render_users(records: &[UserRecord]) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let number_format = Format::new().set_num_format(NUMBER_FORMAT);
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        write_record(worksheet, row, record, &number_format, &datetime_format)?;
    }

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

fn write_record(
    worksheet: &mut Worksheet,
    row: u32,
    record: &UserRecord,
    number_format: &Format,
    datetime_format: &Format,
) -> ExportResult<()> {
    worksheet.write_number_with_format(row, 0, record.id as f64, number_format)?;
    worksheet.write_string(row, 1, &record.username)?;
    worksheet.write_string(row, 2, &record.email)?;
    worksheet.write_number_with_format(row, 3, record.age as f64, number_format)?;
    // 未填写部门时不写单元格
    if let Some(department) = &record.department {
        worksheet.write_string(row, 4, department)?;
    }
    worksheet.write_number_with_format(row, 5, record.salary, number_format)?;
    worksheet.write_boolean(row, 6, record.is_active)?;
    worksheet.write_datetime_with_format(row, 7, &record.created_at, datetime_format)?;
    Ok(())
}
