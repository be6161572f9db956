// ==========================================
// Excel 用户导入 - 导出层
// ==========================================
// 职责: 已落库用户记录 → 可下载的 xlsx
// ==========================================

pub mod error;
pub mod metadata;
pub mod report_builder;

pub use error::{ExportError, ExportResult};
pub use metadata::strip_document_metadata;
pub use report_builder::{ReportBuilder, EXPORT_HEADERS, EXPORT_SHEET_NAME};
