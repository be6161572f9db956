// ==========================================
// Excel 用户导入 - 导入层
// ==========================================
// 职责: 上传字节 → 校验/清洗后的用户记录 + 结果摘要
// 支持: xlsx（第一个工作表）
// ==========================================

// 模块声明
pub mod cell_coercion;
pub mod error;
pub mod field_validator;
pub mod file_parser;
pub mod format_guard;
pub mod header_resolver;
pub mod outcome_aggregator;
pub mod row_mapper;
pub mod sanitizer;
pub mod user_importer_impl;
pub mod user_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult, RowError, SanitizeError};
pub use file_parser::{ExcelParser, SheetRows};
pub use format_guard::{has_excel_format, XLSX_CONTENT_TYPE};
pub use header_resolver::HeaderIndex;
pub use row_mapper::RowMapper;
pub use sanitizer::{InjectionKind, Sanitizer};
pub use user_importer_impl::UserImporterImpl;

// 重导出 Trait 接口
pub use user_importer_trait::{SheetParser, UserImporter};
