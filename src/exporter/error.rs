// ==========================================
// Excel 用户导入 - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("读取用户记录失败: {0}")]
    Repository(#[from] RepositoryError),

    #[error("生成工作簿失败: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("工作簿打包失败: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("工作簿读写失败: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
