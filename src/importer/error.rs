// ==========================================
// Excel 用户导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 文件级错误（整单拒绝） / 行级错误（记录后跳过）
// ==========================================

use thiserror::Error;

/// 文件级导入错误（整个请求失败）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File is empty or null")]
    EmptyFile,

    #[error("Invalid file format. Please upload a valid Excel file (.xlsx). File signature validation failed.")]
    InvalidFormat,

    #[error("Error reading Excel file: {0}")]
    ExcelParseError(String),

    #[error("Excel file does not contain any sheets")]
    NoSheets,

    #[error("Excel file is empty")]
    EmptySheet,

    // ===== 表头/规模错误 =====
    #[error("Invalid header format: The following required columns are missing: {}", .missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    #[error("File contains too many rows ({found}). Maximum allowed: {limit}")]
    TooManyRows { found: usize, limit: usize },

    // ===== 数据错误 =====
    #[error("No valid data found in the Excel file")]
    NoValidData,

    // ===== 数据库错误 =====
    #[error("Error saving data to database: {0}")]
    PersistenceError(String),
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

/// 落库失败时返回给调用方的说明（具体原因只写日志）
pub const PERSISTENCE_FAILURE_DETAIL: &str = "the batch could not be stored";

/// 清洗错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// 命中注入特征（客户端输入错误，非服务端故障）
    #[error("Malicious content detected. Input contains potentially dangerous script patterns.")]
    MaliciousContent,
}

/// 行级错误（只影响当前行）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// 字段约束不满足
    #[error("{0}")]
    Validation(String),

    /// 清洗检测到恶意内容
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    /// 单元格无法转换为目标类型
    #[error("Error mapping row data to entity: {0}")]
    Processing(String),
}

impl RowError {
    /// 是否属于校验类错误（映射为 4xx 语义）
    pub fn is_validation(&self) -> bool {
        matches!(self, RowError::Validation(_) | RowError::Sanitize(_))
    }

    /// 生成带行号的错误文案
    pub fn for_row(&self, row_number: usize) -> String {
        format!("Error processing row {}: {}", row_number, self)
    }
}
