// ==========================================
// Excel 用户导入 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为对外错误响应
// 约束: 对外消息不携带内部细节（库路径、SQL 等只写日志）
// ==========================================

use crate::exporter::ExportError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 客户端错误
    // ==========================================
    #[error("Required request part 'file' is not present")]
    MissingFile,

    #[error("无效请求: {0}")]
    InvalidRequest(String),

    #[error("上传内容超出上限: limit={limit} bytes")]
    PayloadTooLarge { limit: usize },

    // ==========================================
    // 服务端错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("导出失败: {0}")]
    ExportError(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingFile | ApiError::InvalidRequest(_) => 400,
            ApiError::PayloadTooLarge { .. } => 413,
            ApiError::DatabaseError(_) | ApiError::ExportError(_) | ApiError::InternalError(_) => {
                500
            }
        }
    }

    /// 错误类别文案
    pub fn error_label(&self) -> &'static str {
        match self {
            ApiError::MissingFile | ApiError::InvalidRequest(_) => "Validation Error",
            ApiError::PayloadTooLarge { .. } => "Payload Too Large",
            _ => "Internal Server Error",
        }
    }

    /// 对外消息
    pub fn public_message(&self) -> String {
        match self {
            ApiError::MissingFile => self.to_string(),
            ApiError::InvalidRequest(_) => "Malformed multipart request".to_string(),
            ApiError::PayloadTooLarge { .. } => {
                "File size exceeds the maximum allowed limit".to_string()
            }
            ApiError::ExportError(_) => "Error generating Excel file".to_string(),
            _ => "An unexpected error occurred".to_string(),
        }
    }

    /// 转换为错误响应体
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status_code(),
            error: self.error_label().to_string(),
            message: self.public_message(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::LockError(msg) => {
                ApiError::InternalError(format!("数据库锁获取失败: {}", msg))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Repository(e) => e.into(),
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// ErrorResponse - 错误响应体
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFile.status_code(), 400);
        assert_eq!(ApiError::PayloadTooLarge { limit: 10 }.status_code(), 413);
        assert_eq!(ApiError::DatabaseError("x".to_string()).status_code(), 500);
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let err: ApiError =
            RepositoryError::DatabaseQueryError("no such table: user_data".to_string()).into();
        let body = err.to_response();

        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert!(!body.message.contains("user_data"));
    }

    #[test]
    fn test_payload_too_large_response() {
        let body = ApiError::PayloadTooLarge { limit: 1024 }.to_response();
        assert_eq!(
            body,
            ErrorResponse {
                status: 413,
                error: "Payload Too Large".to_string(),
                message: "File size exceeds the maximum allowed limit".to_string(),
            }
        );
    }
}
