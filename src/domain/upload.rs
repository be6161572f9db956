// ==========================================
// Excel 用户导入 - 上传请求与结果模型
// ==========================================
// 职责: 上传文件描述 + 上传结果摘要（不落库）
// 生命周期: 每次上传构造一次，返回后不再修改
// ==========================================

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

// ==========================================
// UploadedFile - 上传文件
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,    // 原始文件名
    pub content_type: Option<String>, // 声明的媒体类型
    pub bytes: Vec<u8>,               // 文件内容
}

impl UploadedFile {
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// 文件字节数
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ==========================================
// UploadStatus - 上传状态
// ==========================================
// 序列化为展示文案（与响应字段 status 对齐）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Failed,
    Success { records: usize },
    PartialSuccess { records: usize, errors: usize },
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStatus::Failed => write!(f, "Failed"),
            UploadStatus::Success { records } => {
                write!(f, "Success - {} records processed successfully", records)
            }
            UploadStatus::PartialSuccess { records, errors } => write!(
                f,
                "Partial success - {} records processed with {} errors",
                records, errors
            ),
        }
    }
}

impl Serialize for UploadStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ==========================================
// UploadOutcome - 上传结果摘要
// ==========================================
// errors 缺省（None）与空列表语义不同：全部成功时不输出该字段
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub file_name: Option<String>,
    pub size: usize,
    pub upload_date: NaiveDateTime,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub records_processed: usize,
}

impl UploadOutcome {
    /// 结果是否携带错误（决定 HTTP 状态码）
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, UploadStatus::Failed)
    }
}
