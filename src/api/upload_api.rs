// ==========================================
// Excel 用户导入 - 上传 API
// ==========================================
// 职责: 封装上传导入用例，决定响应状态码
// 规则: 结果携带任意错误（失败或部分成功）→ 400，否则 200
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{UploadOutcome, UploadedFile};
use crate::importer::UserImporter;
use std::sync::Arc;
use tracing::info;

/// 上传 API 响应
#[derive(Debug, Clone, PartialEq)]
pub struct UploadApiResponse {
    /// HTTP 状态码（200 / 400）
    pub status_code: u16,
    /// 结果摘要（响应体）
    pub outcome: UploadOutcome,
}

/// 上传 API
#[derive(Clone)]
pub struct UploadApi {
    importer: Arc<dyn UserImporter>,
}

impl UploadApi {
    pub fn new(importer: Arc<dyn UserImporter>) -> Self {
        Self { importer }
    }

    /// 处理一次上传
    ///
    /// # 参数
    /// - file: multipart 中的 file 部分（缺失时为 None）
    ///
    /// # 返回
    /// - Ok(UploadApiResponse): 导入已执行（含失败结果）
    /// - Err(ApiError::MissingFile): 请求未携带文件部分
    pub fn upload(&self, file: Option<UploadedFile>) -> ApiResult<UploadApiResponse> {
        let file = file.ok_or(ApiError::MissingFile)?;
        let outcome = self.importer.import_upload(&file);

        let status_code = if outcome.has_errors() { 400 } else { 200 };
        info!(status_code, records = outcome.records_processed, "上传请求处理完成");

        Ok(UploadApiResponse {
            status_code,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UploadStatus;
    use chrono::Local;

    struct FixedImporter(UploadStatus, Option<Vec<String>>);

    impl UserImporter for FixedImporter {
        fn import_upload(&self, upload: &UploadedFile) -> UploadOutcome {
            UploadOutcome {
                file_name: upload.file_name.clone(),
                size: upload.size(),
                upload_date: Local::now().naive_local(),
                status: self.0,
                errors: self.1.clone(),
                records_processed: 0,
            }
        }
    }

    fn file() -> Option<UploadedFile> {
        Some(UploadedFile::new(Some("a.xlsx".to_string()), None, vec![1]))
    }

    #[test]
    fn test_success_is_200() {
        let api = UploadApi::new(Arc::new(FixedImporter(UploadStatus::Success { records: 1 }, None)));
        assert_eq!(api.upload(file()).unwrap().status_code, 200);
    }

    #[test]
    fn test_partial_success_is_400() {
        let api = UploadApi::new(Arc::new(FixedImporter(
            UploadStatus::PartialSuccess {
                records: 1,
                errors: 1,
            },
            Some(vec!["Error processing row 2: Email cannot be empty".to_string()]),
        )));
        assert_eq!(api.upload(file()).unwrap().status_code, 400);
    }

    #[test]
    fn test_missing_file() {
        let api = UploadApi::new(Arc::new(FixedImporter(UploadStatus::Failed, None)));
        assert!(matches!(api.upload(None), Err(ApiError::MissingFile)));
    }
}
