// ==========================================
// Excel 用户导入 - 结果汇总
// ==========================================
// 职责: (落库条数, 错误列表) → 上传状态 + 结果摘要
// 约束: 纯函数，不做 I/O
// ==========================================

use crate::domain::{UploadOutcome, UploadStatus, UploadedFile};
use crate::importer::error::ImportError;
use chrono::NaiveDateTime;

/// 状态判定表
///
/// | stored | errors   | status          | errors 字段 |
/// |--------|----------|-----------------|-------------|
/// | 0      | 空       | Failed          | [NoValidData] |
/// | 0      | 非空     | Failed          | 原样保留    |
/// | >0     | 空       | Success         | 缺省        |
/// | >0     | 非空     | PartialSuccess  | 原样保留    |
pub fn decide(stored: usize, mut errors: Vec<String>) -> (UploadStatus, Option<Vec<String>>) {
    match (stored, errors.is_empty()) {
        (0, true) => {
            errors.push(ImportError::NoValidData.to_string());
            (UploadStatus::Failed, Some(errors))
        }
        (0, false) => (UploadStatus::Failed, Some(errors)),
        (records, true) => (UploadStatus::Success { records }, None),
        (records, false) => {
            let status = UploadStatus::PartialSuccess {
                records,
                errors: errors.len(),
            };
            (status, Some(errors))
        }
    }
}

/// 按判定表生成结果摘要
pub fn summarize(
    upload: &UploadedFile,
    stored: usize,
    errors: Vec<String>,
    upload_date: NaiveDateTime,
) -> UploadOutcome {
    let (status, errors) = decide(stored, errors);
    let records_processed = if matches!(status, UploadStatus::Failed) {
        0
    } else {
        stored
    };

    UploadOutcome {
        file_name: upload.file_name.clone(),
        size: upload.size(),
        upload_date,
        status,
        errors,
        records_processed,
    }
}

/// 整单失败的结果摘要（文件级错误 / 落库失败）
pub fn failed(upload: &UploadedFile, errors: Vec<String>, upload_date: NaiveDateTime) -> UploadOutcome {
    UploadOutcome {
        file_name: upload.file_name.clone(),
        size: upload.size(),
        upload_date,
        status: UploadStatus::Failed,
        errors: Some(errors),
        records_processed: 0,
    }
}
