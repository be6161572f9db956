// ==========================================
// Excel 用户导入 - 导出 API
// ==========================================
// 职责: 生成下载文件及其响应头
// ==========================================

use crate::api::error::ApiResult;
use crate::exporter::ReportBuilder;
use crate::importer::XLSX_CONTENT_TYPE;
use crate::repository::UserRecordRepository;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// 文件名编码集合（保留字母数字与 . - * _，空格编码为 %20）
const FILE_NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_');

pub const CACHE_CONTROL_VALUE: &str = "no-store,no-cache,must-revalidate";
pub const PRAGMA_VALUE: &str = "no-cache";
pub const NOSNIFF_VALUE: &str = "nosniff";

/// 下载文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcelDownload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExcelDownload {
    /// 下载响应头（名称, 值）
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("content-type", XLSX_CONTENT_TYPE.to_string()),
            (
                "content-disposition",
                format!("attachment; filename=\"{}\"", encode_file_name(&self.file_name)),
            ),
            ("cache-control", CACHE_CONTROL_VALUE.to_string()),
            ("pragma", PRAGMA_VALUE.to_string()),
            ("x-content-type-options", NOSNIFF_VALUE.to_string()),
            ("content-length", self.bytes.len().to_string()),
        ]
    }
}

/// 文件名百分号编码
pub fn encode_file_name(file_name: &str) -> String {
    utf8_percent_encode(file_name, FILE_NAME_ENCODE_SET).to_string()
}

/// 导出 API
pub struct ExportApi<R>
where
    R: UserRecordRepository,
{
    builder: ReportBuilder<R>,
    file_name: Arc<str>,
}

impl<R> ExportApi<R>
where
    R: UserRecordRepository,
{
    pub fn new(repo: R, file_name: impl Into<Arc<str>>) -> Self {
        Self {
            builder: ReportBuilder::new(repo),
            file_name: file_name.into(),
        }
    }

    /// 生成下载文件
    pub fn download(&self) -> ApiResult<ExcelDownload> {
        let bytes = self.builder.build_report()?;
        Ok(ExcelDownload {
            file_name: self.file_name.to_string(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_file_name() {
        assert_eq!(encode_file_name("User_Demo.xlsx"), "User_Demo.xlsx");
        assert_eq!(encode_file_name("Users Report.xlsx"), "Users%20Report.xlsx");
        assert_eq!(encode_file_name("a\"b.xlsx"), "a%22b.xlsx");
    }

    #[test]
    fn test_download_headers() {
        let download = ExcelDownload {
            file_name: "User_Demo.xlsx".to_string(),
            bytes: vec![0; 12],
        };
        let headers = download.headers();

        let get = |name: &str| {
            headers
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(
            get("content-disposition").as_deref(),
            Some("attachment; filename=\"User_Demo.xlsx\"")
        );
        assert_eq!(get("cache-control").as_deref(), Some("no-store,no-cache,must-revalidate"));
        assert_eq!(get("pragma").as_deref(), Some("no-cache"));
        assert_eq!(get("x-content-type-options").as_deref(), Some("nosniff"));
        assert_eq!(get("content-length").as_deref(), Some("12"));
    }
}
