// ==========================================
// Excel 用户导入 - 文件格式守卫
// ==========================================
// 职责: 解析前确认上传内容确为 xlsx 容器
// 规则: 声明的媒体类型 + 前 4 字节 ZIP 签名，两者同时满足
// ==========================================

use tracing::debug;

/// xlsx 媒体类型
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// ZIP 本地文件头签名
const ZIP_LOCAL_FILE_HEADER: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
/// ZIP 中央目录结束签名（空归档）
const ZIP_END_OF_CENTRAL_DIR: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];
/// ZIP 数据描述符签名（分卷）
const ZIP_DATA_DESCRIPTOR: [u8; 4] = [0x50, 0x4B, 0x07, 0x08];

const SIGNATURES: [[u8; 4]; 3] = [
    ZIP_LOCAL_FILE_HEADER,
    ZIP_END_OF_CENTRAL_DIR,
    ZIP_DATA_DESCRIPTOR,
];

/// 判断上传内容是否为 xlsx
///
/// # 返回
/// - true: 媒体类型与签名均匹配
/// - false: 任一不匹配（调用方按格式错误处理）
pub fn has_excel_format(content_type: Option<&str>, bytes: &[u8]) -> bool {
    if content_type != Some(XLSX_CONTENT_TYPE) {
        debug!(content_type = ?content_type, "媒体类型不匹配");
        return false;
    }

    has_zip_signature(bytes)
}

/// 校验前 4 字节是否为已知 ZIP 签名
pub fn has_zip_signature(bytes: &[u8]) -> bool {
    let Some(header) = bytes.get(..4) else {
        debug!(len = bytes.len(), "文件不足 4 字节");
        return false;
    };

    SIGNATURES.iter().any(|sig| header == sig.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all_three_signatures() {
        for sig in SIGNATURES {
            let mut bytes = sig.to_vec();
            bytes.extend_from_slice(b"rest of archive");
            assert!(has_excel_format(Some(XLSX_CONTENT_TYPE), &bytes));
        }
    }

    #[test]
    fn test_rejects_spoofed_content_type() {
        // 声明为 xlsx，实际为 PDF
        let bytes = b"%PDF-1.7 ...";
        assert!(!has_excel_format(Some(XLSX_CONTENT_TYPE), bytes));
    }

    #[test]
    fn test_rejects_wrong_content_type() {
        let bytes = [0x50, 0x4B, 0x03, 0x04, 0x00];
        assert!(!has_excel_format(Some("text/csv"), &bytes));
        assert!(!has_excel_format(None, &bytes));
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(!has_excel_format(Some(XLSX_CONTENT_TYPE), &[0x50, 0x4B]));
        assert!(!has_excel_format(Some(XLSX_CONTENT_TYPE), &[]));
    }
}
