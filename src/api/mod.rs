// ==========================================
// Excel 用户导入 - API 层
// ==========================================
// 职责: 传输无关的用例接口，供 HTTP 路由调用
// ==========================================

pub mod error;
pub mod export_api;
pub mod upload_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use export_api::{encode_file_name, ExcelDownload, ExportApi};
pub use upload_api::{UploadApi, UploadApiResponse};
