// ==========================================
// Excel 用户导入 - 领域模型层
// ==========================================
// 职责: 定义领域实体与值类型
// 红线: 不含数据访问逻辑,不含解析逻辑
// ==========================================

pub mod cell;
pub mod upload;
pub mod user;

// 重导出核心类型
pub use cell::CellValue;
pub use upload::{UploadOutcome, UploadStatus, UploadedFile};
pub use user::{NewUserRecord, UserField, UserRecord};
