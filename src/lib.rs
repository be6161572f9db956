// ==========================================
// Excel 用户导入 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 表格上传校验/清洗入库 + 报表导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 上传校验与清洗
pub mod importer;

// 导出层 - 报表生成
pub mod exporter;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 用例接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    CellValue, NewUserRecord, UploadOutcome, UploadStatus, UploadedFile, UserField, UserRecord,
};

// 导入/导出
pub use exporter::ReportBuilder;
pub use importer::{Sanitizer, UserImporter, UserImporterImpl};

// API
pub use api::{ApiError, ErrorResponse, ExportApi, UploadApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Excel User Import";
