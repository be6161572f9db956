// ==========================================
// Excel 用户导入 - 配置层
// ==========================================
// 职责: 运行配置加载（环境变量）
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{config_keys, default_db_path, AppConfig, ConfigError, ImportSettings};
