// ==========================================
// Excel 用户导入 - 应用配置
// ==========================================
// 职责: 从环境变量加载运行配置（全部可选）
// 约束: 导入器只接收 ImportSettings，不直接读环境变量
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// 数据行数上限默认值
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// 上传请求体上限默认值（10 MiB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// 默认监听地址
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// 默认导出文件名
pub const DEFAULT_EXPORT_FILE_NAME: &str = "User_Demo.xlsx";

// 配置键
pub mod config_keys {
    pub const DB_PATH: &str = "EXCEL_IMPORT_DB_PATH";
    pub const BIND_ADDR: &str = "EXCEL_IMPORT_BIND_ADDR";
    pub const MAX_ROWS: &str = "EXCEL_IMPORT_MAX_ROWS";
    pub const MAX_UPLOAD_BYTES: &str = "EXCEL_IMPORT_MAX_UPLOAD_BYTES";
    pub const EXPORT_FILE_NAME: &str = "EXCEL_IMPORT_EXPORT_FILE_NAME";
}

/// 配置错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置值无效: {key}={value}")]
    InvalidValue { key: String, value: String },
}

// ==========================================
// ImportSettings - 导入参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSettings {
    pub max_rows: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

// ==========================================
// AppConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub bind_addr: SocketAddr,
    pub import: ImportSettings,
    pub max_upload_bytes: usize,
    pub export_file_name: String,
}

impl AppConfig {
    /// 从进程环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（空白值视为未设置）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = get(config_keys::DB_PATH).unwrap_or_else(default_db_path);

        let bind_addr: SocketAddr = parse_or(
            config_keys::BIND_ADDR,
            get(config_keys::BIND_ADDR),
            || DEFAULT_BIND_ADDR.parse().ok(),
        )?;

        let max_rows: usize = parse_or(config_keys::MAX_ROWS, get(config_keys::MAX_ROWS), || {
            Some(DEFAULT_MAX_ROWS)
        })?;

        let max_upload_bytes: usize = parse_or(
            config_keys::MAX_UPLOAD_BYTES,
            get(config_keys::MAX_UPLOAD_BYTES),
            || Some(DEFAULT_MAX_UPLOAD_BYTES),
        )?;

        let export_file_name = get(config_keys::EXPORT_FILE_NAME)
            .unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string());

        Ok(Self {
            db_path,
            bind_addr,
            import: ImportSettings { max_rows },
            max_upload_bytes,
            export_file_name,
        })
    }
}

/// 解析配置值；未设置时取默认值
fn parse_or<T, D>(key: &str, raw: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    D: FnOnce() -> Option<T>,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => default().ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: String::new(),
        }),
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 用户数据目录/excel-user-import/excel_user_import.db
/// - 无用户数据目录时: ./excel_user_import.db
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./excel_user_import.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("excel-user-import");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("excel_user_import.db");
        }
    }

    path.to_string_lossy().to_string()
}
