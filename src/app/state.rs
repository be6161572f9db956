// ==========================================
// Excel 用户导入 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 请求间只共享存储连接，不共享导入中间状态
// ==========================================

use std::sync::Arc;

use crate::api::{ExportApi, UploadApi};
use crate::config::AppConfig;
use crate::importer::UserImporterImpl;
use crate::repository::{RepositoryResult, UserRecordRepositoryImpl};

/// 应用状态
///
/// 作为 axum Router 的共享状态，按请求克隆
#[derive(Clone)]
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 上传导入API
    pub upload_api: Arc<UploadApi>,

    /// 导出API
    pub export_api: Arc<ExportApi<UserRecordRepositoryImpl>>,

    /// 上传请求体上限（字节）
    pub max_upload_bytes: usize,
}

impl AppState {
    /// 按配置打开数据库并初始化全部 API
    pub fn new(config: &AppConfig) -> RepositoryResult<Self> {
        tracing::info!(db_path = %config.db_path, "初始化AppState");
        let repo = UserRecordRepositoryImpl::new(&config.db_path)?;
        Ok(Self::with_repository(repo, config))
    }

    /// 使用已有仓储初始化（测试中可传入临时库）
    pub fn with_repository(repo: UserRecordRepositoryImpl, config: &AppConfig) -> Self {
        let importer = UserImporterImpl::new(repo.clone(), config.import);
        let upload_api = UploadApi::new(Arc::new(importer));
        let export_api = ExportApi::new(repo, config.export_file_name.as_str());

        Self {
            db_path: config.db_path.clone(),
            upload_api: Arc::new(upload_api),
            export_api: Arc::new(export_api),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
