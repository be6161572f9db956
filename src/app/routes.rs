// ==========================================
// Excel 用户导入 - HTTP 路由
// ==========================================
// 路由:
// - POST /api/excel/upload  multipart 字段 file
// - GET  /api/excel/users   下载全部用户记录
// 约束: 导入/导出为同步流程，放入 spawn_blocking 执行
// ==========================================

use axum::{
    body::Bytes,
    extract::{
        multipart::{Multipart, MultipartRejection},
        DefaultBodyLimit, State,
    },
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, warn};

use crate::api::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::domain::UploadedFile;

/// 上传文件字段名
pub const FILE_FIELD: &str = "file";

/// 构建路由
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/api/excel/upload", post(upload_excel))
        .route("/api/excel/users", get(download_users))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.to_response();
        if body.status >= 500 {
            error!(error = %self, "请求处理失败");
        } else {
            warn!(error = %self, "请求被拒绝");
        }

        let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

/// POST /api/excel/upload
async fn upload_excel(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let file = match read_file_part(multipart, state.max_upload_bytes).await {
        Ok(file) => file,
        Err(e) => return e.into_response(),
    };

    let api = state.upload_api.clone();
    let result = tokio::task::spawn_blocking(move || api.upload(file))
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))
        .and_then(|r| r);

    match result {
        Ok(response) => {
            let status =
                StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::BAD_REQUEST);
            (status, Json(response.outcome)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/excel/users
async fn download_users(State(state): State<AppState>) -> Response {
    let api = state.export_api.clone();
    let result = tokio::task::spawn_blocking(move || api.download())
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))
        .and_then(|r| r);

    match result {
        Ok(download) => {
            let mut headers = HeaderMap::new();
            for (name, value) in download.headers() {
                match HeaderValue::from_str(&value) {
                    Ok(value) => {
                        headers.insert(name, value);
                    }
                    Err(e) => warn!(header = name, error = %e, "响应头值无效，已忽略"),
                }
            }
            (StatusCode::OK, headers, download.bytes).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 读取 multipart 中的 file 部分（其他字段忽略）
async fn read_file_part(
    multipart: Result<Multipart, MultipartRejection>,
    limit: usize,
) -> ApiResult<Option<UploadedFile>> {
    let mut multipart =
        multipart.map_err(|e| classify_multipart_error(e.status(), e.body_text(), limit))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| classify_multipart_error(e.status(), e.body_text(), limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes: Bytes = field
            .bytes()
            .await
            .map_err(|e| classify_multipart_error(e.status(), e.body_text(), limit))?;

        return Ok(Some(UploadedFile::new(file_name, content_type, bytes.to_vec())));
    }

    Ok(None)
}

fn classify_multipart_error(status: StatusCode, detail: String, limit: usize) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::InvalidRequest(detail)
    }
}

/// 等待退出信号（Ctrl+C / SIGTERM）
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Ctrl+C 信号监听失败");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "SIGTERM 信号监听失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
