// ==========================================
// Excel 用户导入 - 服务主入口
// ==========================================
// 技术栈: axum + tokio + SQLite
// ==========================================

use anyhow::Context;
use excel_user_import::app::{build_router, shutdown_signal, AppState};
use excel_user_import::config::AppConfig;
use excel_user_import::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", excel_user_import::APP_NAME, excel_user_import::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env().context("加载配置失败")?;
    tracing::info!(
        db_path = %config.db_path,
        max_rows = config.import.max_rows,
        max_upload_bytes = config.max_upload_bytes,
        "配置加载完成"
    );

    let state = AppState::new(&config).context("无法初始化AppState")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("监听地址绑定失败: {}", config.bind_addr))?;
    tracing::info!("服务已启动: http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    tracing::info!("服务已退出");
    Ok(())
}
