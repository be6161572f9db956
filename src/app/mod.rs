// ==========================================
// Excel 用户导入 - 应用层
// ==========================================
// 职责: HTTP 集成，连接客户端与后端 API
// ==========================================

pub mod routes;
pub mod state;

// 重导出
pub use routes::{build_router, shutdown_signal};
pub use state::AppState;
