// ==========================================
// Excel 用户导入 - 导入 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::{UploadOutcome, UploadedFile};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::SheetRows;

// ==========================================
// UserImporter Trait
// ==========================================
// 用途: 上传导入主接口
// 实现者: UserImporterImpl
pub trait UserImporter: Send + Sync {
    /// 处理一次上传
    ///
    /// # 导入流程
    /// 1. 格式守卫（媒体类型 + 签名）
    /// 2. 解析第一个工作表
    /// 3. 表头解析（缺列整单拒绝）
    /// 4. 行数上限校验
    /// 5. 逐行映射/清洗/校验（行级错误记录后跳过）
    /// 6. 整批落库
    /// 7. 汇总结果
    ///
    /// # 返回
    /// - UploadOutcome: 文件级错误同样以 Failed 结果返回，不抛错
    fn import_upload(&self, upload: &UploadedFile) -> UploadOutcome;
}

// ==========================================
// SheetParser Trait
// ==========================================
// 用途: 表格解码接口
// 实现者: ExcelParser
pub trait SheetParser: Send + Sync {
    /// 解析第一个工作表
    ///
    /// # 返回
    /// - Ok(SheetRows): 表头 + 数据行
    /// - Err: 解码失败 / 无工作表 / 空工作表
    fn parse_first_sheet(&self, bytes: &[u8]) -> ImportResult<SheetRows>;
}
