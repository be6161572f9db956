// ==========================================
// Excel 用户导入 - 用户导入器实现
// ==========================================
// 职责: 整合导入流程，从上传字节到数据库
// 流程: 格式守卫 → 解析 → 表头 → 行数上限 → 逐行映射 → 整批落库 → 汇总
// 红线: 文件级错误整单拒绝；行级错误记录后跳过，不影响其他行
// ==========================================

use crate::config::ImportSettings;
use crate::domain::{UploadOutcome, UploadedFile};
use crate::importer::error::{ImportError, ImportResult, PERSISTENCE_FAILURE_DETAIL};
use crate::importer::file_parser::ExcelParser;
use crate::importer::format_guard::has_excel_format;
use crate::importer::header_resolver::HeaderIndex;
use crate::importer::outcome_aggregator;
use crate::importer::row_mapper::RowMapper;
use crate::importer::sanitizer::Sanitizer;
use crate::importer::user_importer_trait::{SheetParser, UserImporter};
use crate::repository::UserRecordRepository;
use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// UserImporterImpl - 用户导入器实现
// ==========================================
pub struct UserImporterImpl<R>
where
    R: UserRecordRepository,
{
    // 数据访问层
    repo: R,

    // 导入组件
    parser: Box<dyn SheetParser>,
    sanitizer: Sanitizer,

    // 导入参数
    settings: ImportSettings,
}

impl<R> UserImporterImpl<R>
where
    R: UserRecordRepository,
{
    /// 使用默认组件创建导入器
    pub fn new(repo: R, settings: ImportSettings) -> Self {
        Self::with_parser(repo, Box::new(ExcelParser), settings)
    }

    /// 指定解析器创建导入器
    pub fn with_parser(repo: R, parser: Box<dyn SheetParser>, settings: ImportSettings) -> Self {
        Self {
            repo,
            parser,
            sanitizer: Sanitizer,
            settings,
        }
    }

    /// 执行导入流程
    ///
    /// # 返回
    /// - Ok(UploadOutcome): 已按判定表汇总（可能为 Failed）
    /// - Err(ImportError): 文件级错误
    fn run(&self, upload: &UploadedFile, upload_date: NaiveDateTime) -> ImportResult<UploadOutcome> {
        // === 步骤 1: 格式守卫 ===
        if upload.is_empty() {
            return Err(ImportError::EmptyFile);
        }
        if !has_excel_format(upload.content_type.as_deref(), &upload.bytes) {
            return Err(ImportError::InvalidFormat);
        }
        debug!("格式守卫通过");

        // === 步骤 2: 解析第一个工作表 ===
        let sheet = self.parser.parse_first_sheet(&upload.bytes)?;
        let header_row = sheet.header().ok_or(ImportError::EmptySheet)?;

        // === 步骤 3: 表头解析 ===
        let headers = HeaderIndex::resolve(header_row)?;
        debug!(columns = headers.len(), "表头解析完成");

        // === 步骤 4: 行数上限 ===
        let last_row = sheet.last_row_index();
        if last_row > self.settings.max_rows {
            return Err(ImportError::TooManyRows {
                found: last_row,
                limit: self.settings.max_rows,
            });
        }

        // === 步骤 5: 逐行映射 ===
        let mapper = RowMapper::new(&headers, self.sanitizer);
        let mut records = Vec::new();
        let mut errors = Vec::new();
        let mut skipped = 0usize;

        for (row_number, row) in sheet.data_rows() {
            // 跳过完全空白的行
            if row.iter().all(|c| c.is_blank()) {
                skipped += 1;
                continue;
            }

            match mapper.map_row(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(row_number, validation = e.is_validation(), error = %e, "行处理失败");
                    errors.push(e.for_row(row_number));
                }
            }
        }
        info!(
            valid = records.len(),
            failed = errors.len(),
            skipped,
            "行映射完成"
        );

        // === 步骤 6: 整批落库 ===
        // 落库失败视为整单失败，行级错误保留在前
        let stored = if records.is_empty() {
            0
        } else {
            match self.repo.save_all(records) {
                Ok(saved) => saved.len(),
                Err(e) => {
                    error!(error = %e, "批量落库失败");
                    errors.push(
                        ImportError::PersistenceError(PERSISTENCE_FAILURE_DETAIL.to_string())
                            .to_string(),
                    );
                    return Ok(outcome_aggregator::failed(upload, errors, upload_date));
                }
            }
        };

        // === 步骤 7: 汇总 ===
        Ok(outcome_aggregator::summarize(upload, stored, errors, upload_date))
    }
}

impl<R> UserImporter for UserImporterImpl<R>
where
    R: UserRecordRepository,
{
    #[instrument(skip(self, upload), fields(file_name = ?upload.file_name, size = upload.size()))]
    fn import_upload(&self, upload: &UploadedFile) -> UploadOutcome {
        let upload_date = Local::now().naive_local();
        info!("开始处理上传");

        match self.run(upload, upload_date) {
            Ok(outcome) => {
                info!(status = %outcome.status, records = outcome.records_processed, "上传处理完成");
                outcome
            }
            Err(e) => {
                warn!(error = %e, "上传被拒绝");
                outcome_aggregator::failed(upload, vec![e.to_string()], upload_date)
            }
        }
    }
}
