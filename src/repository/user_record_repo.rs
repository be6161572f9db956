// ==========================================
// Excel 用户导入 - 用户记录 Repository
// ==========================================
// 职责: user_data 表的批量写入与全量读取（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 约束: save_all 在单个事务内完成，要么全部可见要么全部不可见
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::{NewUserRecord, UserRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

// ==========================================
// UserRecordRepository Trait
// ==========================================
// 实现者: UserRecordRepositoryImpl（测试中可替换为失败桩）
pub trait UserRecordRepository: Send + Sync {
    /// 整批写入，返回带主键与创建时间的记录（顺序与入参一致）
    fn save_all(&self, records: Vec<NewUserRecord>) -> RepositoryResult<Vec<UserRecord>>;

    /// 全量读取（按 id 升序）
    fn find_all(&self) -> RepositoryResult<Vec<UserRecord>>;

    /// 记录总数
    fn count(&self) -> RepositoryResult<usize>;
}

// ==========================================
// UserRecordRepositoryImpl
// ==========================================
#[derive(Clone)]
pub struct UserRecordRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl UserRecordRepositoryImpl {
    /// 创建新的 Repository 实例（打开连接并确保表存在）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
        Ok(UserRecord {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            age: row.get(3)?,
            department: row.get(4)?,
            salary: row.get(5)?,
            is_active: row.get(6)?,
            created_at: row.get::<_, NaiveDateTime>(7)?,
        })
    }
}

impl UserRecordRepository for UserRecordRepositoryImpl {
    fn save_all(&self, records: Vec<NewUserRecord>) -> RepositoryResult<Vec<UserRecord>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let created_at = Local::now().naive_local();
        let mut saved = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO user_data (
                    username, email, age, department, salary, is_active, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    record.username,
                    record.email,
                    record.age,
                    record.department,
                    record.salary,
                    record.is_active,
                    created_at,
                ])?;
                let id = tx.last_insert_rowid();
                saved.push(UserRecord::from_new(id, record, created_at));
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(count = saved.len(), "用户记录批量写入完成");
        Ok(saved)
    }

    fn find_all(&self) -> RepositoryResult<Vec<UserRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, username, email, age, department, salary, is_active, created_at
            FROM user_data
            ORDER BY id ASC
            "#,
        )?;

        let records = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = records.len(), "读取用户记录");
        Ok(records)
    }

    fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM user_data", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
