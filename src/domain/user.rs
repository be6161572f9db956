// ==========================================
// Excel 用户导入 - 用户领域模型
// ==========================================
// 职责: 定义上传列、待落库候选记录、已落库记录
// 红线: 已落库记录必须全部通过字段约束与清洗
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// UserField - 上传必填列
// ==========================================
// 顺序即表头缺失提示的顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserField {
    Username,
    Email,
    Age,
    Department,
    Salary,
    IsActive,
}

impl UserField {
    /// 全部必填列（固定顺序）
    pub const ALL: [UserField; 6] = [
        UserField::Username,
        UserField::Email,
        UserField::Age,
        UserField::Department,
        UserField::Salary,
        UserField::IsActive,
    ];

    /// 规范化后的表头名称
    pub fn header_name(&self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::Email => "email",
            UserField::Age => "age",
            UserField::Department => "department",
            UserField::Salary => "salary",
            UserField::IsActive => "is_active",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header_name())
    }
}

// ==========================================
// NewUserRecord - 待落库候选记录
// ==========================================
// 用途: 行映射成功后的产物，整批一次性落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserRecord {
    pub username: String,           // 显示名（非空，≤100，已清洗）
    pub email: String,              // 邮箱（非空，≤255，格式校验，已清洗）
    pub age: i32,                   // 年龄（0-150）
    pub department: Option<String>, // 部门（可选，≤100，已清洗）
    pub salary: f64,                // 薪资（0-10,000,000）
    pub is_active: bool,            // 激活标记
}

// ==========================================
// UserRecord - 已落库记录
// ==========================================
// 对齐: user_data 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,                    // 存储层分配
    pub username: String,
    pub email: String,
    pub age: i32,
    pub department: Option<String>,
    pub salary: f64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,  // 落库时间，之后不可变
}

impl UserRecord {
    /// 由候选记录与存储层分配的主键/时间构造
    pub fn from_new(id: i64, record: NewUserRecord, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            username: record.username,
            email: record.email,
            age: record.age,
            department: record.department,
            salary: record.salary,
            is_active: record.is_active,
            created_at,
        }
    }
}
