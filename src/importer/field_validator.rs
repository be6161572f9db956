// ==========================================
// Excel 用户导入 - 字段约束校验
// ==========================================
// 职责: 长度 / 范围 / 邮箱格式校验
// 约束: 长度按字符计数（非字节）
// ==========================================

use crate::importer::error::RowError;
use regex::Regex;
use std::sync::LazyLock;

// ===== 字段约束常量 =====
pub const MAX_USERNAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_DEPARTMENT_LENGTH: usize = 100;
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;
pub const MIN_SALARY: f64 = 0.0;
pub const MAX_SALARY: f64 = 10_000_000.0;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

/// 校验用户名
pub fn validate_username(username: &str) -> Result<(), RowError> {
    if username.trim().is_empty() {
        return Err(invalid("Username cannot be empty".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(invalid(format!(
            "Username exceeds maximum length of {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    Ok(())
}

/// 校验邮箱
pub fn validate_email(email: &str) -> Result<(), RowError> {
    if email.trim().is_empty() {
        return Err(invalid("Email cannot be empty".to_string()));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(invalid(format!(
            "Email exceeds maximum length of {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(invalid(format!("Invalid email format: {}", email)));
    }
    Ok(())
}

/// 校验年龄（必填）
pub fn validate_age(age: Option<i32>) -> Result<i32, RowError> {
    let age = age.ok_or_else(|| invalid("Age cannot be null".to_string()))?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(invalid(format!(
            "Age must be between {} and {}",
            MIN_AGE, MAX_AGE
        )));
    }
    Ok(age)
}

/// 校验部门（可选）
pub fn validate_department(department: Option<&str>) -> Result<(), RowError> {
    if let Some(d) = department {
        if d.chars().count() > MAX_DEPARTMENT_LENGTH {
            return Err(invalid(format!(
                "Department exceeds maximum length of {} characters",
                MAX_DEPARTMENT_LENGTH
            )));
        }
    }
    Ok(())
}

/// 校验薪资（必填）
pub fn validate_salary(salary: Option<f64>) -> Result<f64, RowError> {
    let salary = salary.ok_or_else(|| invalid("Salary cannot be null".to_string()))?;
    if !(MIN_SALARY..=MAX_SALARY).contains(&salary) {
        return Err(invalid(format!(
            "Salary must be between {:.1} and {:.1}",
            MIN_SALARY, MAX_SALARY
        )));
    }
    Ok(salary)
}

fn invalid(message: String) -> RowError {
    RowError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"a".repeat(100)).is_ok());
        assert!(validate_username(&"a".repeat(101)).is_err());
        // 多字节字符按字符计数
        assert!(validate_username(&"张".repeat(100)).is_ok());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+c_d-e@mail.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b.c").is_err());
        assert!(validate_email("'=a@b.com").is_err());

        let long = format!("{}@example.com", "a".repeat(250));
        let err = validate_email(&long).unwrap_err();
        assert!(err.to_string().contains("maximum length of 255"));
    }

    #[test]
    fn test_age_range() {
        assert_eq!(validate_age(Some(0)), Ok(0));
        assert_eq!(validate_age(Some(150)), Ok(150));
        for bad in [151, -1] {
            let err = validate_age(Some(bad)).unwrap_err();
            assert!(err.to_string().contains("Age must be between 0 and 150"));
        }
        assert!(validate_age(None).is_err());
    }

    #[test]
    fn test_salary_range() {
        assert_eq!(validate_salary(Some(0.0)), Ok(0.0));
        assert_eq!(validate_salary(Some(10_000_000.0)), Ok(10_000_000.0));
        assert!(validate_salary(Some(10_000_000.01)).is_err());
        assert!(validate_salary(Some(-0.5)).is_err());
        assert!(validate_salary(None).is_err());
    }

    #[test]
    fn test_department_optional() {
        assert!(validate_department(None).is_ok());
        assert!(validate_department(Some("R&D")).is_ok());
        assert!(validate_department(Some(&"d".repeat(101))).is_err());
    }
}
