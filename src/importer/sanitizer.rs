// ==========================================
// Excel 用户导入 - 文本清洗器
// ==========================================
// 职责: 注入特征检测 + 表格公式注入中和
// 流程: HTML 实体解码 → 注入特征检测 → TRIM → 公式前缀保护
// 红线: 清洗后的文本即落库文本、即导出文本
// ==========================================

use crate::importer::error::SanitizeError;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::warn;

/// 公式/HTML 风险前导字符（单引号本身即保护前缀，不重复追加）
const GUARDED_LEADING_CHARS: [char; 8] = ['=', '+', '-', '@', '<', '>', '"', '&'];

/// 文本保护前缀
pub const FORMULA_GUARD: char = '\'';

// ==========================================
// InjectionKind - 注入特征类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionKind {
    ScriptTag,
    InlineEventHandler,
    ScriptUri,
    DangerousTag,
    ImageEventHandler,
    DangerousApi,
}

impl InjectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InjectionKind::ScriptTag => "script_tag",
            InjectionKind::InlineEventHandler => "inline_event_handler",
            InjectionKind::ScriptUri => "script_uri",
            InjectionKind::DangerousTag => "dangerous_tag",
            InjectionKind::ImageEventHandler => "image_event_handler",
            InjectionKind::DangerousApi => "dangerous_api",
        }
    }
}

// 检测顺序固定，命中第一条即返回
static INJECTION_PATTERNS: LazyLock<Vec<(InjectionKind, Regex)>> = LazyLock::new(|| {
    [
        (
            InjectionKind::ScriptTag,
            r"(?i)<\s*script\b[^>]*>(.*?)<\s*/\s*script\s*>",
        ),
        (
            InjectionKind::InlineEventHandler,
            r#"(?i)on\w+\s*=\s*['"]?[^'"]+['"]?"#,
        ),
        (InjectionKind::ScriptUri, r"(?i)(javascript:|data:text/html)"),
        (
            InjectionKind::DangerousTag,
            r"(?i)<\s*(iframe|embed|svg|object)\b[^>]*>",
        ),
        (InjectionKind::ImageEventHandler, r"(?i)<\s*img\b[^>]*on\w+\s*="),
        (
            InjectionKind::DangerousApi,
            r"(?i)(document\.cookie|document\.write|window\.location|eval\s*\(|String\.fromCharCode\s*\()",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid regex")))
    .collect()
});

static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("valid regex")
});

// ==========================================
// Sanitizer - 文本清洗器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer;

impl Sanitizer {
    /// 清洗文本
    ///
    /// # 返回
    /// - Ok(String): 清洗后的文本（空输入原样返回）
    /// - Err(MaliciousContent): 命中注入特征
    pub fn sanitize(&self, input: &str) -> Result<String, SanitizeError> {
        if input.is_empty() {
            return Ok(String::new());
        }

        // 先解码，避免编码后的攻击载荷漏检
        let decoded = decode_html_entities(input);

        if let Some(kind) = self.detect_injection(&decoded) {
            warn!(pattern = kind.as_str(), "检测到注入特征");
            return Err(SanitizeError::MaliciousContent);
        }

        let trimmed = decoded.trim();
        if needs_formula_guard(trimmed) {
            Ok(format!("{}{}", FORMULA_GUARD, trimmed))
        } else {
            Ok(trimmed.to_string())
        }
    }

    /// 清洗可选文本（None 原样返回）
    pub fn sanitize_opt(&self, input: Option<&str>) -> Result<Option<String>, SanitizeError> {
        input.map(|s| self.sanitize(s)).transpose()
    }

    /// 注入特征检测（按固定顺序）
    pub fn detect_injection(&self, text: &str) -> Option<InjectionKind> {
        INJECTION_PATTERNS
            .iter()
            .find(|(_, regex)| regex.is_match(text))
            .map(|(kind, _)| *kind)
    }
}

/// 首字符是否需要文本保护前缀
fn needs_formula_guard(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| GUARDED_LEADING_CHARS.contains(&c))
}

/// HTML 实体解码（命名实体 + 十进制/十六进制字符引用）
///
/// 逐层解码直到文本不再变化（`&amp;lt;` → `<`），无法识别的实体保持原样
pub fn decode_html_entities(input: &str) -> Cow<'_, str> {
    let mut decoded = Cow::Borrowed(input);

    // 实体替换只会缩短文本，不变即停止
    loop {
        if !decoded.contains('&') {
            return decoded;
        }
        let next = match decode_once(&decoded) {
            Cow::Owned(next) if next != *decoded => Some(next),
            _ => None,
        };
        match next {
            Some(next) => decoded = Cow::Owned(next),
            None => return decoded,
        }
    }
}

/// 单层解码
fn decode_once(input: &str) -> Cow<'_, str> {
    HTML_ENTITY.replace_all(input, |caps: &Captures| {
        let entity = &caps[1];
        resolve_entity(entity).unwrap_or_else(|| caps[0].to_string())
    })
}

fn resolve_entity(entity: &str) -> Option<String> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    quick_xml::escape::resolve_html5_entity(entity).map(str::to_string)
}
