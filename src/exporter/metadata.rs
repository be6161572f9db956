// ==========================================
// Excel 用户导入 - 文档属性清理
// ==========================================
// 职责: 清除导出包内的标题/作者/应用程序/自定义属性
// 范围: docProps/core.xml, docProps/app.xml, docProps/custom.xml
//       以及 [Content_Types].xml / _rels/.rels 中对 custom.xml 的引用
// ==========================================

use crate::exporter::error::ExportResult;
use regex::Regex;
use std::io::{Cursor, Read, Write};
use std::sync::LazyLock;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const CORE_PART: &str = "docProps/core.xml";
const APP_PART: &str = "docProps/app.xml";
const CUSTOM_PART: &str = "docProps/custom.xml";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const ROOT_RELS_PART: &str = "_rels/.rels";

/// core.xml 中需要清除的元素
const CORE_TAGS: [&str; 3] = ["dc:title", "dc:creator", "cp:lastModifiedBy"];

/// app.xml 中需要清除的元素
const APP_TAGS: [&str; 1] = ["Application"];

static CUSTOM_OVERRIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<Override\b[^>]*PartName="/docProps/custom\.xml"[^>]*/>"#).expect("valid regex")
});

static CUSTOM_RELATIONSHIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<Relationship\b[^>]*Target="/?docProps/custom\.xml"[^>]*/>"#)
        .expect("valid regex")
});

/// 清除文档属性，返回新的 xlsx 字节
pub fn strip_document_metadata(bytes: &[u8]) -> ExportResult<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(bytes.len())));
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        if name == CUSTOM_PART {
            debug!(part = %name, "移除自定义属性");
            continue;
        }

        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        let buf = match name.as_str() {
            CORE_PART => remove_elements(&buf, &CORE_TAGS),
            APP_PART => remove_elements(&buf, &APP_TAGS),
            CONTENT_TYPES_PART => remove_matches(&buf, &CUSTOM_OVERRIDE),
            ROOT_RELS_PART => remove_matches(&buf, &CUSTOM_RELATIONSHIP),
            _ => buf,
        };

        writer.start_file(name, options)?;
        writer.write_all(&buf)?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// 读取包内某个部件的文本（不存在时返回 None）
pub fn read_part(bytes: &[u8], part: &str) -> ExportResult<Option<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut file = match archive.by_name(part) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(Some(text))
}

/// 删除指定元素（含自闭合形式）
fn remove_elements(xml: &[u8], tags: &[&str]) -> Vec<u8> {
    let mut text = String::from_utf8_lossy(xml).into_owned();
    for tag in tags {
        let tag = regex::escape(tag);
        let pattern = format!(r"(?s)<{tag}(\s[^>]*)?>.*?</{tag}>|<{tag}(\s[^>]*)?/>");
        if let Ok(re) = Regex::new(&pattern) {
            text = re.replace_all(&text, "").into_owned();
        }
    }
    text.into_bytes()
}

fn remove_matches(xml: &[u8], re: &Regex) -> Vec<u8> {
    let text = String::from_utf8_lossy(xml);
    re.replace_all(&text, "").into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::<()>::default().compression_method(CompressionMethod::Stored);
        for (name, body) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_strips_core_app_and_custom_properties() {
        let bytes = package(&[
            (
                CONTENT_TYPES_PART,
                r#"<Types><Override PartName="/docProps/core.xml" ContentType="a"/><Override PartName="/docProps/custom.xml" ContentType="b"/></Types>"#,
            ),
            (
                ROOT_RELS_PART,
                r#"<Relationships><Relationship Id="rId1" Type="t" Target="docProps/core.xml"/><Relationship Id="rId4" Type="c" Target="docProps/custom.xml"/></Relationships>"#,
            ),
            (
                CORE_PART,
                "<cp:coreProperties><dc:title>Quarterly</dc:title><dc:creator>someone</dc:creator><cp:lastModifiedBy/><dcterms:created>2025</dcterms:created></cp:coreProperties>",
            ),
            (
                APP_PART,
                "<Properties><Application>Microsoft Excel</Application><DocSecurity>0</DocSecurity></Properties>",
            ),
            (CUSTOM_PART, "<Properties><property name=\"secret\"/></Properties>"),
            ("xl/workbook.xml", "<workbook/>"),
        ]);

        let stripped = strip_document_metadata(&bytes).unwrap();

        let core = read_part(&stripped, CORE_PART).unwrap().unwrap();
        assert!(!core.contains("dc:title"));
        assert!(!core.contains("dc:creator"));
        assert!(!core.contains("lastModifiedBy"));
        assert!(core.contains("<dcterms:created>2025</dcterms:created>"));

        let app = read_part(&stripped, APP_PART).unwrap().unwrap();
        assert!(!app.contains("Application"));
        assert!(app.contains("DocSecurity"));

        assert_eq!(read_part(&stripped, CUSTOM_PART).unwrap(), None);

        let types = read_part(&stripped, CONTENT_TYPES_PART).unwrap().unwrap();
        assert!(!types.contains("custom.xml"));
        assert!(types.contains("core.xml"));

        let rels = read_part(&stripped, ROOT_RELS_PART).unwrap().unwrap();
        assert!(!rels.contains("custom.xml"));

        assert_eq!(
            read_part(&stripped, "xl/workbook.xml").unwrap().as_deref(),
            Some("<workbook/>")
        );
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(strip_document_metadata(b"not a zip").is_err());
    }
}
