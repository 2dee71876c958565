//! XML 格式输出
//!
//! 结构：`<Environment><Env><Name>..</Name><Value>..</Value></Env>...</Environment>`，
//! 前面手动加上 XML 声明。

use crate::types::EnvironmentSet;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// 序列化为 XML
#[must_use]
pub fn serialize(vars: &EnvironmentSet) -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str("<Environment>");
    for var in vars {
        xml.push_str("<Env><Name>");
        xml.push_str(&escape_xml(&var.name));
        xml.push_str("</Name><Value>");
        xml.push_str(&escape_xml(&var.value));
        xml.push_str("</Value></Env>");
    }
    xml.push_str("</Environment>");
    xml
}

/// 转义文本节点，换行/回车/制表符使用字符引用以便原样还原
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            _ => out.push(c),
        }
    }
    out
}
