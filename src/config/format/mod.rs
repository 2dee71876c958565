//! 环境变量格式：dotenv 解析与 text/json/xml 输出

pub mod dotenv;
pub mod json;
pub mod text;
pub mod xml;

use crate::error::Result;
use crate::types::{EnvironmentSet, OutputFormat};

/// 按指定格式渲染环境变量集合（不含结尾换行）
///
/// # Errors
///
/// JSON 编码失败时返回错误
pub fn render(vars: &EnvironmentSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::serialize(vars)),
        OutputFormat::Json => json::serialize(vars),
        OutputFormat::Xml => Ok(xml::serialize(vars)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dispatches_on_format() {
        let vars = EnvironmentSet::from_pairs([("K", "v")]);
        assert_eq!(render(&vars, OutputFormat::Text).unwrap(), "K=v");
        assert!(render(&vars, OutputFormat::Json).unwrap().starts_with("{\"environment\""));
        assert!(render(&vars, OutputFormat::Xml).unwrap().starts_with("<?xml"));
    }
}
