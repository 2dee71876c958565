//! JSON 格式输出
//!
//! 结构：`{"environment":[{"name":"NAME","value":"VALUE"}, ...]}`。
//! 除 serde_json 的标准转义外，`<`、`>`、`&` 以及 U+2028/U+2029 也会被转义，
//! 以便输出可以直接嵌入 HTML/脚本。

use crate::error::Result;
use crate::types::{EnvironmentSet, EnvironmentVariable};
use serde::Serialize;

#[derive(Serialize)]
struct Environment<'a> {
    environment: &'a [EnvironmentVariable],
}

/// 序列化为 JSON
///
/// # Errors
///
/// 仅在 serde_json 编码失败时返回 `EnvError::Json`
pub fn serialize(vars: &EnvironmentSet) -> Result<String> {
    let doc = Environment {
        environment: vars.as_slice(),
    };
    let json = serde_json::to_string(&doc)?;
    Ok(escape_html(&json))
}

/// 这些字符在 serde_json 的输出中只会出现在字符串字面量内，直接替换是安全的
fn escape_html(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}
